use crate::errors::ValidationError;
use crate::models::Notice;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;
use tracing::info;

pub const MIN_PASSWORD_LEN: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub phone_number: String,
}

impl PersonalInfo {
    pub fn sample() -> Self {
        Self {
            first_name: "Michael John".to_string(),
            last_name: "Reyes".to_string(),
            display_name: "John Reyes".to_string(),
            email: "john.reyes@example.com".to_string(),
            address: "123 Laundry Lane, Springfield".to_string(),
            phone_number: "+1 (555) 123-4567".to_string(),
        }
    }
}

fn email_pattern() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"))
}

fn phone_pattern() -> &'static Regex {
    static PHONE_RE: OnceLock<Regex> = OnceLock::new();
    PHONE_RE.get_or_init(|| Regex::new(r"^[\d\s\-\+\(\)]+$").expect("valid phone regex"))
}

pub fn missing_fields(info: &PersonalInfo) -> Vec<&'static str> {
    [
        (&info.first_name, "First name is required"),
        (&info.last_name, "Last name is required"),
        (&info.display_name, "Display name is required"),
        (&info.email, "Email is required"),
        (&info.address, "Address is required"),
        (&info.phone_number, "Phone number is required"),
    ]
    .into_iter()
    .filter(|(value, _)| value.trim().is_empty())
    .map(|(_, message)| message)
    .collect()
}

pub fn update_personal_info(info: &PersonalInfo) -> Result<Notice, ValidationError> {
    if let Some(message) = missing_fields(info).first() {
        return Err(ValidationError::new(*message));
    }
    if !email_pattern().is_match(info.email.trim()) {
        return Err(ValidationError::new("Please enter a valid email address."));
    }
    if !phone_pattern().is_match(info.phone_number.trim()) {
        return Err(ValidationError::new("Please enter a valid phone number."));
    }

    info!(display_name = %info.display_name, email = %info.email, "personal information updated");
    Ok(Notice::success("Personal information updated successfully!"))
}

/// Last word of the first name plus the last name, e.g. "Michael John" + "Reyes" -> "John Reyes".
pub fn derive_display_name(first_name: &str, last_name: &str) -> Option<String> {
    let first_name = first_name.trim();
    let last_name = last_name.trim();
    if first_name.is_empty() || last_name.is_empty() {
        return None;
    }

    let given = first_name.split_whitespace().last().unwrap_or(first_name);
    Some(format!("{given} {last_name}"))
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    #[serde(default)]
    pub current_password: String,
    #[serde(default)]
    pub new_password: String,
    #[serde(default)]
    pub confirm_password: String,
}

pub fn change_password(change: &PasswordChange) -> Result<Notice, ValidationError> {
    if change.current_password.is_empty()
        && change.new_password.is_empty()
        && change.confirm_password.is_empty()
    {
        return Err(ValidationError::new(
            "Please fill in the password fields to change your password.",
        ));
    }

    if !change.new_password.is_empty() {
        if change.new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ValidationError::new(
                "New password must be at least 8 characters long.",
            ));
        }
        if change.new_password != change.confirm_password {
            return Err(ValidationError::new(
                "New password and confirmation password do not match.",
            ));
        }
        if change.current_password.is_empty() {
            return Err(ValidationError::new(
                "Please enter your current password to change it.",
            ));
        }
    }

    info!("password change requested");
    Ok(Notice::success("Password updated successfully!"))
}
