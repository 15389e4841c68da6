use crate::errors::ValidationError;
use crate::models::Notice;
use crate::storage::KeyValueStore;
use crate::theme::{NotificationCategory, ThemeManager, ThemeState};
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::info;

pub const EXPORT_FILENAME: &str = "settings.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeName {
    Dark,
    Light,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsExport {
    pub theme: ThemeName,
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub promotional_emails: bool,
    pub export_date: String,
}

pub fn export(state: &ThemeState) -> SettingsExport {
    SettingsExport {
        theme: if state.dark_mode {
            ThemeName::Dark
        } else {
            ThemeName::Light
        },
        email_notifications: state.notification(NotificationCategory::Email),
        sms_notifications: state.notification(NotificationCategory::Sms),
        promotional_emails: state.notification(NotificationCategory::Promotional),
        export_date: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Error importing settings file: {0}")]
    Malformed(String),
    #[error("Error importing settings file: expected a JSON object")]
    NotAnObject,
    #[error("Error importing settings file: no recognized settings found")]
    NoRecognizedKeys,
    #[error("Error importing settings file: invalid value for {0}")]
    InvalidValue(&'static str),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsImport {
    pub dark_mode: Option<bool>,
    pub notifications: Vec<(NotificationCategory, bool)>,
}

impl SettingsImport {
    pub fn is_empty(&self) -> bool {
        self.dark_mode.is_none() && self.notifications.is_empty()
    }
}

/// Validates the whole document before anything is applied.
pub fn parse_import(raw: &str) -> Result<SettingsImport, ImportError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| ImportError::Malformed(err.to_string()))?;
    let object = value.as_object().ok_or(ImportError::NotAnObject)?;

    let import = SettingsImport {
        dark_mode: theme_field(object)?,
        notifications: NotificationCategory::ALL
            .into_iter()
            .filter_map(|category| {
                object.get(category.key()).map(|value| {
                    value
                        .as_bool()
                        .map(|enabled| (category, enabled))
                        .ok_or(ImportError::InvalidValue(category.key()))
                })
            })
            .collect::<Result<_, _>>()?,
    };

    if import.is_empty() {
        return Err(ImportError::NoRecognizedKeys);
    }
    Ok(import)
}

fn theme_field(object: &Map<String, Value>) -> Result<Option<bool>, ImportError> {
    match object.get("theme") {
        None | Some(Value::Null) => Ok(None),
        Some(value) => match serde_json::from_value::<ThemeName>(value.clone()) {
            Ok(theme) => Ok(Some(theme == ThemeName::Dark)),
            Err(_) => Err(ImportError::InvalidValue("theme")),
        },
    }
}

pub fn apply_import(
    manager: &mut ThemeManager,
    store: &mut impl KeyValueStore,
    import: &SettingsImport,
) -> Notice {
    if let Some(dark_mode) = import.dark_mode {
        manager.set_dark_mode(store, dark_mode);
    }
    for &(category, enabled) in &import.notifications {
        manager.set_notification(store, category, enabled);
    }
    info!(
        dark_mode = ?import.dark_mode,
        notifications = import.notifications.len(),
        "settings imported"
    );
    Notice::success("Settings imported successfully")
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub message: String,
}

pub fn submit_feedback(form: &FeedbackForm) -> Result<Notice, ValidationError> {
    let name = form.name.trim();
    let message = form.message.trim();
    if name.is_empty() {
        return Err(ValidationError::new("Please enter your name"));
    }
    if message.is_empty() {
        return Err(ValidationError::new("Please enter your message"));
    }

    info!(%name, %message, "feedback submitted");
    Ok(Notice::success("Feedback sent successfully!"))
}
