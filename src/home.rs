use crate::errors::ValidationError;
use crate::models::Notice;
use serde::Deserialize;
use tracing::info;

pub const RATING_ROWS: usize = 5;
pub const MAX_STARS: u8 = 5;

pub const RATING_TOPICS: [&str; RATING_ROWS] = [
    "Cleanliness",
    "Turnaround time",
    "Folding & packing",
    "Staff friendliness",
    "Value for money",
];

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RatingSheet {
    pub ratings: [u8; RATING_ROWS],
}

impl RatingSheet {
    pub fn rated_rows(&self) -> usize {
        self.ratings.iter().filter(|stars| **stars > 0).count()
    }

    pub fn average(&self) -> f64 {
        let total: u32 = self.ratings.iter().map(|stars| u32::from(*stars)).sum();
        f64::from(total) / RATING_ROWS as f64
    }

    pub fn submit(&self) -> Result<Notice, ValidationError> {
        if self.ratings.iter().any(|stars| *stars > MAX_STARS) {
            return Err(ValidationError::new(format!(
                "Rating must be between 0 and {MAX_STARS} stars"
            )));
        }
        if self.rated_rows() == 0 {
            return Err(ValidationError::new(
                "Please select at least one rating before submitting.",
            ));
        }

        let average = self.average();
        info!(average, rated = self.rated_rows(), "rating submitted");
        Ok(Notice::success(format!(
            "Thank you! Average rating: {average:.1} stars"
        )))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub contact_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub plan: String,
}

pub fn apply_membership(form: &MembershipForm) -> Result<Notice, ValidationError> {
    if form.full_name.trim().is_empty() || form.contact_number.trim().is_empty() {
        return Err(ValidationError::new("Please fill in required fields."));
    }

    info!(full_name = %form.full_name.trim(), plan = %form.plan, "membership application received");
    Ok(Notice::success(
        "Membership application received! We will contact you shortly.",
    ))
}
