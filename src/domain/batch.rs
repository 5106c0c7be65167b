use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use super::ValidationError;

const MIN_BATCH_YEAR: i32 = 1900;
const MAX_BATCH_YEARS_AHEAD: i32 = 5;
const MAX_BATCH_LABEL_LENGTH: usize = 16;

/// Cohort label grouping student accounts. Account creation supplies it as
/// an intake year; bulk assignment may use a free-form label like "2025A".
/// Stored as text either way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Batch(String);

impl Batch {
    pub fn parse_year(year: i32) -> Result<Self, ValidationError> {
        let max_year = Utc::now().year() + MAX_BATCH_YEARS_AHEAD;
        if year < MIN_BATCH_YEAR || year > max_year {
            return Err(ValidationError::new(format!(
                "Batch year must be between {} and {}",
                MIN_BATCH_YEAR, max_year
            )));
        }
        Ok(Self(year.to_string()))
    }

    pub fn parse_label(label: String) -> Result<Self, ValidationError> {
        if label.is_empty() {
            return Err(ValidationError::new(
                "Batch name cannot be empty".to_string(),
            ));
        }
        if label.chars().count() > MAX_BATCH_LABEL_LENGTH {
            return Err(ValidationError::new(format!(
                "Max batch name length is {} characters",
                MAX_BATCH_LABEL_LENGTH
            )));
        }
        Ok(Self(label))
    }
}

impl AsRef<String> for Batch {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
