use super::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn parse(number: String) -> Result<Self, ValidationError> {
        let regex = regex::Regex::new(r"^\+?[0-9][0-9 ()\-]{5,18}$")
            .expect("Regex for PhoneNumber parser is invalid");
        if regex.is_match(&number) {
            Ok(Self(number))
        } else {
            Err(ValidationError::new(format!(
                "Invalid phone number: {}",
                number
            )))
        }
    }
}

impl AsRef<String> for PhoneNumber {
    fn as_ref(&self) -> &String {
        &self.0
    }
}
