use serde::{Deserialize, Serialize};

use super::ValidationError;

/// The single role enumeration consumed by validation, storage and
/// responses. Dashboard routing on the client keys off these same strings.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Role {
    Admin,
    Management,
    Finance,
    Student,
    Teacher,
}

impl Role {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        match s {
            "ADMIN" => Ok(Self::Admin),
            "MANAGEMENT" => Ok(Self::Management),
            "FINANCE" => Ok(Self::Finance),
            "STUDENT" => Ok(Self::Student),
            "TEACHER" => Ok(Self::Teacher),
            _ => Err(ValidationError::new(format!(
                "Invalid role specified: {}",
                s
            ))),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "ADMIN",
            Self::Management => "MANAGEMENT",
            Self::Finance => "FINANCE",
            Self::Student => "STUDENT",
            Self::Teacher => "TEACHER",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
