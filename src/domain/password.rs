use super::ValidationError;
use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl PartialEq for Password {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl Password {
    pub fn parse(s: Secret<String>) -> Result<Password, ValidationError> {
        validate_password(&s)?;
        Ok(Self(s))
    }
}

fn validate_password(s: &Secret<String>) -> Result<(), ValidationError> {
    let min_characters = 8;
    let max_characters = 128;
    let char_count = s.expose_secret().chars().count();

    if char_count < min_characters {
        return Err(ValidationError::new(format!(
            "Password too short. Should be {} to {} characters.",
            min_characters, max_characters
        )));
    }

    if char_count > max_characters {
        return Err(ValidationError::new(format!(
            "Password too long. Should be {} to {} characters.",
            min_characters, max_characters
        )));
    }

    Ok(())
}

impl AsRef<Secret<String>> for Password {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
