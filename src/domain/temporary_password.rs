use rand::RngCore;
use secrecy::{ExposeSecret, Secret};

use super::{Password, ValidationError};

pub const TEMPORARY_PASSWORD_LENGTH: usize = 12;

/// One-time credential issued when an administrator creates an account.
/// Hex-encoded random bytes; the plaintext leaves the process exactly once,
/// in the creation response.
#[derive(Debug, Clone)]
pub struct TemporaryPassword(Secret<String>);

impl TemporaryPassword {
    pub fn generate() -> Self {
        let mut bytes = [0u8; (TEMPORARY_PASSWORD_LENGTH + 1) / 2];
        rand::thread_rng().fill_bytes(&mut bytes);

        let mut encoded = hex::encode(bytes);
        encoded.truncate(TEMPORARY_PASSWORD_LENGTH);

        Self(Secret::new(encoded))
    }

    pub fn as_password(&self) -> Result<Password, ValidationError> {
        Password::parse(self.0.clone())
    }
}

impl PartialEq for TemporaryPassword {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl AsRef<Secret<String>> for TemporaryPassword {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}
