use super::Password;
use argon2::{
    password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash,
    PasswordHasher, PasswordVerifier, Version,
};
use color_eyre::eyre::{Result, WrapErr};
use lazy_static::lazy_static;
use secrecy::{ExposeSecret, Secret};

#[derive(Debug, Clone)]
pub struct UserPasswordHash(Secret<String>);

impl PartialEq for UserPasswordHash {
    fn eq(&self, other: &Self) -> bool {
        self.0.expose_secret() == other.0.expose_secret()
    }
}

impl UserPasswordHash {
    pub fn parse(s: Secret<String>) -> Result<Self> {
        let _hash = PasswordHash::new(s.expose_secret())
            .wrap_err("Failed to parse password hash")?;
        Ok(Self(s))
    }

    pub async fn from_password(password: Password) -> Result<Self> {
        let hash = Self::compute(password.as_ref().to_owned()).await?;
        Ok(hash)
    }

    async fn compute(s: Secret<String>) -> Result<Self> {
        let hash = compute_password_hash(s).await?;
        Ok(Self(hash))
    }
}

impl AsRef<Secret<String>> for UserPasswordHash {
    fn as_ref(&self) -> &Secret<String> {
        &self.0
    }
}

#[tracing::instrument(name = "Verify password hash", skip_all)]
pub async fn verify_password_hash(
    expected_password_hash: Secret<String>,
    password_candidate: Secret<String>,
) -> Result<()> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| {
            let expected_password_hash: PasswordHash<'_> =
                PasswordHash::new(expected_password_hash.expose_secret())?;

            Argon2::default()
                .verify_password(
                    password_candidate.expose_secret().as_bytes(),
                    &expected_password_hash,
                )
                .wrap_err("failed to verify password hash")
        })
    })
    .await?
}

lazy_static! {
    // Hash of a throwaway credential, used so that login attempts against
    // unknown emails still pay for one verification.
    static ref DUMMY_PASSWORD_HASH: Secret<String> =
        compute_password_hash_blocking(Secret::new(
            uuid::Uuid::new_v4().to_string()
        ))
        .expect("Failed to compute dummy password hash");
}

/// Burn one Argon2 verification against a hash that matches nothing, so
/// the unknown-email and wrong-password login paths cost the same.
#[tracing::instrument(name = "Verify against dummy hash", skip_all)]
pub async fn verify_dummy_password_hash(password_candidate: Secret<String>) {
    let _ = verify_password_hash(
        DUMMY_PASSWORD_HASH.to_owned(),
        password_candidate,
    )
    .await;
}

#[tracing::instrument(name = "Computing password hash", skip_all)]
pub async fn compute_password_hash(
    password: Secret<String>,
) -> Result<Secret<String>> {
    let current_span: tracing::Span = tracing::Span::current();

    tokio::task::spawn_blocking(move || {
        current_span.in_scope(|| compute_password_hash_blocking(password))
    })
    .await?
}

fn compute_password_hash_blocking(
    password: Secret<String>,
) -> Result<Secret<String>> {
    let salt: SaltString = SaltString::generate(&mut rand::thread_rng());
    let password_hash = Argon2::new(
        Algorithm::Argon2id,
        Version::V0x13,
        Params::new(15000, 2, 1, None)?,
    )
    .hash_password(password.expose_secret().as_bytes(), &salt)?
    .to_string();

    Ok(Secret::new(password_hash))
}
