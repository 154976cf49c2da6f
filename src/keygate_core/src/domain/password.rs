use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

const MIN_PASSWORD_LENGTH: usize = 8;

#[derive(Debug, Error, PartialEq)]
pub enum PasswordError {
    #[error("Password is required")]
    Missing,
    #[error("Password must be at least {MIN_PASSWORD_LENGTH} characters long")]
    TooShort,
}

/// A validated password. The inner value stays wrapped in [`Secret`] so it is
/// never printed by `Debug` or picked up by tracing.
///
/// Hashing and storage are the identity store's concern; the core only
/// carries the secret through to it.
#[derive(Debug, Clone)]
pub struct Password(Secret<String>);

impl Password {
    /// Read the raw secret. For store adapters only, which need it to hash
    /// or compare credentials.
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl TryFrom<Secret<String>> for Password {
    type Error = PasswordError;

    fn try_from(raw: Secret<String>) -> Result<Self, Self::Error> {
        let value = raw.expose_secret();
        if value.is_empty() {
            return Err(PasswordError::Missing);
        }
        if value.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(PasswordError::TooShort);
        }
        Ok(Self(raw))
    }
}
