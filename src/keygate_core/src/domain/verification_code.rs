use std::fmt;

use rand::Rng;
use thiserror::Error;

const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

#[derive(Debug, Error, PartialEq)]
pub enum VerificationCodeError {
    #[error("Verification code must be a 6-digit number")]
    InvalidFormat,
}

/// A one-time email verification code: six decimal digits, no leading zero.
///
/// `Debug` redacts the digits so the code never leaks into logs or error
/// chains; redemption compares against the raw submitted string instead.
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationCode(String);

impl VerificationCode {
    /// Draw a fresh code uniformly from [100000, 999999].
    ///
    /// Uses the thread-local RNG, which is a CSPRNG and safe for concurrent
    /// use; no shared generator instance is needed.
    pub fn generate() -> Self {
        let value = rand::rng().random_range(CODE_MIN..=CODE_MAX);
        Self(value.to_string())
    }

    pub fn parse(raw: &str) -> Result<Self, VerificationCodeError> {
        let valid = raw.len() == 6
            && raw.bytes().all(|b| b.is_ascii_digit())
            && !raw.starts_with('0');
        if !valid {
            return Err(VerificationCodeError::InvalidFormat);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Exact-match comparison against a user-submitted string.
    pub fn matches(&self, submitted: &str) -> bool {
        self.0 == submitted
    }
}

impl fmt::Debug for VerificationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("VerificationCode(******)")
    }
}
