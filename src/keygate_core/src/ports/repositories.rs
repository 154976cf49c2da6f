use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{
    claim::DerivedClaim,
    email::Email,
    external_login::ExternalLoginInfo,
    identity::Identity,
    password::Password,
    sign_in_outcome::SignInOutcome,
    verification_code::VerificationCode,
};

// IdentityStore port trait and errors
#[derive(Debug, Error)]
pub enum IdentityStoreError {
    #[error("An account with this email already exists")]
    AlreadyExists,
    #[error("Identity not found")]
    NotFound,
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl PartialEq for IdentityStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::AlreadyExists, Self::AlreadyExists) => true,
            (Self::NotFound, Self::NotFound) => true,
            (Self::Unexpected(_), Self::Unexpected(_)) => true,
            _ => false,
        }
    }
}

/// The external identity store the core authenticates against.
///
/// The store owns identity records, role and claim sets, external-login
/// links and credential checks. It enforces email uniqueness on `create`;
/// the core relies on that instead of its own locking.
#[async_trait]
pub trait IdentityStore: Send + Sync {
    async fn find_by_email(&self, email: &Email) -> Result<Option<Identity>, IdentityStoreError>;

    /// Create a new identity. `password` is absent for externally linked
    /// accounts, which never sign in with local credentials.
    async fn create(
        &self,
        identity: Identity,
        password: Option<Password>,
    ) -> Result<(), IdentityStoreError>;

    async fn delete(&self, identity: &Identity) -> Result<(), IdentityStoreError>;

    async fn get_roles(&self, identity: &Identity) -> Result<Vec<String>, IdentityStoreError>;

    async fn add_to_role(
        &self,
        identity: &Identity,
        role: &str,
    ) -> Result<(), IdentityStoreError>;

    async fn get_claims(
        &self,
        identity: &Identity,
    ) -> Result<Vec<DerivedClaim>, IdentityStoreError>;

    async fn add_claim(
        &self,
        identity: &Identity,
        claim: DerivedClaim,
    ) -> Result<(), IdentityStoreError>;

    /// Check local credentials and classify the attempt. An unknown email
    /// yields `InvalidCredentials`, the same as a wrong password.
    async fn password_sign_in(
        &self,
        email: &Email,
        password: &Password,
        persistent: bool,
    ) -> Result<SignInOutcome, IdentityStoreError>;

    async fn find_by_external_login(
        &self,
        provider: &str,
        subject_key: &str,
    ) -> Result<Option<Identity>, IdentityStoreError>;

    async fn add_external_login(
        &self,
        identity: &Identity,
        info: &ExternalLoginInfo,
    ) -> Result<(), IdentityStoreError>;
}

/// Outcome of an atomic read-and-conditionally-delete on the code cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeRedemption {
    /// Submitted code matched; the entry has been removed.
    Redeemed,
    /// A live code exists but the submission did not match. The entry stays
    /// live so the user can retry within the remaining TTL.
    Mismatch,
    /// No live code: never issued, already redeemed, or past its TTL.
    Missing,
}

/// One-time verification codes keyed by normalized email.
///
/// At most one live code per email: `put` overwrites any prior entry.
/// Expiry is checked on read, so an expired-but-unswept entry behaves as
/// absent. `redeem` must compare and delete under a single lock acquisition
/// so two concurrent redemptions cannot both succeed.
#[async_trait]
pub trait VerificationCodeCache: Send + Sync {
    async fn put(&self, email: Email, code: VerificationCode, ttl: Duration);

    async fn try_get(&self, email: &Email) -> Option<VerificationCode>;

    async fn redeem(&self, email: &Email, submitted: &str) -> CodeRedemption;

    /// Unconditional removal; deleting an absent key is not an error.
    async fn delete(&self, email: &Email);
}
