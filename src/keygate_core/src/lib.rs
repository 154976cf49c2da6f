pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    claim::{ClaimKind, DerivedClaim},
    email::{Email, EmailError},
    external_login::ExternalLoginInfo,
    identity::Identity,
    password::{Password, PasswordError},
    sign_in_outcome::SignInOutcome,
    token_claims::TokenClaims,
    verification_code::{VerificationCode, VerificationCodeError},
};

pub use ports::{
    repositories::{CodeRedemption, IdentityStore, IdentityStoreError, VerificationCodeCache},
    services::{MailDispatchError, MailDispatcher, TokenIssueError, TokenIssuer},
};
