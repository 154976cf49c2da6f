use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{email::Email, token_claims::TokenClaims};

#[derive(Debug, Error, PartialEq)]
pub enum MailDispatchError {
    #[error("Mail dispatch failed: {0}")]
    Dispatch(String),
}

/// Outbound mail, fire-and-confirm: `send` resolves once the dispatcher
/// accepted the message, not when it was delivered.
#[async_trait]
pub trait MailDispatcher: Send + Sync {
    async fn send(
        &self,
        to: &Email,
        subject: &str,
        text_body: &str,
        html_body: &str,
    ) -> Result<(), MailDispatchError>;
}

#[derive(Debug, Error, PartialEq)]
pub enum TokenIssueError {
    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Bearer-token issuance. Signing key, issuer, audience and expiry are
/// configured on the implementing adapter.
pub trait TokenIssuer: Send + Sync {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenIssueError>;
}
