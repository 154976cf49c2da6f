use uuid::Uuid;

use super::email::Email;

/// Claims handed to the token issuer. Signing, expiry and issuer/audience
/// stamping happen in the issuing adapter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub subject: Uuid,
    pub email: Email,
    pub display_name: Option<String>,
    pub display_role: Option<String>,
}

impl TokenClaims {
    pub fn new(subject: Uuid, email: Email) -> Self {
        Self {
            subject,
            email,
            display_name: None,
            display_role: None,
        }
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    pub fn with_display_role(mut self, display_role: impl Into<String>) -> Self {
        self.display_role = Some(display_role.into());
        self
    }
}
