use uuid::Uuid;

use super::email::Email;
use super::external_login::ExternalLoginInfo;

/// A user's authentication record as handed out by the identity store.
///
/// Roles, claims and external-login links live behind the store and are
/// reached through its port methods; this struct carries only the fields the
/// core reads or mutates directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub id: Uuid,
    pub email: Email,
    pub username: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_confirmed: bool,
}

impl Identity {
    /// A locally registered identity. Starts unconfirmed; activation is
    /// gated behind email verification.
    pub fn new_local(email: Email, first_name: Option<String>, last_name: Option<String>) -> Self {
        let username = email.as_str().to_string();
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            first_name,
            last_name,
            email_confirmed: false,
        }
    }

    /// An identity created from a federated provider's token. The provider
    /// already verified ownership of the address, so it starts confirmed,
    /// with the synthetic `ext_<provider>_<email>` username.
    pub fn new_external(info: &ExternalLoginInfo) -> Self {
        let username = format!(
            "ext_{}_{}",
            info.provider.to_lowercase(),
            info.email.as_str()
        );
        Self {
            id: Uuid::new_v4(),
            email: info.email.clone(),
            username,
            first_name: info.given_name.clone(),
            last_name: info.family_name.clone(),
            email_confirmed: true,
        }
    }

    /// Display name used for the `DisplayName` claim.
    pub fn display_name(&self) -> String {
        self.username.clone()
    }
}
