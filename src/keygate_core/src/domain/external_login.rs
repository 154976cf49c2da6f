use super::email::Email;

/// Claims harvested from a federated provider's token at account-linking
/// time. Not persisted as-is; the store keeps only (provider, subject_key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalLoginInfo {
    pub provider: String,
    pub subject_key: String,
    pub email: Email,
    pub given_name: Option<String>,
    pub family_name: Option<String>,
    pub picture: Option<String>,
}
