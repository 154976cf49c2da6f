use config::{Config, ConfigError, Environment, File};
use secrecy::Secret;
use serde::Deserialize;

use super::constants::prod;

/// Service configuration, loaded from an optional `config.json` next to the
/// binary and overridden by `KEYGATE__`-prefixed environment variables
/// (`KEYGATE__JWT__SECRET`, `KEYGATE__MAIL__AUTH_TOKEN`, ...).
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub app: AppSettings,
    pub jwt: JwtSettings,
    pub mail: MailSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    pub address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct JwtSettings {
    pub secret: Secret<String>,
    pub issuer: String,
    pub audience: String,
    pub expire_minutes: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MailSettings {
    pub base_url: String,
    pub sender: String,
    pub auth_token: Secret<String>,
    pub timeout_ms: u64,
    /// Base URL of the page the verification email links to.
    pub verify_page_url: String,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("app.address", prod::APP_ADDRESS)?
            .set_default("jwt.issuer", "keygate")?
            .set_default("jwt.audience", "keygate-clients")?
            .set_default("jwt.expire_minutes", 60)?
            .set_default("mail.base_url", prod::mail::BASE_URL)?
            .set_default("mail.timeout_ms", prod::mail::TIMEOUT.as_millis() as u64)?
            .add_source(File::with_name("config").required(false))
            .add_source(Environment::with_prefix("KEYGATE").separator("__"))
            .build()?
            .try_deserialize()
    }
}
