use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};

use keygate_core::{TokenClaims, TokenIssueError, TokenIssuer};

use crate::config::settings::JwtSettings;

/// Bearer-token issuer: HMAC-SHA256 JWTs stamped with the configured
/// issuer, audience and expiry.
#[derive(Clone)]
pub struct JwtTokenIssuer {
    settings: JwtSettings,
}

impl JwtTokenIssuer {
    pub fn new(settings: JwtSettings) -> Self {
        Self { settings }
    }
}

impl TokenIssuer for JwtTokenIssuer {
    fn issue(&self, claims: &TokenClaims) -> Result<String, TokenIssueError> {
        let expires_at = Utc::now() + chrono::Duration::minutes(self.settings.expire_minutes);

        let jwt_claims = JwtClaims {
            sub: claims.subject.to_string(),
            email: claims.email.as_str().to_string(),
            name: claims.display_name.clone(),
            role: claims.display_role.clone(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
            exp: expires_at.timestamp(),
        };

        encode(
            &Header::default(),
            &jwt_claims,
            &EncodingKey::from_secret(self.settings.secret.expose_secret().as_bytes()),
        )
        .map_err(|e| TokenIssueError::Signing(e.to_string()))
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JwtClaims {
    pub sub: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub iss: String,
    pub aud: String,
    pub exp: i64,
}
