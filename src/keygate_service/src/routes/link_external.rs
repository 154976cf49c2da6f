use axum::{extract::State, response::IntoResponse, Json};
use keygate_application::LinkExternalUseCase;
use keygate_core::{
    Email, ExternalLoginInfo, IdentityStore, MailDispatcher, TokenIssuer, VerificationCodeCache,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::routes::sign_in::UserResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct ExternalSignInRequest {
    pub provider: String,
    #[serde(rename = "subjectKey")]
    pub subject_key: String,
    pub email: String,
    #[serde(rename = "givenName")]
    pub given_name: Option<String>,
    #[serde(rename = "familyName")]
    pub family_name: Option<String>,
    pub picture: Option<String>,
    #[serde(rename = "returnUrl")]
    pub return_url: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct ExternalSignInResponse {
    pub token: String,
    pub user: UserResponse,
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
}

/// Callback target for the external HTTP boundary once it has harvested
/// claims from the provider's token.
#[tracing::instrument(name = "External sign in", skip_all, fields(provider = %request.provider))]
pub async fn link_external<S, C, M, T>(
    State(state): State<AppState<S, C, M, T>>,
    Json(request): Json<ExternalSignInRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: IdentityStore + Clone + 'static,
    C: VerificationCodeCache + Clone + 'static,
    M: MailDispatcher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    if request.provider.trim().is_empty() {
        return Err(ApiError::InvalidInput("Invalid provider".to_string()));
    }

    let info = ExternalLoginInfo {
        provider: request.provider,
        subject_key: request.subject_key,
        email: Email::parse(&request.email)?,
        given_name: request.given_name,
        family_name: request.family_name,
        picture: request.picture,
    };

    let use_case =
        LinkExternalUseCase::new(state.identity_store.clone(), state.token_issuer.clone());
    let signed_in = use_case.execute(info).await?;

    Ok(Json(ExternalSignInResponse {
        token: signed_in.token,
        user: signed_in.user.into(),
        redirect_url: request.return_url.unwrap_or_else(|| "/".to_string()),
    }))
}
