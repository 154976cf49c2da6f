use axum::{extract::State, response::IntoResponse, Json};
use keygate_application::{SignInUseCase, UserSummary};
use keygate_core::{
    Email, IdentityStore, MailDispatcher, Password, TokenIssuer, VerificationCodeCache,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct SignInRequest {
    pub email: String,
    pub password: Secret<String>,
    #[serde(rename = "isPersistent", default)]
    pub is_persistent: bool,
    #[serde(rename = "returnUrl")]
    pub return_url: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SignInResponse {
    pub message: String,
    pub token: String,
    pub user: UserResponse,
    #[serde(rename = "redirectUrl")]
    pub redirect_url: String,
}

#[derive(Serialize, Deserialize)]
pub struct UserResponse {
    pub id: Uuid,
    pub email: String,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

impl From<UserSummary> for UserResponse {
    fn from(user: UserSummary) -> Self {
        Self {
            id: user.id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
        }
    }
}

#[tracing::instrument(name = "Sign in", skip_all)]
pub async fn sign_in<S, C, M, T>(
    State(state): State<AppState<S, C, M, T>>,
    Json(request): Json<SignInRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: IdentityStore + Clone + 'static,
    C: VerificationCodeCache + Clone + 'static,
    M: MailDispatcher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let email = Email::parse(&request.email)?;
    let password = Password::try_from(request.password)?;

    let use_case = SignInUseCase::new(state.identity_store.clone(), state.token_issuer.clone());
    let signed_in = use_case
        .execute(email, password, request.is_persistent)
        .await?;

    Ok(Json(SignInResponse {
        message: "Signed in successfully.".to_string(),
        token: signed_in.token,
        user: signed_in.user.into(),
        redirect_url: request.return_url.unwrap_or_else(|| "/".to_string()),
    }))
}
