use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use keygate_application::{SignUpUseCase, VerificationUseCase};
use keygate_core::{
    Email, IdentityStore, MailDispatcher, Password, TokenIssuer, VerificationCodeCache,
};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct SignUpRequest {
    pub email: String,
    pub password: Secret<String>,
    #[serde(rename = "firstName")]
    pub first_name: Option<String>,
    #[serde(rename = "lastName")]
    pub last_name: Option<String>,
}

#[derive(Serialize, Deserialize)]
pub struct SignUpResponse {
    pub message: String,
    pub token: String,
}

#[tracing::instrument(name = "Sign up", skip_all)]
pub async fn sign_up<S, C, M, T>(
    State(state): State<AppState<S, C, M, T>>,
    Json(request): Json<SignUpRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: IdentityStore + Clone + 'static,
    C: VerificationCodeCache + Clone + 'static,
    M: MailDispatcher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let email = Email::parse(&request.email)?;
    let password = Password::try_from(request.password)?;

    let verification = VerificationUseCase::new(
        state.code_cache.clone(),
        state.mail_dispatcher.clone(),
        state.verify_page_url.clone(),
    );
    let use_case = SignUpUseCase::new(
        state.identity_store.clone(),
        verification,
        state.token_issuer.clone(),
    );

    let signed_up = use_case
        .execute(email, password, request.first_name, request.last_name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SignUpResponse {
            message: "User signed up successfully.".to_string(),
            token: signed_up.token,
        }),
    ))
}
