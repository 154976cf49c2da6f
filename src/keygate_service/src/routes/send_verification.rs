use axum::{extract::State, response::IntoResponse, Json};
use keygate_application::VerificationUseCase;
use keygate_core::{Email, IdentityStore, MailDispatcher, TokenIssuer, VerificationCodeCache};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::AppState;

#[derive(Deserialize)]
pub struct SendVerificationRequest {
    pub email: String,
}

#[derive(Serialize, Deserialize)]
pub struct VerificationResponse {
    pub message: String,
}

#[tracing::instrument(name = "Send verification code", skip_all)]
pub async fn send_verification<S, C, M, T>(
    State(state): State<AppState<S, C, M, T>>,
    Json(request): Json<SendVerificationRequest>,
) -> Result<impl IntoResponse, ApiError>
where
    S: IdentityStore + Clone + 'static,
    C: VerificationCodeCache + Clone + 'static,
    M: MailDispatcher + Clone + 'static,
    T: TokenIssuer + Clone + 'static,
{
    let email = Email::parse(&request.email)?;

    let use_case = VerificationUseCase::new(
        state.code_cache.clone(),
        state.mail_dispatcher.clone(),
        state.verify_page_url.clone(),
    );
    use_case.send_code(&email).await?;

    Ok(Json(VerificationResponse {
        message: "Verification email sent successfully.".to_string(),
    }))
}
