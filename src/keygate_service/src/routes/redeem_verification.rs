use axum::{extract::State, response::IntoResponse, Json};
use keygate_application::VerificationUseCase;
use keygate_core::{Email, IdentityStore, MailDispatcher, TokenIssuer, VerificationCodeCache};
use serde::Deserialize;

use crate::error::ApiError;
use crate::routes::send_verification::VerificationResponse;
use crate::AppState;

#[derive(Deserialize)]
pub struct RedeemVerificationRequest {
    pub email: String,
    pub code: String,
}

#[tracing::instrument(name = "Redeem verification code", skip_all)]
pub async fn redeem_verification<S, C, M, T>(
    State(state): State<AppState<S, C, M, T>>,
    Json(request): Json<RedeemVerificationRequest>,
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
    use_case.redeem(&email, &request.code).await?;

    Ok(Json(VerificationResponse {
        message: "Verification successful.".to_string(),
    }))
}
