use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use keygate_application::{
    LinkExternalError, RedeemCodeError, SendCodeError, SignInError, SignUpError,
};
use keygate_core::{EmailError, PasswordError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    AuthenticationError(String),

    #[error("{0}")]
    InvalidVerificationCode(String),

    #[error("{0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_) | ApiError::InvalidVerificationCode(_) => {
                (StatusCode::BAD_REQUEST, self.to_string())
            }

            ApiError::Conflict(_) => (StatusCode::CONFLICT, self.to_string()),

            ApiError::AuthenticationError(_) => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::UnexpectedError(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<SignUpError> for ApiError {
    fn from(error: SignUpError) -> Self {
        match error {
            SignUpError::AlreadyExists => ApiError::Conflict(error.to_string()),
            SignUpError::Store(_) | SignUpError::Verification(_) | SignUpError::Token(_) => {
                ApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

impl From<SignInError> for ApiError {
    fn from(error: SignInError) -> Self {
        match error {
            SignInError::InvalidCredentials
            | SignInError::LockedOut
            | SignInError::NotAllowed
            | SignInError::RequiresTwoFactor => ApiError::AuthenticationError(error.to_string()),
            SignInError::Store(_) | SignInError::Token(_) => {
                ApiError::UnexpectedError(error.to_string())
            }
        }
    }
}

impl From<LinkExternalError> for ApiError {
    fn from(error: LinkExternalError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<SendCodeError> for ApiError {
    fn from(error: SendCodeError) -> Self {
        ApiError::UnexpectedError(error.to_string())
    }
}

impl From<RedeemCodeError> for ApiError {
    fn from(error: RedeemCodeError) -> Self {
        ApiError::InvalidVerificationCode(error.to_string())
    }
}
