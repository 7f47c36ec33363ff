use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum AccountError {
    #[error("Account not found: {0}")]
    NotFound(Uuid),

    #[error("Account with email '{0}' not found")]
    EmailNotFound(String),

    #[error("Account with email '{0}' already exists")]
    DuplicateEmail(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Access denied")]
    Forbidden,

    #[error("Password hashing error: {0}")]
    PasswordHash(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type AccountResult<T> = Result<T, AccountError>;

/// Convert AccountError to AppError for standardized error responses
impl From<AccountError> for AppError {
    fn from(err: AccountError) -> Self {
        match err {
            AccountError::NotFound(id) => AppError::NotFound(format!("Account {} not found", id)),
            // The email is part of the message so callers can tell which
            // lookup failed.
            AccountError::EmailNotFound(email) => {
                AppError::NotFound(format!("Account with email '{}' not found", email))
            }
            AccountError::DuplicateEmail(email) => {
                AppError::Conflict(format!("Account with email '{}' already exists", email))
            }
            AccountError::InvalidCredentials => {
                AppError::Unauthorized("Invalid email or password".to_string())
            }
            AccountError::Validation(msg) => AppError::BadRequest(msg),
            AccountError::Unauthorized => AppError::Unauthorized("Unauthorized".to_string()),
            AccountError::Forbidden => AppError::Forbidden("Access denied".to_string()),
            AccountError::PasswordHash(msg) => {
                tracing::error!("Password hash error: {}", msg);
                AppError::InternalServerError("An internal error occurred".to_string())
            }
            AccountError::Internal(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for AccountError {
    fn into_response(self) -> Response {
        // Convert to AppError for standardized error response format
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}
