use axum::{http::StatusCode, response::IntoResponse};
use serde_json::json;
use thiserror::Error;

pub type AppResult<T> = Result<T, AppError>;

/// Application error type.
///
/// Covers the full error taxonomy of the service: authentication failures,
/// payload validation failures, and storage faults. Duplicate inserts are
/// deliberately NOT represented here; a duplicate is an expected outcome and
/// flows through [`crate::store::InsertOutcome`] instead.
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Authentication =====
    #[error("authentication error: {0}")]
    Auth(String),

    // ===== Validation =====
    #[error("validation error: {0}")]
    Validation(String),

    // ===== Database & Storage =====
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    // ===== Internal =====
    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// User-facing message, without sensitive details.
    ///
    /// Authentication failures always render the same text whether the
    /// signature was missing or wrong, so the response never reveals which.
    pub fn user_message(&self) -> String {
        match self {
            AppError::Auth(_) => "invalid signature".to_string(),
            AppError::Validation(msg) => msg.clone(),
            AppError::Database(_) => "storage unavailable".to_string(),
            AppError::Internal(_) => "internal server error".to_string(),
        }
    }

    /// Stable error code for programmatic handling.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Auth(_) => "AUTH_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Database(_) => "STORE_UNAVAILABLE",
            AppError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    /// Log this error with a level appropriate to its class.
    pub fn log(&self) {
        let status = self.status_code();
        let code = self.error_code();

        if status.is_server_error() {
            tracing::error!(
                error = %self,
                error_code = %code,
                status = %status.as_u16(),
                "server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(
                error = %self,
                error_code = %code,
                "authentication failed"
            );
        } else {
            tracing::debug!(
                error = %self,
                error_code = %code,
                "client error occurred"
            );
        }
    }

    /// Create an authentication error.
    pub fn auth(msg: impl Into<String>) -> Self {
        AppError::Auth(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }
}

impl From<crate::message::ValidationError> for AppError {
    fn from(err: crate::message::ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        self.log();

        let status = self.status_code();
        let body = json!({
            "detail": self.user_message(),
            "error_code": self.error_code(),
        });

        (status, axum::Json(body)).into_response()
    }
}
