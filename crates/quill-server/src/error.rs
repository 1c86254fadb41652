//! HTTP mapping for domain errors, and startup failures.
//!
//! Every error response has the body `{"error": "<message>"}`. Server
//! faults are logged and redacted to a generic message.

use std::fmt;

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use quill_core::error::QuillError;
use serde::Serialize;
use tracing::error;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// A [`QuillError`] on its way out through the HTTP boundary.
#[derive(Debug)]
pub struct ApiError(pub QuillError);

impl From<QuillError> for ApiError {
    fn from(err: QuillError) -> Self {
        Self(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn status_for(err: &QuillError) -> StatusCode {
    match err {
        QuillError::Validation { .. } | QuillError::Conflict { .. } => StatusCode::BAD_REQUEST,
        QuillError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
        QuillError::Forbidden { .. } => StatusCode::FORBIDDEN,
        QuillError::NotFound { .. } => StatusCode::NOT_FOUND,
        QuillError::Database(_) | QuillError::Crypto(_) | QuillError::Internal(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        status_for(&self.0)
    }

    fn error_response(&self) -> HttpResponse {
        let message = if self.0.is_internal() {
            error!(error = %self.0, "request failed");
            "Internal server error".to_string()
        } else {
            self.0.to_string()
        };

        HttpResponse::build(self.status_code()).json(ErrorBody { error: message })
    }
}

/// Reasons the server can fail to start.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("logging setup failed: {0}")]
    Logging(String),

    #[error("database error: {0}")]
    Database(#[from] quill_db::DbError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
