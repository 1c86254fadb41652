//! Authentication error types.

use quill_core::error::QuillError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token has expired")]
    TokenExpired,

    #[error("invalid token: {0}")]
    TokenInvalid(String),

    #[error("cryptography error: {0}")]
    Crypto(String),
}

impl From<AuthError> for QuillError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials | AuthError::TokenExpired => {
                QuillError::unauthorized(err.to_string())
            }
            // The decoder's reason stays in the logs, not in the response.
            AuthError::TokenInvalid(_) => QuillError::unauthorized("Invalid token"),
            AuthError::Crypto(msg) => QuillError::Crypto(msg),
        }
    }
}
