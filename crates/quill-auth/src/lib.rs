//! Quill Auth: password hashing, session token issuance/verification,
//! and the registration/login service.

pub mod config;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

pub use config::AuthConfig;
pub use error::AuthError;
pub use service::{AuthOutput, AuthService, LoginInput, RegisterInput};
pub use token::SessionClaims;
