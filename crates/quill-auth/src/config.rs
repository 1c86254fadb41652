//! Authentication configuration.

/// Seven days.
pub const DEFAULT_TOKEN_LIFETIME_SECS: u64 = 604_800;

/// One year. Longer lifetimes are rejected at startup.
pub const MAX_TOKEN_LIFETIME_SECS: u64 = 31_536_000;

/// Configuration for the authentication service.
///
/// Built once at process start and shared read-only afterwards.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// HMAC secret for signing session tokens (HS256).
    pub jwt_secret: String,
    /// Session token lifetime in seconds (default: 604_800 = 7 days).
    pub token_lifetime_secs: u64,
    /// JWT issuer (`iss` claim).
    pub jwt_issuer: String,
    /// Optional pepper prepended to passwords before Argon2id hashing.
    pub pepper: Option<String>,
    /// Minimum password length accepted at registration.
    pub min_password_length: usize,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret: String::new(),
            token_lifetime_secs: DEFAULT_TOKEN_LIFETIME_SECS,
            jwt_issuer: "quill".into(),
            pepper: None,
            min_password_length: 6,
        }
    }
}
