//! Application configuration.
//!
//! Loaded once at startup from an optional `quill.toml` in the working
//! directory, then overridden by `QUILL__`-prefixed environment
//! variables (`QUILL__AUTH__JWT_SECRET`, `QUILL__SERVER__PORT`, ...).

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use quill_auth::AuthConfig;
use quill_auth::config::{DEFAULT_TOKEN_LIFETIME_SECS, MAX_TOKEN_LIFETIME_SECS};
use quill_db::DbConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    pub auth: AuthSettings,
    #[serde(default)]
    pub log: LogSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub bind_address: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".into(),
            port: 5000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseSettings {
    pub url: String,
    pub namespace: String,
    pub database: String,
    pub username: String,
    pub password: String,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        let db = DbConfig::default();
        Self {
            url: db.url,
            namespace: db.namespace,
            database: db.database,
            username: db.username,
            password: db.password,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    pub jwt_secret: String,
    #[serde(default = "default_token_lifetime")]
    pub token_lifetime_secs: u64,
    #[serde(default)]
    pub pepper: Option<String>,
    #[serde(default = "default_min_password_length")]
    pub min_password_length: usize,
}

fn default_token_lifetime() -> u64 {
    DEFAULT_TOKEN_LIFETIME_SECS
}

fn default_min_password_length() -> usize {
    AuthConfig::default().min_password_length
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Json,
    Pretty,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    pub format: LogFormat,
    /// Requests slower than this are logged again at `warn`.
    pub slow_request_ms: u64,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            format: LogFormat::Json,
            slow_request_ms: 1000,
        }
    }
}

impl AppConfig {
    /// Load from `quill.toml` (optional) and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_builder(
            Config::builder()
                .add_source(File::with_name("quill").required(false))
                .add_source(
                    Environment::with_prefix("QUILL")
                        .prefix_separator("__")
                        .separator("__")
                        .try_parsing(true),
                ),
        )
    }

    pub fn from_builder(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.jwt_secret.trim().is_empty() {
            return Err(ConfigError::Message(
                "auth.jwt_secret must be set (QUILL__AUTH__JWT_SECRET)".into(),
            ));
        }
        if !(1..=MAX_TOKEN_LIFETIME_SECS).contains(&self.auth.token_lifetime_secs) {
            return Err(ConfigError::Message(format!(
                "auth.token_lifetime_secs must be between 1 and {MAX_TOKEN_LIFETIME_SECS}"
            )));
        }
        if self.server.port == 0 {
            return Err(ConfigError::Message("server.port cannot be 0".into()));
        }
        Ok(())
    }

    pub fn auth_config(&self) -> AuthConfig {
        AuthConfig {
            jwt_secret: self.auth.jwt_secret.clone(),
            token_lifetime_secs: self.auth.token_lifetime_secs,
            pepper: self.auth.pepper.clone(),
            min_password_length: self.auth.min_password_length,
            ..AuthConfig::default()
        }
    }

    pub fn db_config(&self) -> DbConfig {
        DbConfig {
            url: self.database.url.clone(),
            namespace: self.database.namespace.clone(),
            database: self.database.database.clone(),
            username: self.database.username.clone(),
            password: self.database.password.clone(),
        }
    }
}
