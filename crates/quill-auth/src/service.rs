//! Authentication service: registration, login and session
//! verification.

use quill_core::error::{QuillError, QuillResult};
use quill_core::models::user::{CreateUser, User};
use quill_core::repository::UserRepository;
use tracing::{debug, info};

use crate::config::AuthConfig;
use crate::error::AuthError;
use crate::password;
use crate::token::{self, SessionClaims};

pub const EMAIL_TAKEN: &str = "Email already exists";
pub const USERNAME_TAKEN: &str = "Username already exists";

/// Input for the registration flow.
#[derive(Debug)]
pub struct RegisterInput {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Input for the login flow.
#[derive(Debug)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Successful registration or login.
#[derive(Debug)]
pub struct AuthOutput {
    /// Signed session token.
    pub token: String,
    pub user: User,
}

/// Authentication service.
///
/// Generic over the user repository so that the auth layer has no
/// dependency on the database crate.
pub struct AuthService<U: UserRepository> {
    user_repo: U,
    config: AuthConfig,
}

impl<U: UserRepository> AuthService<U> {
    pub fn new(user_repo: U, config: AuthConfig) -> Self {
        Self { user_repo, config }
    }

    pub fn config(&self) -> &AuthConfig {
        &self.config
    }

    /// Create an account and issue a session token for it.
    pub async fn register(&self, input: RegisterInput) -> QuillResult<AuthOutput> {
        let username = input.username.trim().to_string();
        let email = normalize_email(&input.email);
        self.check_registration(&username, &email, &input.password)?;

        // 1. Pre-check uniqueness so the caller gets a precise message.
        //    The store's unique indexes still catch concurrent inserts.
        if let Some(existing) = self
            .user_repo
            .find_by_email_or_username(&email, &username)
            .await?
        {
            let message = if existing.email == email {
                EMAIL_TAKEN
            } else {
                USERNAME_TAKEN
            };
            return Err(QuillError::conflict(message));
        }

        // 2. Hash and persist.
        let password_hash = password::hash_password(&input.password, self.config.pepper.as_deref())?;
        let user = self
            .user_repo
            .create(CreateUser {
                username,
                email,
                password_hash,
            })
            .await?;

        // 3. Issue token.
        let token = token::issue_token(&user, &self.config)?;
        info!(user_id = %user.id, "user registered");

        Ok(AuthOutput { token, user })
    }

    /// Authenticate with email + password and issue a session token.
    ///
    /// Unknown email and wrong password are indistinguishable to the
    /// caller.
    pub async fn login(&self, input: LoginInput) -> QuillResult<AuthOutput> {
        let email = normalize_email(&input.email);

        let Some(user) = self.user_repo.find_by_email(&email).await? else {
            // Same Argon2 cost as a wrong password.
            password::verify_decoy(&input.password, self.config.pepper.as_deref());
            debug!("login rejected: unknown email");
            return Err(AuthError::InvalidCredentials.into());
        };

        let valid = password::verify_password(
            &input.password,
            &user.password_hash,
            self.config.pepper.as_deref(),
        )?;
        if !valid {
            debug!(user_id = %user.id, "login rejected: password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = token::issue_token(&user, &self.config)?;
        info!(user_id = %user.id, "user logged in");

        Ok(AuthOutput { token, user })
    }

    /// Verify a session token and return its claims.
    ///
    /// No database lookup is performed.
    pub fn authenticate(&self, token: &str) -> QuillResult<SessionClaims> {
        token::verify_token(token, &self.config).map_err(|e| {
            debug!(error = %e, "session token rejected");
            e.into()
        })
    }

    /// Load the user a verified token belongs to.
    pub async fn current_user(&self, claims: &SessionClaims) -> QuillResult<User> {
        match self.user_repo.get_by_id(claims.user_id).await {
            Ok(user) => Ok(user),
            Err(QuillError::NotFound { .. }) => Err(AuthError::TokenInvalid(format!(
                "user {} no longer exists",
                claims.user_id
            ))
            .into()),
            Err(e) => Err(e),
        }
    }

    fn check_registration(&self, username: &str, email: &str, password: &str) -> QuillResult<()> {
        if username.is_empty() {
            return Err(QuillError::validation("Username is required"));
        }
        if !is_plausible_email(email) {
            return Err(QuillError::validation("A valid email is required"));
        }
        if password.chars().count() < self.config.min_password_length {
            return Err(QuillError::validation(format!(
                "Password must be at least {} characters long",
                self.config.min_password_length
            )));
        }
        Ok(())
    }
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}
