//! Registration, login and the current-user endpoint.

use actix_web::{HttpResponse, web};
use quill_auth::{AuthOutput, LoginInput, RegisterInput};
use quill_core::models::user::UserProfile;
use serde::{Deserialize, Serialize};

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::state::AppState;

// Missing fields deserialize as empty strings so that the service
// reports them with its own validation messages.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    username: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    token: String,
    user: UserProfile,
}

impl From<AuthOutput> for AuthResponse {
    fn from(output: AuthOutput) -> Self {
        Self {
            user: UserProfile::from(&output.user),
            token: output.token,
        }
    }
}

pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let output = state
        .auth
        .register(RegisterInput {
            username: body.username,
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(HttpResponse::Created().json(AuthResponse::from(output)))
}

pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let body = body.into_inner();
    let output = state
        .auth
        .login(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(HttpResponse::Ok().json(AuthResponse::from(output)))
}

pub async fn me(state: web::Data<AppState>, caller: AuthenticatedUser) -> ApiResult<HttpResponse> {
    let user = state.auth.current_user(&caller.0).await?;
    Ok(HttpResponse::Ok().json(UserProfile::from(&user)))
}
