//! Bearer-token extractor for protected routes.

use actix_web::dev::Payload;
use actix_web::http::header::AUTHORIZATION;
use actix_web::{FromRequest, HttpMessage, HttpRequest, web};
use futures_util::future::{Ready, ready};
use quill_auth::SessionClaims;
use quill_core::error::QuillError;
use uuid::Uuid;

use crate::error::ApiError;
use crate::state::AppState;

/// Id of the authenticated caller, stored in request extensions so the
/// request log can report it.
#[derive(Debug, Clone, Copy)]
pub struct RequestUserId(pub Uuid);

/// Verified session claims of the caller.
///
/// Rejects the request with 401 when the `Authorization` header is
/// missing, is not a bearer token, or the token does not verify.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub SessionClaims);

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, ApiError> {
    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| QuillError::Internal("application state not configured".into()))?;

    let token = bearer_token(req).ok_or_else(|| QuillError::unauthorized("Authentication required"))?;
    let claims = state.auth.authenticate(token)?;

    req.extensions_mut().insert(RequestUserId(claims.user_id));
    Ok(AuthenticatedUser(claims))
}

impl FromRequest for AuthenticatedUser {
    type Error = ApiError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    #[test]
    fn bearer_scheme_is_case_insensitive() {
        let req = TestRequest::default()
            .insert_header((AUTHORIZATION, "bearer abc.def.ghi"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc.def.ghi"));
    }

    #[test]
    fn other_schemes_and_empty_tokens_are_ignored() {
        for value in ["Basic dXNlcjpwYXNz", "Bearer ", "Bearer", "abc.def.ghi"] {
            let req = TestRequest::default()
                .insert_header((AUTHORIZATION, value))
                .to_http_request();
            assert_eq!(bearer_token(&req), None, "header {value:?}");
        }
    }

    #[test]
    fn missing_header_yields_none() {
        let req = TestRequest::default().to_http_request();
        assert_eq!(bearer_token(&req), None);
    }
}
