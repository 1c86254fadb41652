//! Route table.

mod auth;
mod health;
mod posts;

use actix_web::web;
use quill_core::error::QuillError;

use crate::error::ApiError;

/// Register every route plus the body and query parsing rules.
///
/// Malformed JSON or query strings become ordinary 400 responses with
/// the `{"error": ...}` body.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        ApiError(QuillError::validation(format!("Invalid request body: {err}"))).into()
    }))
    .app_data(web::QueryConfig::default().error_handler(|err, _req| {
        ApiError(QuillError::validation(format!("Invalid query string: {err}"))).into()
    }))
    .route("/health", web::get().to(health::health))
    .service(
        web::scope("/api")
            .service(
                web::scope("/auth")
                    .route("/register", web::post().to(auth::register))
                    .route("/login", web::post().to(auth::login))
                    .route("/me", web::get().to(auth::me)),
            )
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create))
                    .route("", web::get().to(posts::list))
                    .route("/{slug}", web::get().to(posts::get))
                    .route("/{slug}", web::put().to(posts::update))
                    .route("/{slug}", web::delete().to(posts::delete)),
            ),
    );
}
