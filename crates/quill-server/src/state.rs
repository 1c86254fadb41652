//! Shared application state injected into handlers.

use quill_auth::{AuthConfig, AuthService};
use quill_db::{DbManager, SurrealPostRepository, SurrealUserRepository};
use quill_posts::PostService;
use surrealdb::engine::any::Any;

/// Services shared by every worker behind `web::Data`.
pub struct AppState {
    pub auth: AuthService<SurrealUserRepository<Any>>,
    pub posts: PostService<SurrealPostRepository<Any>>,
}

impl AppState {
    pub fn new(db: &DbManager, auth_config: AuthConfig) -> Self {
        let client = db.client().clone();
        Self {
            auth: AuthService::new(SurrealUserRepository::new(client.clone()), auth_config),
            posts: PostService::new(SurrealPostRepository::new(client)),
        }
    }
}
