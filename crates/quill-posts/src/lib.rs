//! Quill Posts: the validation pipeline that gates post creation, and
//! the service that persists and serves posts.

pub mod service;
pub mod validation;

pub use service::PostService;
pub use validation::{PostDraft, ValidatedPost, validate_post, validate_post_update};
