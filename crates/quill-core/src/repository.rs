//! Repository trait definitions for data access abstraction.
//!
//! All repository operations are async. Lookups that may legitimately
//! find nothing return `Ok(None)`; `get_*` methods return
//! [`QuillError::NotFound`](crate::error::QuillError::NotFound) instead.

use serde::Serialize;
use uuid::Uuid;

use crate::error::QuillResult;
use crate::models::{
    post::{CreatePost, Post, PostFilter, UpdatePost},
    user::{CreateUser, User},
};

/// Largest page a list query will return.
pub const MAX_PAGE_SIZE: u64 = 100;

/// Pagination parameters for list queries.
#[derive(Debug, Clone)]
pub struct Pagination {
    pub offset: u64,
    pub limit: u64,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            offset: 0,
            limit: 20,
        }
    }
}

impl Pagination {
    /// Clamp `limit` into `1..=MAX_PAGE_SIZE`.
    pub fn clamped(self) -> Self {
        Self {
            offset: self.offset,
            limit: self.limit.clamp(1, MAX_PAGE_SIZE),
        }
    }
}

/// A paginated result set.
#[derive(Debug, Clone, Serialize)]
pub struct PaginatedResult<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub offset: u64,
    pub limit: u64,
}

pub trait UserRepository: Send + Sync {
    /// Insert a new user.
    ///
    /// Fails with [`QuillError::Conflict`](crate::error::QuillError::Conflict)
    /// when the store's unique index on email or username rejects it.
    fn create(&self, input: CreateUser) -> impl Future<Output = QuillResult<User>> + Send;
    fn get_by_id(&self, id: Uuid) -> impl Future<Output = QuillResult<User>> + Send;
    fn find_by_email(&self, email: &str)
    -> impl Future<Output = QuillResult<Option<User>>> + Send;
    /// Return any user whose email equals `email` or whose username
    /// equals `username`.
    fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> impl Future<Output = QuillResult<Option<User>>> + Send;
}

pub trait PostRepository: Send + Sync {
    /// Insert a new post.
    ///
    /// Fails with [`QuillError::Conflict`](crate::error::QuillError::Conflict)
    /// when another post already owns the slug.
    fn create(&self, input: CreatePost) -> impl Future<Output = QuillResult<Post>> + Send;
    fn find_by_slug(&self, slug: &str) -> impl Future<Output = QuillResult<Option<Post>>> + Send;
    /// Replace the editable fields of post `id` and bump `updated_at`.
    ///
    /// Fails with `NotFound` for an unknown id and with `Conflict` when
    /// another post already owns the new slug.
    fn update(&self, id: Uuid, input: UpdatePost)
    -> impl Future<Output = QuillResult<Post>> + Send;
    /// Remove post `id`. Fails with `NotFound` for an unknown id.
    fn delete(&self, id: Uuid) -> impl Future<Output = QuillResult<()>> + Send;
    /// Newest first.
    fn list(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> impl Future<Output = QuillResult<PaginatedResult<Post>>> + Send;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_limit_is_clamped() {
        let p = Pagination {
            offset: 5,
            limit: 10_000,
        }
        .clamped();
        assert_eq!(p.offset, 5);
        assert_eq!(p.limit, MAX_PAGE_SIZE);

        let p = Pagination {
            offset: 0,
            limit: 0,
        }
        .clamped();
        assert_eq!(p.limit, 1);
    }
}
