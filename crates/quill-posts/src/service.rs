//! Post service: validated creation, author-only edits and read access.

use quill_core::error::{QuillError, QuillResult};
use quill_core::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use quill_core::repository::{PaginatedResult, Pagination, PostRepository};
use tracing::{debug, info};
use uuid::Uuid;

use crate::validation::{self, DUPLICATE_TITLE, PostDraft};

pub const NOT_AUTHOR: &str = "You can only modify your own posts";

fn duplicate_slug_as_validation(err: QuillError) -> QuillError {
    match err {
        QuillError::Conflict { .. } => QuillError::validation(DUPLICATE_TITLE),
        other => other,
    }
}

/// Post service.
///
/// Generic over the post repository so that it has no dependency on
/// the database crate.
pub struct PostService<P: PostRepository> {
    post_repo: P,
}

impl<P: PostRepository> PostService<P> {
    pub fn new(post_repo: P) -> Self {
        Self { post_repo }
    }

    /// Validate `draft` and persist it as a post by `author_id`.
    ///
    /// The slug check in validation is only a pre-check: two identical
    /// submissions can both pass it. The loser is stopped by the
    /// store's unique slug index and gets the same duplicate message.
    pub async fn create(&self, author_id: Uuid, draft: PostDraft) -> QuillResult<Post> {
        let valid = validation::validate_post(&self.post_repo, &draft).await?;

        let post = self
            .post_repo
            .create(CreatePost {
                author_id,
                title: valid.title,
                slug: valid.slug,
                content: valid.content,
                category: valid.category,
            })
            .await
            .map_err(duplicate_slug_as_validation)?;

        info!(post_id = %post.id, %author_id, slug = %post.slug, "post created");
        Ok(post)
    }

    /// Replace the post at `slug` with `draft`. Only its author may.
    ///
    /// The draft goes through the same gates as on creation; the slug
    /// follows the new title and must not belong to another post.
    pub async fn update(&self, caller_id: Uuid, slug: &str, draft: PostDraft) -> QuillResult<Post> {
        let current = self.owned_post(caller_id, slug).await?;
        let valid = validation::validate_post_update(&self.post_repo, &draft, &current).await?;

        let post = self
            .post_repo
            .update(
                current.id,
                UpdatePost {
                    title: valid.title,
                    slug: valid.slug,
                    content: valid.content,
                    category: valid.category,
                },
            )
            .await
            .map_err(duplicate_slug_as_validation)?;

        info!(post_id = %post.id, old_slug = %slug, slug = %post.slug, "post updated");
        Ok(post)
    }

    /// Delete the post at `slug`. Only its author may.
    pub async fn delete(&self, caller_id: Uuid, slug: &str) -> QuillResult<()> {
        let current = self.owned_post(caller_id, slug).await?;
        self.post_repo.delete(current.id).await?;
        info!(post_id = %current.id, %slug, "post deleted");
        Ok(())
    }

    async fn owned_post(&self, caller_id: Uuid, slug: &str) -> QuillResult<Post> {
        let post = self.get_by_slug(slug).await?;
        if post.author_id != caller_id {
            debug!(post_id = %post.id, %caller_id, "edit rejected: not the author");
            return Err(QuillError::forbidden(NOT_AUTHOR));
        }
        Ok(post)
    }

    pub async fn get_by_slug(&self, slug: &str) -> QuillResult<Post> {
        self.post_repo
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| QuillError::not_found("post", slug))
    }

    pub async fn list(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> QuillResult<PaginatedResult<Post>> {
        self.post_repo.list(filter, pagination).await
    }
}
