#![allow(dead_code)]

//! In-memory `PostRepository` that counts calls.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use quill_core::error::{QuillError, QuillResult};
use quill_core::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use quill_core::repository::{PaginatedResult, Pagination, PostRepository};
use tokio::sync::Mutex;
use uuid::Uuid;

#[derive(Default)]
pub struct FakePostRepository {
    pub posts: Mutex<Vec<Post>>,
    pub slug_lookups: AtomicU64,
    pub creates: AtomicU64,
    /// `find_by_slug` fails as if the store were unreachable.
    pub fail_reads: bool,
    /// `find_by_slug` never sees existing posts, simulating a
    /// concurrent submission that slipped past the pre-check.
    pub stale_reads: bool,
    pub slow_read: Option<Duration>,
}

impl FakePostRepository {
    pub async fn with_post(title: &str, slug: &str) -> Self {
        let repo = Self::default();
        repo.insert(title, slug).await;
        repo
    }

    pub async fn insert(&self, title: &str, slug: &str) -> Post {
        self.insert_by(Uuid::new_v4(), title, slug).await
    }

    pub async fn insert_by(&self, author_id: Uuid, title: &str, slug: &str) -> Post {
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_id,
            title: title.into(),
            slug: slug.into(),
            content: "existing body text".into(),
            category: None,
            created_at: now,
            updated_at: now,
        };
        self.posts.lock().await.push(post.clone());
        post
    }

    pub fn lookups(&self) -> u64 {
        self.slug_lookups.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> u64 {
        self.creates.load(Ordering::SeqCst)
    }
}

impl PostRepository for FakePostRepository {
    async fn create(&self, input: CreatePost) -> QuillResult<Post> {
        self.creates.fetch_add(1, Ordering::SeqCst);
        let mut posts = self.posts.lock().await;
        if posts.iter().any(|p| p.slug == input.slug) {
            return Err(QuillError::conflict("Slug already exists"));
        }
        let now = Utc::now();
        let post = Post {
            id: Uuid::new_v4(),
            author_id: input.author_id,
            title: input.title,
            slug: input.slug,
            content: input.content,
            category: input.category,
            created_at: now,
            updated_at: now,
        };
        posts.push(post.clone());
        Ok(post)
    }

    async fn find_by_slug(&self, slug: &str) -> QuillResult<Option<Post>> {
        self.slug_lookups.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.slow_read {
            tokio::time::sleep(delay).await;
        }
        if self.fail_reads {
            return Err(QuillError::Database("connection refused".into()));
        }
        if self.stale_reads {
            return Ok(None);
        }
        Ok(self
            .posts
            .lock()
            .await
            .iter()
            .find(|p| p.slug == slug)
            .cloned())
    }

    async fn update(&self, id: Uuid, input: UpdatePost) -> QuillResult<Post> {
        let mut posts = self.posts.lock().await;
        if posts.iter().any(|p| p.slug == input.slug && p.id != id) {
            return Err(QuillError::conflict("Slug already exists"));
        }
        let post = posts
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| QuillError::not_found("post", id.to_string()))?;
        post.title = input.title;
        post.slug = input.slug;
        post.content = input.content;
        post.category = input.category;
        post.updated_at = Utc::now();
        Ok(post.clone())
    }

    async fn delete(&self, id: Uuid) -> QuillResult<()> {
        let mut posts = self.posts.lock().await;
        let before = posts.len();
        posts.retain(|p| p.id != id);
        if posts.len() == before {
            return Err(QuillError::not_found("post", id.to_string()));
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> QuillResult<PaginatedResult<Post>> {
        let posts = self.posts.lock().await;
        let matching: Vec<Post> = posts
            .iter()
            .rev()
            .filter(|p| {
                filter
                    .category
                    .as_ref()
                    .is_none_or(|c| p.category.as_ref() == Some(c))
            })
            .cloned()
            .collect();
        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(pagination.offset as usize)
            .take(pagination.limit as usize)
            .collect();
        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}
