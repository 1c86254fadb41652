//! Post domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct CreatePost {
    pub author_id: Uuid,
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: Option<String>,
}

/// Full replacement of a post's editable fields.
#[derive(Debug, Clone)]
pub struct UpdatePost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: Option<String>,
}

/// Optional narrowing for post list queries.
#[derive(Debug, Clone, Default)]
pub struct PostFilter {
    /// Case-insensitive match against title or content.
    pub search: Option<String>,
    pub category: Option<String>,
}
