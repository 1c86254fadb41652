//! Validation pipeline run before a post is persisted.
//!
//! Gates run in order and stop at the first failure, so a draft with
//! several problems yields exactly one message:
//!
//! 1. title present and at least [`MIN_TITLE_CHARS`] long
//! 2. content at least [`MIN_CONTENT_CHARS`] long
//! 3. no existing post owns the slug derived from the title
//!
//! The only I/O is the slug lookup in step 3. Nothing is written.
//! Edits run the same gates through [`validate_post_update`].

use std::fmt;

use quill_core::error::{QuillError, QuillResult};
use quill_core::models::post::Post;
use quill_core::repository::PostRepository;
use quill_core::slug::slugify;
use serde::Deserialize;
use tracing::debug;

pub const MIN_TITLE_CHARS: usize = 3;
pub const MIN_CONTENT_CHARS: usize = 10;

pub const TITLE_INVALID: &str = "Title is required and must be at least 3 characters long";
pub const CONTENT_TOO_SHORT: &str = "Content must be at least 10 characters long";
pub const DUPLICATE_TITLE: &str = "A post with this title already exists";

/// Post as submitted by a client, before any checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostDraft {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// A draft that passed every gate, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedPost {
    pub title: String,
    pub slug: String,
    pub content: String,
    pub category: Option<String>,
}

/// Where a draft is in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CheckingTitle,
    CheckingContent,
    CheckingUniqueness,
    Accepted,
    Rejected(&'static str),
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::CheckingTitle => "checking_title",
            Stage::CheckingContent => "checking_content",
            Stage::CheckingUniqueness => "checking_uniqueness",
            Stage::Accepted => "accepted",
            Stage::Rejected(_) => "rejected",
        };
        f.write_str(name)
    }
}

fn trimmed(field: Option<&String>) -> &str {
    field.map(|s| s.trim()).unwrap_or("")
}

/// The synchronous gates (title, content). Returns the normalized
/// title, slug and content on success.
fn check_fields(draft: &PostDraft) -> Result<(String, String, String), &'static str> {
    debug!(stage = %Stage::CheckingTitle, "validating post draft");
    let title = trimmed(draft.title.as_ref());
    let slug = slugify(title);
    if title.chars().count() < MIN_TITLE_CHARS || slug.is_empty() {
        return Err(TITLE_INVALID);
    }

    debug!(stage = %Stage::CheckingContent, "validating post draft");
    let content = trimmed(draft.content.as_ref());
    if content.chars().count() < MIN_CONTENT_CHARS {
        return Err(CONTENT_TOO_SHORT);
    }

    Ok((title.to_string(), slug, content.to_string()))
}

/// Run the full pipeline against `posts`.
///
/// Rejections are [`QuillError::Validation`]; a failing lookup is
/// propagated as-is and never reported as a validation problem.
pub async fn validate_post<P: PostRepository>(
    posts: &P,
    draft: &PostDraft,
) -> QuillResult<ValidatedPost> {
    run(posts, draft, None).await
}

/// Run the pipeline for an edit of `current`.
///
/// The same gates apply, except that the slug only has to be free of
/// *other* posts. Keeping the current slug needs no lookup at all.
pub async fn validate_post_update<P: PostRepository>(
    posts: &P,
    draft: &PostDraft,
    current: &Post,
) -> QuillResult<ValidatedPost> {
    run(posts, draft, Some(current)).await
}

async fn run<P: PostRepository>(
    posts: &P,
    draft: &PostDraft,
    current: Option<&Post>,
) -> QuillResult<ValidatedPost> {
    let (title, slug, content) = check_fields(draft).map_err(|message| {
        debug!(stage = %Stage::Rejected(message), reason = message, "post draft rejected");
        QuillError::validation(message)
    })?;

    let keeps_own_slug = current.is_some_and(|post| post.slug == slug);
    if !keeps_own_slug {
        debug!(stage = %Stage::CheckingUniqueness, %slug, "validating post draft");
        let owner = posts.find_by_slug(&slug).await?;
        if owner.is_some_and(|found| current.is_none_or(|post| post.id != found.id)) {
            debug!(stage = %Stage::Rejected(DUPLICATE_TITLE), %slug, "post draft rejected");
            return Err(QuillError::validation(DUPLICATE_TITLE));
        }
    }

    debug!(stage = %Stage::Accepted, %slug, "post draft accepted");
    let category = draft
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map(str::to_string);

    Ok(ValidatedPost {
        title,
        slug,
        content,
        category,
    })
}
