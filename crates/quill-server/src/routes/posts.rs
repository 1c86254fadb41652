//! Post endpoints.

use actix_web::{HttpResponse, web};
use quill_core::models::post::PostFilter;
use quill_core::repository::Pagination;
use quill_posts::PostDraft;
use serde::Deserialize;

use crate::auth::AuthenticatedUser;
use crate::error::ApiResult;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    search: Option<String>,
    category: Option<String>,
    offset: Option<u64>,
    limit: Option<u64>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl ListQuery {
    fn into_parts(self) -> (PostFilter, Pagination) {
        let defaults = Pagination::default();
        (
            PostFilter {
                search: non_blank(self.search),
                category: non_blank(self.category),
            },
            Pagination {
                offset: self.offset.unwrap_or(defaults.offset),
                limit: self.limit.unwrap_or(defaults.limit),
            },
        )
    }
}

/// `POST /api/posts`: validate and publish a post as the caller.
pub async fn create(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    draft: web::Json<PostDraft>,
) -> ApiResult<HttpResponse> {
    let post = state
        .posts
        .create(caller.0.user_id, draft.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(post))
}

pub async fn list(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> ApiResult<HttpResponse> {
    let (filter, pagination) = query.into_inner().into_parts();
    let page = state.posts.list(filter, pagination).await?;
    Ok(HttpResponse::Ok().json(page))
}

pub async fn get(state: web::Data<AppState>, slug: web::Path<String>) -> ApiResult<HttpResponse> {
    let post = state.posts.get_by_slug(&slug).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// `PUT /api/posts/{slug}`: replace a post. Author only.
pub async fn update(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    slug: web::Path<String>,
    draft: web::Json<PostDraft>,
) -> ApiResult<HttpResponse> {
    let post = state
        .posts
        .update(caller.0.user_id, &slug, draft.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(post))
}

/// `DELETE /api/posts/{slug}`: author only, 204 on success.
pub async fn delete(
    state: web::Data<AppState>,
    caller: AuthenticatedUser,
    slug: web::Path<String>,
) -> ApiResult<HttpResponse> {
    state.posts.delete(caller.0.user_id, &slug).await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_query_uses_default_page() {
        let (filter, pagination) = ListQuery::default().into_parts();
        assert!(filter.search.is_none());
        assert!(filter.category.is_none());
        assert_eq!(pagination.offset, 0);
        assert_eq!(pagination.limit, 20);
    }

    #[test]
    fn blank_filters_are_dropped() {
        let query = ListQuery {
            search: Some("  ".into()),
            category: Some(" tech ".into()),
            ..ListQuery::default()
        };
        let (filter, _) = query.into_parts();
        assert!(filter.search.is_none());
        assert_eq!(filter.category.as_deref(), Some("tech"));
    }
}
