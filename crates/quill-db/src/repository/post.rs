//! SurrealDB implementation of [`PostRepository`].

use chrono::{DateTime, Utc};
use quill_core::error::QuillResult;
use quill_core::models::post::{CreatePost, Post, PostFilter, UpdatePost};
use quill_core::repository::{PaginatedResult, Pagination, PostRepository};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;

use super::parse_uuid;
use crate::error::DbError;

#[derive(Debug, SurrealValue)]
struct PostRow {
    author_id: String,
    title: String,
    slug: String,
    content: String,
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

#[derive(Debug, SurrealValue)]
struct PostRowWithId {
    record_id: String,
    author_id: String,
    title: String,
    slug: String,
    content: String,
    category: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl PostRow {
    fn into_post(self, id: Uuid) -> Result<Post, DbError> {
        Ok(Post {
            id,
            author_id: parse_uuid(&self.author_id, "author")?,
            title: self.title,
            slug: self.slug,
            content: self.content,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl PostRowWithId {
    fn try_into_post(self) -> Result<Post, DbError> {
        Ok(Post {
            id: parse_uuid(&self.record_id, "post")?,
            author_id: parse_uuid(&self.author_id, "author")?,
            title: self.title,
            slug: self.slug,
            content: self.content,
            category: self.category,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// Row struct for count queries.
#[derive(Debug, SurrealValue)]
struct CountRow {
    total: u64,
}

/// WHERE clause and bindings for a [`PostFilter`].
fn filter_clause(filter: PostFilter) -> (String, Vec<(&'static str, String)>) {
    let mut conditions = Vec::new();
    let mut binds = Vec::new();

    if let Some(category) = filter.category {
        conditions.push("category = $category");
        binds.push(("category", category));
    }
    if let Some(search) = filter.search {
        conditions.push(
            "(string::lowercase(title) CONTAINS $search \
             OR string::lowercase(content) CONTAINS $search)",
        );
        binds.push(("search", search.to_lowercase()));
    }

    if conditions.is_empty() {
        (String::new(), binds)
    } else {
        (format!(" WHERE {}", conditions.join(" AND ")), binds)
    }
}

/// SurrealDB implementation of the Post repository.
#[derive(Clone)]
pub struct SurrealPostRepository<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealPostRepository<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }
}

impl<C: Connection> PostRepository for SurrealPostRepository<C> {
    async fn create(&self, input: CreatePost) -> QuillResult<Post> {
        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('post', $id) SET \
                 author_id = $author_id, title = $title, \
                 slug = $slug, content = $content, \
                 category = $category",
            )
            .bind(("id", id_str.clone()))
            .bind(("author_id", input.author_id.to_string()))
            .bind(("title", input.title))
            .bind(("slug", input.slug))
            .bind(("content", input.content))
            .bind(("category", input.category))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from_statement)?;

        let rows: Vec<PostRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "post".into(),
            id: id_str,
        })?;

        Ok(row.into_post(id)?)
    }

    async fn find_by_slug(&self, slug: &str) -> QuillResult<Option<Post>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id, * FROM post \
                 WHERE slug = $slug LIMIT 1",
            )
            .bind(("slug", slug.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PostRowWithId> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(row.try_into_post()?)),
            None => Ok(None),
        }
    }

    async fn update(&self, id: Uuid, input: UpdatePost) -> QuillResult<Post> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('post', $id) SET \
                 title = $title, slug = $slug, \
                 content = $content, category = $category, \
                 updated_at = time::now() \
                 RETURN AFTER",
            )
            .bind(("id", id_str.clone()))
            .bind(("title", input.title))
            .bind(("slug", input.slug))
            .bind(("content", input.content))
            .bind(("category", input.category))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(DbError::from_statement)?;

        // UPDATE on a missing record matches nothing and returns no rows.
        let rows: Vec<PostRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "post".into(),
            id: id_str,
        })?;

        Ok(row.into_post(id)?)
    }

    async fn delete(&self, id: Uuid) -> QuillResult<()> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query("DELETE type::record('post', $id) RETURN BEFORE")
            .bind(("id", id_str.clone()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<PostRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "post".into(),
                id: id_str,
            }
            .into());
        }
        Ok(())
    }

    async fn list(
        &self,
        filter: PostFilter,
        pagination: Pagination,
    ) -> QuillResult<PaginatedResult<Post>> {
        let pagination = pagination.clamped();
        let (clause, binds) = filter_clause(filter);

        let mut count_query = self
            .db
            .query(format!("SELECT count() AS total FROM post{clause} GROUP ALL"));
        for bind in binds.clone() {
            count_query = count_query.bind(bind);
        }
        let mut count_result = count_query.await.map_err(DbError::from)?;
        let count_rows: Vec<CountRow> = count_result.take(0).map_err(DbError::from)?;
        let total = count_rows.first().map(|r| r.total).unwrap_or(0);

        let mut page_query = self
            .db
            .query(format!(
                "SELECT meta::id(id) AS record_id, * FROM post{clause} \
                 ORDER BY created_at DESC \
                 LIMIT $limit START $offset"
            ))
            .bind(("limit", pagination.limit))
            .bind(("offset", pagination.offset));
        for bind in binds {
            page_query = page_query.bind(bind);
        }
        let mut result = page_query.await.map_err(DbError::from)?;

        let rows: Vec<PostRowWithId> = result.take(0).map_err(DbError::from)?;
        let items = rows
            .into_iter()
            .map(PostRowWithId::try_into_post)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(PaginatedResult {
            items,
            total,
            offset: pagination.offset,
            limit: pagination.limit,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_filter_has_no_where_clause() {
        let (clause, binds) = filter_clause(PostFilter::default());
        assert!(clause.is_empty());
        assert!(binds.is_empty());
    }

    #[test]
    fn search_is_lowercased_and_combined_with_category() {
        let (clause, binds) = filter_clause(PostFilter {
            search: Some("Rust".into()),
            category: Some("tech".into()),
        });
        assert!(clause.starts_with(" WHERE category = $category AND "));
        assert!(binds.contains(&("search", "rust".to_string())));
        assert!(binds.contains(&("category", "tech".to_string())));
    }
}
