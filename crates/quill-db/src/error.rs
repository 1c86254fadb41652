//! Database-specific error types and conversions.

use quill_core::error::QuillError;

/// Database-layer error type.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("SurrealDB error: {0}")]
    Surreal(#[from] surrealdb::Error),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Corrupt record: {0}")]
    Decode(String),

    #[error("Record not found: {entity} with id {id}")]
    NotFound { entity: String, id: String },

    /// A unique index rejected a write.
    #[error("Duplicate value for {field}")]
    Duplicate { field: &'static str },
}

/// Unique indexes and the field each one guards.
pub(crate) const UNIQUE_INDEXES: &[(&str, &str)] = &[
    ("idx_user_email", "email"),
    ("idx_user_username", "username"),
    ("idx_post_slug", "slug"),
];

impl DbError {
    /// Classify a failed statement, recognising unique-index violations.
    pub(crate) fn from_statement(err: surrealdb::Error) -> Self {
        let msg = err.to_string();
        if msg.contains("already contains") {
            if let Some(&(_, field)) = UNIQUE_INDEXES.iter().find(|(idx, _)| msg.contains(idx)) {
                return DbError::Duplicate { field };
            }
        }
        DbError::Query(msg)
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl From<DbError> for QuillError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => QuillError::NotFound { entity, id },
            DbError::Duplicate { field } => {
                QuillError::conflict(format!("{} already exists", capitalize(field)))
            }
            other => QuillError::Database(other.to_string()),
        }
    }
}
