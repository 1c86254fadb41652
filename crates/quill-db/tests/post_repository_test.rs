//! Integration tests for Post repository using in-memory SurrealDB.

use quill_core::error::QuillError;
use quill_core::models::post::{CreatePost, PostFilter, UpdatePost};
use quill_core::repository::{Pagination, PostRepository};
use quill_db::SurrealPostRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

async fn setup() -> SurrealPostRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    quill_db::run_migrations(&db).await.unwrap();
    SurrealPostRepository::new(db)
}

fn post(title: &str, slug: &str, category: Option<&str>) -> CreatePost {
    CreatePost {
        author_id: Uuid::new_v4(),
        title: title.into(),
        slug: slug.into(),
        content: format!("{title} has a body that is long enough"),
        category: category.map(Into::into),
    }
}

#[tokio::test]
async fn create_and_find_by_slug() {
    let repo = setup().await;
    let input = post("Test Post", "test-post", Some("tech"));
    let author_id = input.author_id;

    let created = repo.create(input).await.unwrap();
    assert_eq!(created.slug, "test-post");
    assert_eq!(created.author_id, author_id);
    assert_eq!(created.category.as_deref(), Some("tech"));

    let found = repo.find_by_slug("test-post").await.unwrap().unwrap();
    assert_eq!(found.id, created.id);
    assert_eq!(found.title, "Test Post");
}

#[tokio::test]
async fn find_missing_slug_returns_none() {
    let repo = setup().await;
    assert!(repo.find_by_slug("nothing-here").await.unwrap().is_none());
}

#[tokio::test]
async fn post_without_category_round_trips() {
    let repo = setup().await;
    repo.create(post("Plain", "plain", None)).await.unwrap();
    let found = repo.find_by_slug("plain").await.unwrap().unwrap();
    assert!(found.category.is_none());
}

#[tokio::test]
async fn duplicate_slug_is_a_conflict() {
    let repo = setup().await;
    repo.create(post("Test Post", "test-post", None)).await.unwrap();

    let err = repo
        .create(post("test post!", "test-post", None))
        .await
        .unwrap_err();
    assert!(
        matches!(err, QuillError::Conflict { .. }),
        "expected Conflict, got: {err:?}"
    );
}

#[tokio::test]
async fn list_filters_and_paginates() {
    let repo = setup().await;
    repo.create(post("Rust Ownership", "rust-ownership", Some("tech")))
        .await
        .unwrap();
    repo.create(post("Sourdough Basics", "sourdough-basics", Some("food")))
        .await
        .unwrap();
    repo.create(post("Async Rust", "async-rust", Some("tech")))
        .await
        .unwrap();

    let all = repo
        .list(PostFilter::default(), Pagination::default())
        .await
        .unwrap();
    assert_eq!(all.total, 3);
    assert_eq!(all.items.len(), 3);

    let tech = repo
        .list(
            PostFilter {
                category: Some("tech".into()),
                ..Default::default()
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(tech.total, 2);
    assert!(tech.items.iter().all(|p| p.category.as_deref() == Some("tech")));

    let search = repo
        .list(
            PostFilter {
                search: Some("RUST".into()),
                category: None,
            },
            Pagination::default(),
        )
        .await
        .unwrap();
    assert_eq!(search.total, 2);

    let page = repo
        .list(
            PostFilter::default(),
            Pagination {
                offset: 2,
                limit: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(page.total, 3);
    assert_eq!(page.items.len(), 1);
    assert_eq!(page.offset, 2);
}

fn changes(title: &str, slug: &str) -> UpdatePost {
    UpdatePost {
        title: title.into(),
        slug: slug.into(),
        content: "Rewritten body that is long enough".into(),
        category: None,
    }
}

#[tokio::test]
async fn update_replaces_fields_and_moves_slug() {
    let repo = setup().await;
    let created = repo
        .create(post("Old Title", "old-title", Some("tech")))
        .await
        .unwrap();

    let updated = repo
        .update(created.id, changes("New Title", "new-title"))
        .await
        .unwrap();

    assert_eq!(updated.id, created.id);
    assert_eq!(updated.author_id, created.author_id);
    assert_eq!(updated.title, "New Title");
    assert!(updated.category.is_none());
    assert!(updated.updated_at >= created.updated_at);
    assert!(repo.find_by_slug("old-title").await.unwrap().is_none());
    assert_eq!(
        repo.find_by_slug("new-title").await.unwrap().unwrap().id,
        created.id
    );
}

#[tokio::test]
async fn update_onto_another_posts_slug_is_a_conflict() {
    let repo = setup().await;
    repo.create(post("Taken", "taken", None)).await.unwrap();
    let mine = repo.create(post("Mine", "mine", None)).await.unwrap();

    let err = repo
        .update(mine.id, changes("Taken", "taken"))
        .await
        .unwrap_err();

    assert!(matches!(err, QuillError::Conflict { .. }), "got {err:?}");
}

#[tokio::test]
async fn update_unknown_post_is_not_found() {
    let repo = setup().await;
    let err = repo
        .update(Uuid::new_v4(), changes("Ghost", "ghost"))
        .await
        .unwrap_err();
    assert!(matches!(err, QuillError::NotFound { .. }), "got {err:?}");
}

#[tokio::test]
async fn delete_removes_post() {
    let repo = setup().await;
    let created = repo.create(post("Doomed", "doomed", None)).await.unwrap();

    repo.delete(created.id).await.unwrap();

    assert!(repo.find_by_slug("doomed").await.unwrap().is_none());
    let err = repo.delete(created.id).await.unwrap_err();
    assert!(matches!(err, QuillError::NotFound { .. }), "got {err:?}");
}
