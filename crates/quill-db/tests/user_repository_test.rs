//! Integration tests for User repository using in-memory SurrealDB.

use quill_core::error::QuillError;
use quill_core::models::user::CreateUser;
use quill_core::repository::UserRepository;
use quill_db::SurrealUserRepository;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

/// Helper: spin up in-memory DB and run migrations.
async fn setup() -> SurrealUserRepository<Db> {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    quill_db::run_migrations(&db).await.unwrap();
    SurrealUserRepository::new(db)
}

fn alice() -> CreateUser {
    CreateUser {
        username: "alice".into(),
        email: "alice@example.com".into(),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
    }
}

#[tokio::test]
async fn create_and_get_user() {
    let repo = setup().await;

    let user = repo.create(alice()).await.unwrap();
    assert_eq!(user.username, "alice");
    assert_eq!(user.email, "alice@example.com");

    let fetched = repo.get_by_id(user.id).await.unwrap();
    assert_eq!(fetched.id, user.id);
    assert_eq!(fetched.password_hash, user.password_hash);
}

#[tokio::test]
async fn get_missing_user_is_not_found() {
    let repo = setup().await;
    let err = repo.get_by_id(Uuid::new_v4()).await.unwrap_err();
    assert!(matches!(err, QuillError::NotFound { .. }));
}

#[tokio::test]
async fn find_by_email() {
    let repo = setup().await;
    let user = repo.create(alice()).await.unwrap();

    let found = repo.find_by_email("alice@example.com").await.unwrap();
    assert_eq!(found.map(|u| u.id), Some(user.id));

    let missing = repo.find_by_email("bob@example.com").await.unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn find_by_email_or_username_matches_either() {
    let repo = setup().await;
    let user = repo.create(alice()).await.unwrap();

    let by_email = repo
        .find_by_email_or_username("alice@example.com", "someone-else")
        .await
        .unwrap();
    assert_eq!(by_email.map(|u| u.id), Some(user.id));

    let by_username = repo
        .find_by_email_or_username("other@example.com", "alice")
        .await
        .unwrap();
    assert_eq!(by_username.map(|u| u.id), Some(user.id));

    let neither = repo
        .find_by_email_or_username("other@example.com", "bob")
        .await
        .unwrap();
    assert!(neither.is_none());
}

#[tokio::test]
async fn email_match_wins_over_username_match() {
    let repo = setup().await;
    repo.create(alice()).await.unwrap();
    let bob = repo
        .create(CreateUser {
            username: "bob".into(),
            email: "bob@example.com".into(),
            password_hash: "hash".into(),
        })
        .await
        .unwrap();

    // Username belongs to alice, email to bob.
    let found = repo
        .find_by_email_or_username("bob@example.com", "alice")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found.id, bob.id);
}

#[tokio::test]
async fn duplicate_email_is_a_conflict() {
    let repo = setup().await;
    repo.create(alice()).await.unwrap();

    let err = repo
        .create(CreateUser {
            username: "alice2".into(),
            ..alice()
        })
        .await
        .unwrap_err();

    match err {
        QuillError::Conflict { message } => assert_eq!(message, "Email already exists"),
        other => panic!("expected Conflict, got: {other:?}"),
    }
}

#[tokio::test]
async fn duplicate_username_is_a_conflict() {
    let repo = setup().await;
    repo.create(alice()).await.unwrap();

    let err = repo
        .create(CreateUser {
            email: "alice2@example.com".into(),
            ..alice()
        })
        .await
        .unwrap_err();

    match err {
        QuillError::Conflict { message } => assert_eq!(message, "Username already exists"),
        other => panic!("expected Conflict, got: {other:?}"),
    }
}
