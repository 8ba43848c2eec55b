//! Database-backed repository tests.
//!
//! These exercise the behaviors that need a live Postgres: insert
//! read-back, the find-and-update re-read, delete, and session
//! invalidation. They run only when `BAZAAR_TEST_DATABASE_URL` points at a
//! disposable database; without it each test returns early. Migrations are
//! applied on first use.

use bazaar_rs::config::DatabaseConfig;
use bazaar_rs::db::{establish_async_connection_pool, run_pending_migrations};
use bazaar_rs::models::{
    NewUser, ProductChanges, ProductFilter, ProductInput, SessionChanges, SessionFilter, User,
};
use bazaar_rs::repositories::{Repositories, UpdateOptions};

const DB_URL_ENV: &str = "BAZAAR_TEST_DATABASE_URL";

async fn test_repositories() -> Option<Repositories> {
    let url = std::env::var(DB_URL_ENV).ok()?;
    run_pending_migrations(&url)
        .await
        .expect("failed to run migrations");
    let config = DatabaseConfig {
        url,
        max_connections: 2,
        min_connections: 1,
        connection_timeout: 5,
        auto_migrate: false,
    };
    let pool = establish_async_connection_pool(&config)
        .await
        .expect("failed to build pool");
    Some(Repositories::new(pool, 4))
}

fn unique_email(tag: &str) -> String {
    format!("{tag}-{}@example.com", uuid::Uuid::new_v4())
}

async fn seeded_user(repos: &Repositories, tag: &str) -> User {
    repos
        .users
        .create(NewUser {
            email: unique_email(tag),
            name: "Harness User".to_string(),
            password: "correct horse battery staple".to_string(),
        })
        .await
        .expect("failed to create user")
}

fn product_input(user_id: i32, title: &str) -> ProductInput {
    ProductInput {
        user_id,
        title: title.to_string(),
        description: "A reasonably long product description".to_string(),
        price: 9.99,
        image: "https://example.com/item.png".to_string(),
    }
}

#[tokio::test]
async fn test_create_then_find_by_id_round_trips() {
    let Some(repos) = test_repositories().await else {
        return;
    };
    let owner = seeded_user(&repos, "roundtrip").await;

    let created = repos
        .products
        .create(product_input(owner.id, "Round Trip"))
        .await
        .unwrap();

    let fetched = repos
        .products
        .find_by_id(created.id)
        .await
        .unwrap()
        .expect("created product should be readable by id");
    assert_eq!(fetched.product_id, created.product_id);
    assert_eq!(fetched.title, "Round Trip");
    assert_eq!(fetched.user_id, owner.id);
}

#[tokio::test]
async fn test_find_one_and_update_returns_pre_image_by_default() {
    let Some(repos) = test_repositories().await else {
        return;
    };
    let owner = seeded_user(&repos, "preimage").await;
    let created = repos
        .products
        .create(product_input(owner.id, "Before"))
        .await
        .unwrap();

    let changes = ProductChanges {
        title: Some("After".to_string()),
        ..ProductChanges::default()
    };
    let returned = repos
        .products
        .find_one_and_update(
            &ProductFilter::by_product_id(&created.product_id),
            &changes,
            UpdateOptions::default(),
        )
        .await
        .unwrap()
        .expect("a matching row should come back");

    assert_eq!(returned.title, "Before");

    let stored = repos
        .products
        .find_one(&ProductFilter::by_product_id(&created.product_id))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.title, "After");
}

#[tokio::test]
async fn test_find_one_and_update_new_re_reads_by_original_filter() {
    let Some(repos) = test_repositories().await else {
        return;
    };
    let owner = seeded_user(&repos, "reread").await;
    let created = repos
        .products
        .create(product_input(owner.id, "Original Title"))
        .await
        .unwrap();

    let changes = ProductChanges {
        title: Some("Updated Title".to_string()),
        price: Some(19.99),
        ..ProductChanges::default()
    };
    let updated = repos
        .products
        .find_one_and_update(
            &ProductFilter::by_product_id(&created.product_id),
            &changes,
            UpdateOptions::returning_new(),
        )
        .await
        .unwrap()
        .expect("the re-read should find the updated row");

    assert_eq!(updated.product_id, created.product_id);
    assert_eq!(updated.title, "Updated Title");
}

#[tokio::test]
async fn test_find_one_and_update_unmatched_filter_is_not_found() {
    let Some(repos) = test_repositories().await else {
        return;
    };

    let changes = ProductChanges {
        title: Some("Never Applied".to_string()),
        ..ProductChanges::default()
    };
    let result = repos
        .products
        .find_one_and_update(
            &ProductFilter::by_product_id("no-such-external-id"),
            &changes,
            UpdateOptions::returning_new(),
        )
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_delete_one_then_find_one_is_not_found() {
    let Some(repos) = test_repositories().await else {
        return;
    };
    let owner = seeded_user(&repos, "delete").await;
    let created = repos
        .products
        .create(product_input(owner.id, "Ephemeral"))
        .await
        .unwrap();

    let filter = ProductFilter::by_product_id(&created.product_id);
    let removed = repos.products.delete_one(&filter).await.unwrap();
    assert_eq!(removed, 1);

    let found = repos.products.find_one(&filter).await.unwrap();
    assert!(found.is_none());
}

#[tokio::test]
async fn test_invalidated_session_is_readable_but_not_valid() {
    let Some(repos) = test_repositories().await else {
        return;
    };
    let owner = seeded_user(&repos, "session").await;
    let session = repos
        .sessions
        .create(bazaar_rs::models::NewSession {
            user_id: owner.id,
            user_agent: "harness".to_string(),
        })
        .await
        .unwrap();
    assert!(session.valid);

    let affected = repos
        .sessions
        .update_one(
            &SessionFilter::by_id(session.id),
            &SessionChanges::invalidate(),
        )
        .await
        .unwrap();
    assert!(affected);

    let reread = repos
        .sessions
        .find_by_id(session.id)
        .await
        .unwrap()
        .expect("an invalidated session stays readable");
    assert!(!reread.valid);

    let valid_sessions = repos
        .sessions
        .find_many(&SessionFilter {
            id: None,
            user_id: Some(owner.id),
            valid: Some(true),
        })
        .await
        .unwrap();
    assert!(valid_sessions.iter().all(|s| s.id != session.id));
}
