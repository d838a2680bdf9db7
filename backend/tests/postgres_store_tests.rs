//! Document store tests against PostgreSQL.
//!
//! These tests require a PostgreSQL database. Set DATABASE_URL and run:
//!
//! ```sh
//! DATABASE_URL="postgres://localhost:5432/vetpath_test" \
//!   cargo test --test postgres_store_tests -- --ignored
//! ```

use std::sync::Arc;

use serde_json::json;

use vetpath_backend::db;
use vetpath_backend::error::AppError;
use vetpath_backend::models::{Actor, Collection, UserRole};
use vetpath_backend::services::certification_service::CertificationService;
use vetpath_backend::storage::{DocumentStore, PostgresDocumentStore};

async fn store() -> PostgresDocumentStore {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = db::create_pool(&url).await.expect("Failed to connect to test database");
    db::run_migrations(&pool).await.expect("Failed to run migrations");
    PostgresDocumentStore::new(pool)
}

#[tokio::test]
#[ignore] // Requires database
async fn test_insert_list_merge_round_trip() {
    let store = store().await;
    store.clear(Collection::Interviews).await.unwrap();

    store
        .insert(Collection::Interviews, json!({"id": "int1", "company": "Microsoft"}))
        .await
        .unwrap();
    store
        .insert(Collection::Interviews, json!({"id": "int2", "company": "Google"}))
        .await
        .unwrap();

    let err = store
        .insert(Collection::Interviews, json!({"id": "int1"}))
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let merged = store
        .merge(Collection::Interviews, "int2", json!({"status": "completed", "id": "x"}))
        .await
        .unwrap();
    assert_eq!(merged["id"], "int2");
    assert_eq!(merged["company"], "Google");
    assert_eq!(merged["status"], "completed");

    let ids: Vec<String> = store
        .list(Collection::Interviews)
        .await
        .unwrap()
        .iter()
        .map(|d| d["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids, ["int1", "int2"]);
}

#[tokio::test]
#[ignore] // Requires database
async fn test_concurrent_transitions_keep_every_audit_entry() {
    let store: Arc<dyn DocumentStore> = Arc::new(store().await);
    store.clear(Collection::Certifications).await.unwrap();

    let service = CertificationService::new(store.clone());
    let owner = Actor::new("u1", "Alex Thompson", UserRole::Veteran);
    let ack = service
        .submit(json!({"name": "PMP", "issuer": "PMI"}), Some(&owner))
        .await
        .unwrap();

    let reviewer_a = Actor::new("u3", "Maj. Robert Sterling", UserRole::Teacher);
    let reviewer_b = Actor::new("u4", "Sgt. Maria Rodriguez", UserRole::Teacher);
    let (a, b) = tokio::join!(
        service.approve(&ack.inserted_id, &reviewer_a, None),
        service.reject(&ack.inserted_id, &reviewer_b, None),
    );
    assert!(a.is_ok() ^ b.is_ok(), "exactly one review should win");

    let doc = store
        .get(Collection::Certifications, &ack.inserted_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(doc["auditTrail"].as_array().unwrap().len(), 2);
}
