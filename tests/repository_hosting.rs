mod common;

use axum_test::TestServer;
use sqlx::PgPool;
use std::sync::Arc;
use subdomain_registrar::domain::repositories::HostingRepository;
use subdomain_registrar::error::RegistrarError;
use subdomain_registrar::infrastructure::persistence::PgHostingRepository;
use subdomain_registrar::routes::site_routes;

#[sqlx::test]
async fn test_bind_and_find(pool: PgPool) {
    let repo = PgHostingRepository::new(Arc::new(pool));

    let record = repo
        .bind("alice", "myblog", "/home/alice/sites/myblog")
        .await
        .unwrap();

    assert_eq!(record.subdomain, "myblog");
    assert_eq!(record.owner, "alice");

    let found = repo.find_by_subdomain("myblog").await.unwrap().unwrap();
    assert_eq!(found, record);
    assert!(repo.find_by_subdomain("other").await.unwrap().is_none());
}

#[sqlx::test]
async fn test_rebind_by_same_owner_updates_folder(pool: PgPool) {
    let repo = PgHostingRepository::new(Arc::new(pool));

    let first = repo.bind("alice", "myblog", "/home/alice/a/myblog").await.unwrap();
    let second = repo.bind("alice", "myblog", "/home/alice/b/myblog").await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(second.root_dir, "/home/alice/b/myblog");
    assert!(second.updated_at >= first.updated_at);
}

#[sqlx::test]
async fn test_bind_held_by_other_owner_is_conflict(pool: PgPool) {
    let repo = PgHostingRepository::new(Arc::new(pool));

    repo.bind("bob", "myblog", "/home/bob/myblog").await.unwrap();
    let err = repo
        .bind("alice", "myblog", "/home/alice/myblog")
        .await
        .unwrap_err();

    assert!(matches!(err, RegistrarError::Conflict { .. }));
    assert_eq!(err.to_string(), "Subdomain 'myblog' is already taken");

    let record = repo.find_by_subdomain("myblog").await.unwrap().unwrap();
    assert_eq!(record.owner, "bob");
}

#[sqlx::test]
async fn test_list_by_owner(pool: PgPool) {
    let repo = PgHostingRepository::new(Arc::new(pool));

    repo.bind("alice", "one", "/a/one").await.unwrap();
    repo.bind("alice", "two", "/a/two").await.unwrap();
    repo.bind("bob", "three", "/b/three").await.unwrap();

    let alice = repo.list_by_owner("alice").await.unwrap();
    assert_eq!(alice.len(), 2);
    assert!(alice.iter().all(|r| r.owner == "alice"));

    assert_eq!(repo.list().await.unwrap().len(), 3);
}

#[sqlx::test]
async fn test_health_check(pool: PgPool) {
    let repo = PgHostingRepository::new(Arc::new(pool));

    assert!(repo.health_check().await);
}

#[sqlx::test]
async fn test_health_endpoint_with_database(pool: PgPool) {
    let storage = tempfile::tempdir().unwrap();
    let app = site_routes(common::create_pg_state(pool, storage.path()));

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert!(json.get("version").is_some());
}
