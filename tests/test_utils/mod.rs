//! Shared helpers for integration tests.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectionTrait, Database, Statement};
use storefront::config::AppConfig;
use storefront::server::{AppState, create_app};

/// Bearer token accepted by the test configuration
pub const OPERATOR_TOKEN: &str = "integration-operator-token";

/// Build an application over a migrated in-memory database.
pub async fn setup_app() -> (AppState, Router) {
    let db = Database::connect("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("apply migrations");

    // SQLite needs this for ON DELETE CASCADE to take effect
    db.execute(Statement::from_string(
        db.get_database_backend(),
        "PRAGMA foreign_keys = ON".to_string(),
    ))
    .await
    .expect("enable foreign keys");

    let config = AppConfig {
        operator_tokens: vec![OPERATOR_TOKEN.to_string()],
        ..Default::default()
    };

    let state = AppState {
        db,
        config: Arc::new(config),
    };

    (state.clone(), create_app(state))
}

/// Build an operator-authenticated JSON request.
pub fn authed(method: &str, uri: &str, body: Option<serde_json::Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Authorization", format!("Bearer {}", OPERATOR_TOKEN))
        .header("Content-Type", "application/json");

    match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Build a tenant-scoped JSON request carrying an `X-Tenant-Id` header.
pub fn tenant_scoped(
    method: &str,
    uri: &str,
    tenant_id: &str,
    body: Option<serde_json::Value>,
) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("X-Tenant-Id", tenant_id)
        .header("Content-Type", "application/json");

    match body {
        Some(json) => builder.body(Body::from(json.to_string())).unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// Read a response body as JSON.
pub async fn json_body(response: Response<Body>) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read response body");
    serde_json::from_slice(&bytes).expect("response body is JSON")
}
