//! Common test utilities and fixtures
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, Response},
    Router,
};
use blockaction_server::{config::ServerConfig, cors_layer, create_router, state::AppState};
use blockaction_storage::SqliteIdentityStore;
use std::sync::Arc;
use tempfile::TempDir;

pub const TEST_SECRET: &str = "test-secret-key";

/// Real SQLite-backed app state, cleaned up on drop
pub struct TestApp {
    pub router: Router,
    pub state: AppState,
    pub store: Arc<SqliteIdentityStore>,
    _temp_dir: TempDir,
}

impl TestApp {
    pub async fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let db_path = temp_dir.path().join("test.db");
        let db_url = format!("sqlite://{}", db_path.display());

        let pool = blockaction_storage::create_pool(&db_url, 5)
            .await
            .expect("Failed to create pool");
        blockaction_storage::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        let store = Arc::new(SqliteIdentityStore::new(pool));
        let config = test_config();
        let state = AppState::build(&config, store.clone()).expect("Failed to build state");
        let router = create_router(
            state.clone(),
            cors_layer(&config.cors).expect("Failed to build CORS layer"),
        );

        Self {
            router,
            state,
            store,
            _temp_dir: temp_dir,
        }
    }
}

pub fn test_config() -> ServerConfig {
    let mut config = ServerConfig::default();
    config.auth.secret = TEST_SECRET.to_string();
    config
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn get_with_auth(uri: &str, authorization: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(value) = authorization {
        builder = builder.header(header::AUTHORIZATION, value);
    }
    builder.body(Body::empty()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

/// Test user credentials
pub mod fixtures {
    pub const TEST_ACCOUNT: &str = "testuser";
    pub const TEST_PASSWORD: &str = "abcd1234";
    pub const TEST_NAME: &str = "testuser";
}
