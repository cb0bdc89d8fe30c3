//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_backend;

use marketlog::config::{Config, CredentialProvider, SecureString, Session, SessionStore};
use marketlog::context::AppContext;
use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tempfile::TempDir;

use mock_backend::MockBackend;

/// Find an available port for testing.
pub fn free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind to free port");
    listener.local_addr().unwrap().port()
}

/// Write `content` to a `config.toml` inside a fresh temp dir.
pub fn temp_config(content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("config.toml");
    std::fs::write(&config_path, content).expect("Failed to write config");
    (temp_dir, config_path)
}

/// Config pointing at `base_url` with short timeouts.
pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.api.base_url = base_url.to_string();
    config.api.timeout_seconds = 2;
    config.api.connect_timeout_seconds = 1;
    config.ui.page_size = 10;
    config
}

pub fn logged_out() -> Arc<SessionStore> {
    Arc::new(SessionStore::in_memory())
}

pub fn logged_in(jwt: &str) -> Arc<SessionStore> {
    let store = SessionStore::in_memory();
    store
        .store(Session {
            jwt: SecureString::new(jwt.to_string()),
            user_id: 1,
            email: "farmer@example.com".to_string(),
            username: "farmer".to_string(),
        })
        .expect("in-memory store never fails");
    Arc::new(store)
}

/// Context wired to the mock server.
pub fn context_for(backend: &MockBackend, credentials: Arc<SessionStore>) -> AppContext {
    let credentials: Arc<dyn CredentialProvider> = credentials;
    AppContext::new(test_config(&backend.base_url()), credentials).expect("valid test config")
}

/// Context pointing at a port nobody listens on.
pub fn unreachable_context() -> AppContext {
    let base_url = format!("http://127.0.0.1:{}", free_port());
    AppContext::new(test_config(&base_url), logged_out()).expect("valid test config")
}

/// Poll `check` until it holds or `timeout` elapses.
pub async fn eventually(timeout: Duration, mut check: impl FnMut() -> bool) -> bool {
    let start = std::time::Instant::now();
    while start.elapsed() < timeout {
        if check() {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    check()
}

// -- Strapi fixtures ----------------------------------------------------------

pub fn advert_json(id: u64, document_id: &str, title: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "documentId": document_id,
        "title": title,
        "description": "Well kept",
        "price": 1200.5,
        "location": "Bern",
        "category": {"id": 1, "documentId": "cat-1", "name": "Machinery"},
        "createdAt": "2026-01-01T10:00:00.000Z"
    })
}

pub fn list_json(items: Vec<serde_json::Value>, page: u32, page_count: u32, total: u32) -> String {
    serde_json::json!({
        "data": items,
        "meta": {"pagination": {"page": page, "pageSize": 10, "pageCount": page_count, "total": total}}
    })
    .to_string()
}

pub fn single_json(item: serde_json::Value) -> String {
    serde_json::json!({"data": item, "meta": {}}).to_string()
}

pub fn profile_json(document_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 3,
        "documentId": document_id,
        "firstName": "Anna",
        "lastName": "Meier",
        "addresses": [],
        "adverts": []
    })
}

pub fn address_json(document_id: &str) -> serde_json::Value {
    serde_json::json!({
        "id": 11,
        "documentId": document_id,
        "street": "Main St 1",
        "city": "Bern",
        "postalCode": "3000"
    })
}

pub fn user_json() -> serde_json::Value {
    serde_json::json!({
        "id": 1,
        "documentId": "user-1",
        "username": "farmer",
        "email": "farmer@example.com",
        "confirmed": true,
        "blocked": false
    })
}
