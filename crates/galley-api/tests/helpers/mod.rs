//! Test helpers: build AppState and router for integration tests.
//!
//! Run from workspace root: `cargo test -p galley-api`.

use std::sync::Arc;

use async_trait::async_trait;
use axum_test::TestServer;
use tempfile::TempDir;

use galley_api::setup::routes;
use galley_api::state::AppState;
use galley_core::config::CategoryPolicy;
use galley_core::{constants, Config, StorageBackend};
use galley_notify::{FetchError, FetchedFile, FileFetcher, Notifier};
use galley_storage::LocalStorage;
use galley_submission::MemoryArticleStore;

/// Fetcher that fails every fetch; background dispatch in API tests must
/// never reach the network.
pub struct NoFetch;

#[async_trait]
impl FileFetcher for NoFetch {
    async fn fetch(&self, _url: &str) -> Result<FetchedFile, FetchError> {
        Err(FetchError::Network("fetching disabled in tests".to_string()))
    }
}

/// Test application: server plus owned resources.
pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<MemoryArticleStore>,
    pub _temp_dir: TempDir,
}

pub fn test_config(temp_dir: &TempDir) -> Config {
    Config {
        server_port: 0,
        environment: "test".to_string(),
        storage_backend: StorageBackend::Local,
        s3_bucket: None,
        s3_region: None,
        s3_endpoint: None,
        local_storage_path: Some(temp_dir.path().display().to_string()),
        local_storage_base_url: Some("http://localhost:3000/files".to_string()),
        documents: CategoryPolicy::default_documents(),
        images: CategoryPolicy::default_images(),
        covers: CategoryPolicy::default_covers(),
        attachment_budget_bytes: constants::ATTACHMENT_BUDGET_BYTES,
        attachment_fetch_timeout_secs: constants::ATTACHMENT_FETCH_TIMEOUT_SECS,
        notifications_enabled: false,
        smtp_host: None,
        smtp_port: None,
        smtp_user: None,
        smtp_password: None,
        smtp_from: None,
        smtp_tls: false,
        editor_inbox: None,
    }
}

pub async fn setup_test_app() -> TestApp {
    let temp_dir = TempDir::new().expect("temp dir");
    let config = test_config(&temp_dir);
    setup_test_app_with(config, temp_dir).await
}

pub async fn setup_test_app_with(config: Config, temp_dir: TempDir) -> TestApp {
    let storage = Arc::new(
        LocalStorage::new(
            temp_dir.path(),
            config
                .local_storage_base_url
                .clone()
                .expect("base url in test config"),
        )
        .await
        .expect("local storage"),
    );
    let store = Arc::new(MemoryArticleStore::new());
    let notifier = Arc::new(Notifier::new(
        None,
        Arc::new(NoFetch),
        config.attachment_budget_bytes,
        None,
    ));

    let state = Arc::new(AppState::new(
        Arc::new(config),
        storage,
        store.clone(),
        notifier,
    ));

    let server = TestServer::new(routes::setup_routes(state)).expect("test server");

    TestApp {
        server,
        store,
        _temp_dir: temp_dir,
    }
}

/// A complete, valid submission payload for the ADC track (no cover needed).
pub fn valid_payload() -> serde_json::Value {
    serde_json::json!({
        "title": "Giant cell tumor of the distal radius",
        "abstract_text": "B".repeat(120),
        "authors": ["F. Georges"],
        "track": "adc",
        "tags": ["orthopedics"],
        "corresponding_email": "f.georges@example.org",
        "article_files": ["http://localhost:3000/files/article-documents/a.pdf"],
        "image_annexes": [],
        "cover_image_url": null
    })
}
