//! Application wiring: state construction, routes, and the server loop.

pub mod routes;
pub mod server;

use std::sync::Arc;

use anyhow::Context;
use axum::Router;

use galley_core::Config;
use galley_notify::Notifier;
use galley_storage::create_storage;
use galley_submission::MemoryArticleStore;

use crate::state::AppState;

/// Build the application state and router from configuration.
///
/// The content store defaults to the in-memory implementation; a hosted
/// deployment plugs its store in behind the same trait.
pub async fn initialize_app(config: Config) -> anyhow::Result<(Arc<AppState>, Router)> {
    let storage = create_storage(&config)
        .await
        .context("Failed to initialize storage backend")?;

    let notifier = Notifier::from_config(&config)
        .map_err(|e| anyhow::anyhow!("Failed to initialize notifier: {}", e))?;

    let state = Arc::new(AppState::new(
        Arc::new(config),
        storage,
        Arc::new(MemoryArticleStore::new()),
        Arc::new(notifier),
    ));

    let router = routes::setup_routes(state.clone());
    Ok((state, router))
}
