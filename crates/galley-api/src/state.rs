//! Shared application state.

use std::sync::Arc;

use galley_core::Config;
use galley_notify::Notifier;
use galley_storage::Storage;
use galley_submission::ArticleStore;

/// State handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub storage: Arc<dyn Storage>,
    pub store: Arc<dyn ArticleStore>,
    pub notifier: Arc<Notifier>,
}

impl AppState {
    pub fn new(
        config: Arc<Config>,
        storage: Arc<dyn Storage>,
        store: Arc<dyn ArticleStore>,
        notifier: Arc<Notifier>,
    ) -> Self {
        AppState {
            config,
            storage,
            store,
            notifier,
        }
    }
}
