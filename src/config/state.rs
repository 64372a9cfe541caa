// Application state module
// Bundles the loaded configuration with the single store owner

use super::types::Config;
use crate::store::ItemStore;

/// Shared application state
///
/// The store instance here is the only owner of the backing file; handlers
/// reach it through `Arc<AppState>`.
pub struct AppState {
    pub config: Config,
    pub store: ItemStore,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let store = ItemStore::new(&config.storage.data_file);
        Self { config, store }
    }
}
