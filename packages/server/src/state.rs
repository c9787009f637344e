use std::sync::Arc;

use revassign_assignment::AssignmentEngine;
use revassign_review::ReviewService;
use revassign_store::{InMemoryStore, JsonFileStore, StoreError};

use crate::ServerConfig;

pub struct AppState {
    pub service: ReviewService,
}

impl AppState {
    #[must_use]
    pub const fn new(service: ReviewService) -> Self {
        Self { service }
    }

    /// Build the service over the store selected by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured state file exists but cannot be
    /// read or parsed.
    pub async fn from_config(config: &ServerConfig) -> Result<Self, StoreError> {
        let engine = AssignmentEngine::default();

        let service = match &config.state_file {
            Some(path) => {
                let store = JsonFileStore::open(path).await?;
                log::info!("Persisting state to {}", store.path().display());
                ReviewService::with_store(Arc::new(store), engine)
            }
            None => {
                log::info!("Keeping state in memory only");
                ReviewService::with_store(Arc::new(InMemoryStore::new()), engine)
            }
        };

        Ok(Self::new(service))
    }
}
