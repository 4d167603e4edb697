//! Shared application state.
//!
//! Bundles the services with the store that backs them, so a caller that
//! mutates data through a service can also persist the store afterwards.

use std::sync::Arc;

use crate::config::Settings;
use crate::error::AppResult;
use crate::repositories::{MemoryStore, Repositories};
use crate::services::{RelationshipPolicy, Services};

/// Cloning is cheap since both Services and the store sit behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub store: Arc<MemoryStore>,
}

impl AppState {
    pub fn new(store: Arc<MemoryStore>, policy: RelationshipPolicy) -> Self {
        let repos = Repositories::in_memory(store.clone());
        Self {
            services: Services::new(repos, policy),
            store,
        }
    }

    /// Loads the configured snapshot and wires services with the configured
    /// relationship rules.
    pub async fn load(settings: &Settings) -> AppResult<Self> {
        let store = MemoryStore::load(&settings.store.snapshot_path).await?;
        Ok(Self::new(
            Arc::new(store),
            settings.relationships.to_policy(),
        ))
    }

    /// Writes the store back to the configured snapshot.
    pub async fn persist(&self, settings: &Settings) -> AppResult<()> {
        self.store.persist(&settings.store.snapshot_path).await
    }
}
