//! Repository layer for document store access.
//!
//! Services depend on the traits only; the store behind them is chosen
//! when `Repositories` is assembled.

mod memory_store;
mod traits;

pub use memory_store::{MemoryStore, Snapshot};
pub use traits::{JobRepository, UserRepository};

use std::sync::Arc;

/// Aggregates all repositories for convenient access.
///
/// Cloning is cheap since every repository sits behind an `Arc`.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub jobs: Arc<dyn JobRepository>,
}

impl Repositories {
    pub fn new(users: Arc<dyn UserRepository>, jobs: Arc<dyn JobRepository>) -> Self {
        Self { users, jobs }
    }

    /// Uses one in-memory store for both collections.
    pub fn in_memory(store: Arc<MemoryStore>) -> Self {
        Self {
            users: store.clone(),
            jobs: store,
        }
    }
}
