//! Repository traits for the document store.

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{JobPosting, User};

/// Lookup and persistence of user documents.
///
/// `save` is an upsert: it replaces the whole document, including both
/// relationship lists.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Finds a user by id. `Ok(None)` when no document exists.
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>>;

    async fn save(&self, user: &User) -> AppResult<()>;
}

/// Persistence of job postings.
#[async_trait]
pub trait JobRepository: Send + Sync {
    async fn save(&self, job: &JobPosting) -> AppResult<()>;

    /// Postings created by the given user, oldest first.
    async fn list_by_poster(&self, user_id: &str) -> AppResult<Vec<JobPosting>>;
}
