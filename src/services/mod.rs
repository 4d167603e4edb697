//! Service layer for business logic operations.
//!
//! Services encapsulate business rules and coordinate with the
//! repository layer. They hold no state of their own.

mod job_service;
mod user_service;

#[cfg(test)]
mod test_support;

pub use job_service::{CreateJobInput, JobCreationService, JobRequest};
pub use user_service::{
    InconsistentStatePolicy, RelationshipPolicy, RelationshipState, UserRelationshipService,
};

use crate::repositories::Repositories;

/// Aggregates all services for convenient access.
///
/// Cloning is cheap since the underlying repositories sit behind `Arc`.
#[derive(Clone)]
pub struct Services {
    pub jobs: JobCreationService,
    pub relationships: UserRelationshipService,
}

impl Services {
    /// Creates a new Services instance from Repositories.
    pub fn new(repos: Repositories, policy: RelationshipPolicy) -> Self {
        Self {
            jobs: JobCreationService::new(repos.users.clone(), repos.jobs),
            relationships: UserRelationshipService::new(repos.users, policy),
        }
    }
}
