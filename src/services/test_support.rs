//! Repository doubles shared by the service tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::error::{AppError, AppResult};
use crate::models::{JobPosting, User};
use crate::repositories::{JobRepository, MemoryStore, UserRepository};
use crate::utils::validate::ids_match;

/// Wraps a `MemoryStore`, counting calls and failing saves for chosen ids
/// or from the n-th save on.
#[derive(Default)]
pub struct RecordingUserRepository {
    pub store: MemoryStore,
    finds: AtomicUsize,
    saves: AtomicUsize,
    fail_saves_for: Vec<String>,
    fail_saves_from: Option<usize>,
}

impl RecordingUserRepository {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::default();
        for user in users {
            repo.store.insert_user(user);
        }
        repo
    }

    pub fn failing_saves_for(mut self, id: &str) -> Self {
        self.fail_saves_for.push(id.to_string());
        self
    }

    /// Fails the `nth` save (1-based) and every one after it.
    pub fn failing_saves_from(mut self, nth: usize) -> Self {
        self.fail_saves_from = Some(nth);
        self
    }

    pub fn finds(&self) -> usize {
        self.finds.load(Ordering::SeqCst)
    }

    pub fn saves(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    pub fn calls(&self) -> usize {
        self.finds() + self.saves()
    }
}

#[async_trait]
impl UserRepository for RecordingUserRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        self.finds.fetch_add(1, Ordering::SeqCst);
        self.store.find_by_id(id).await
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        let nth = self.saves.fetch_add(1, Ordering::SeqCst) + 1;
        if self.fail_saves_from.is_some_and(|from| nth >= from) {
            return Err(AppError::database(
                "save user",
                anyhow::anyhow!("store offline at save {}", nth),
            ));
        }
        if self.fail_saves_for.iter().any(|id| ids_match(id, &user.id)) {
            return Err(AppError::database(
                "save user",
                anyhow::anyhow!("write rejected for {}", user.id),
            ));
        }
        UserRepository::save(&self.store, user).await
    }
}

/// Job repository whose writes always fail.
pub struct FailingJobRepository;

#[async_trait]
impl JobRepository for FailingJobRepository {
    async fn save(&self, _job: &JobPosting) -> AppResult<()> {
        Err(AppError::database("save job", anyhow::anyhow!("store unavailable")))
    }

    async fn list_by_poster(&self, _user_id: &str) -> AppResult<Vec<JobPosting>> {
        Ok(Vec::new())
    }
}
