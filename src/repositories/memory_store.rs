//! In-memory document store.
//!
//! Backs both repository traits with concurrent maps and can be
//! loaded from / written to a JSON snapshot file.

use std::io::Write;
use std::path::Path;

use anyhow::Context;
use async_trait::async_trait;
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{AppError, AppResult};
use crate::models::{JobPosting, NewUser, User};
use crate::repositories::{JobRepository, UserRepository};
use crate::utils::object_id;
use crate::utils::validate::{ids_match, normalize_id};

/// Serialized form of the whole store.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub users: Vec<User>,
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
}

/// Document store keyed by normalized document id.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: DashMap<String, User>,
    jobs: DashMap<String, JobPosting>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let store = Self::new();
        for user in snapshot.users {
            store.insert_user(user);
        }
        for job in snapshot.jobs {
            store.jobs.insert(normalize_id(&job.id), job);
        }
        store
    }

    /// Copies the current contents, ordered by id for stable output.
    pub fn snapshot(&self) -> Snapshot {
        let mut users: Vec<User> = self.users.iter().map(|e| e.value().clone()).collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        let mut jobs: Vec<JobPosting> = self.jobs.iter().map(|e| e.value().clone()).collect();
        jobs.sort_by(|a, b| a.id.cmp(&b.id));
        Snapshot { users, jobs }
    }

    /// Loads a snapshot file. A missing file yields an empty store.
    pub async fn load(path: &Path) -> AppResult<Self> {
        if !tokio::fs::try_exists(path)
            .await
            .map_err(|e| AppError::database("load snapshot", e))?
        {
            tracing::debug!(path = %path.display(), "Snapshot file absent, starting empty");
            return Ok(Self::new());
        }

        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("reading {}", path.display()))
            .map_err(|e| AppError::database("load snapshot", e))?;
        let snapshot: Snapshot = serde_json::from_str(&raw)
            .with_context(|| format!("parsing {}", path.display()))
            .map_err(|e| AppError::database("load snapshot", e))?;

        tracing::debug!(
            path = %path.display(),
            users = snapshot.users.len(),
            jobs = snapshot.jobs.len(),
            "Snapshot loaded"
        );
        Ok(Self::from_snapshot(snapshot))
    }

    /// Writes the current contents to `path`, creating parent directories.
    ///
    /// The snapshot is written to a temporary file next to `path` and renamed
    /// over it, so readers see either the old or the new snapshot.
    pub async fn persist(&self, path: &Path) -> AppResult<()> {
        let json = serde_json::to_vec_pretty(&self.snapshot())
            .map_err(|e| AppError::database("persist snapshot", e))?;
        let target = path.to_path_buf();
        tokio::task::spawn_blocking(move || write_replacing(&target, &json))
            .await
            .map_err(|e| AppError::database("persist snapshot", e))?
            .with_context(|| format!("writing {}", path.display()))
            .map_err(|e| AppError::database("persist snapshot", e))
    }

    /// Creates a user with a fresh document id.
    pub fn create_user(&self, new_user: NewUser) -> User {
        let user = User::new(object_id::generate(), new_user.username);
        self.insert_user(user.clone());
        user
    }

    pub fn insert_user(&self, user: User) {
        self.users.insert(normalize_id(&user.id), user);
    }

    pub fn user(&self, id: &str) -> Option<User> {
        self.users.get(&normalize_id(id)).map(|u| u.value().clone())
    }

    pub fn jobs(&self) -> Vec<JobPosting> {
        self.snapshot().jobs
    }
}

fn write_replacing(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let mut file = NamedTempFile::new_in(dir)?;
    file.write_all(bytes)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| e.error)?;
    Ok(())
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<User>> {
        Ok(self.user(id))
    }

    async fn save(&self, user: &User) -> AppResult<()> {
        self.insert_user(user.clone());
        Ok(())
    }
}

#[async_trait]
impl JobRepository for MemoryStore {
    async fn save(&self, job: &JobPosting) -> AppResult<()> {
        self.jobs.insert(normalize_id(&job.id), job.clone());
        Ok(())
    }

    async fn list_by_poster(&self, user_id: &str) -> AppResult<Vec<JobPosting>> {
        let mut jobs: Vec<JobPosting> = self
            .jobs
            .iter()
            .filter(|e| ids_match(&e.value().posted_by, user_id))
            .map(|e| e.value().clone())
            .collect();
        jobs.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.id.cmp(&b.id)));
        Ok(jobs)
    }
}
