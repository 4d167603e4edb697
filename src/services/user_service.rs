//! Follow/unfollow relationships between users.
//!
//! A follow edge A→B is stored twice: in `A.following` and in
//! `B.followers`. Both halves are read, checked, and written together.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::models::User;
use crate::repositories::UserRepository;
use crate::utils::validate::ids_match;

/// How to treat an edge recorded on only one of its two sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InconsistentStatePolicy {
    /// Complete or clear the half-recorded edge.
    #[default]
    Repair,
    /// Refuse the mutation.
    Reject,
}

/// Business rules the relationship service enforces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RelationshipPolicy {
    pub allow_self_follow: bool,
    pub inconsistent_state: InconsistentStatePolicy,
}

/// Recorded state of the directed edge user→target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationshipState {
    NotFollowing,
    Following,
    /// Exactly one side of the edge is recorded.
    Inconsistent {
        following_recorded: bool,
        follower_recorded: bool,
    },
}

impl RelationshipState {
    pub fn classify(user: &User, target: &User) -> Self {
        match (user.is_following(&target.id), target.has_follower(&user.id)) {
            (true, true) => RelationshipState::Following,
            (false, false) => RelationshipState::NotFollowing,
            (following_recorded, follower_recorded) => RelationshipState::Inconsistent {
                following_recorded,
                follower_recorded,
            },
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Follow,
    Unfollow,
}

impl Action {
    fn verb(self) -> &'static str {
        match self {
            Action::Follow => "follow",
            Action::Unfollow => "unfollow",
        }
    }
}

/// User relationship service for follow/unfollow business logic.
#[derive(Clone)]
pub struct UserRelationshipService {
    users: Arc<dyn UserRepository>,
    policy: RelationshipPolicy,
}

impl UserRelationshipService {
    /// Creates a new UserRelationshipService with the given repository and policy.
    pub fn new(users: Arc<dyn UserRepository>, policy: RelationshipPolicy) -> Self {
        Self { users, policy }
    }

    /// Records that `user_id` follows `follow_id`.
    ///
    /// # Errors
    /// `BadRequest` (400) for a missing id, an unknown user, a self-follow
    /// (unless allowed), an existing edge, or an inconsistent edge under the
    /// `Reject` policy. Store errors propagate unchanged.
    pub async fn follow_user(&self, user_id: Option<&str>, follow_id: Option<&str>) -> AppResult<()> {
        tracing::info!(
            "Follow request received by {} for {}",
            user_id.unwrap_or("<missing>"),
            follow_id.unwrap_or("<missing>")
        );

        let (user_id, follow_id) = require_ids(Action::Follow, user_id, follow_id)?;
        if !self.policy.allow_self_follow && ids_match(user_id, follow_id) {
            return Err(AppError::bad_request(
                "Failed to follow, you cannot follow yourself",
            ));
        }

        let (mut user, mut target) = self.load_pair(Action::Follow, user_id, follow_id).await?;
        let previous = (user.clone(), target.clone());

        match RelationshipState::classify(&user, &target) {
            RelationshipState::Following => {
                return Err(AppError::bad_request(
                    "Failed to follow user: Already following",
                ));
            }
            state @ RelationshipState::Inconsistent { .. } => {
                self.check_inconsistent(Action::Follow, state, &user, &target)?;
            }
            RelationshipState::NotFollowing => {}
        }

        if !user.is_following(&target.id) {
            user.following.push(target.id.clone());
        }
        if !target.has_follower(&user.id) {
            target.followers.push(user.id.clone());
        }

        self.persist_pair(user, target, previous).await?;

        tracing::info!(
            user_id = %user_id,
            target_id = %follow_id,
            "User {} successfully followed user {}",
            user_id,
            follow_id
        );
        Ok(())
    }

    /// Removes the edge `user_id` → `target_id`.
    ///
    /// Every occurrence of the other id is dropped from both lists.
    pub async fn unfollow_user(&self, user_id: Option<&str>, target_id: Option<&str>) -> AppResult<()> {
        tracing::info!(
            "Unfollow request received by {} for {}",
            user_id.unwrap_or("<missing>"),
            target_id.unwrap_or("<missing>")
        );

        let (user_id, target_id) = require_ids(Action::Unfollow, user_id, target_id)?;
        let (mut user, mut target) = self.load_pair(Action::Unfollow, user_id, target_id).await?;
        let previous = (user.clone(), target.clone());

        match RelationshipState::classify(&user, &target) {
            RelationshipState::NotFollowing => {
                return Err(AppError::bad_request(
                    "Failed to unfollow user: You are not following them",
                ));
            }
            state @ RelationshipState::Inconsistent { .. } => {
                self.check_inconsistent(Action::Unfollow, state, &user, &target)?;
            }
            RelationshipState::Following => {}
        }

        user.following.retain(|id| !ids_match(id, &target.id));
        target.followers.retain(|id| !ids_match(id, &user.id));

        self.persist_pair(user, target, previous).await?;

        tracing::info!(
            user_id = %user_id,
            target_id = %target_id,
            "User {} successfully unfollowed user {}",
            user_id,
            target_id
        );
        Ok(())
    }

    async fn load_pair(&self, action: Action, user_id: &str, target_id: &str) -> AppResult<(User, User)> {
        let (target, user) = futures::try_join!(
            self.users.find_by_id(target_id),
            self.users.find_by_id(user_id)
        )?;

        match (user, target) {
            (Some(user), Some(target)) => Ok((user, target)),
            _ => Err(AppError::bad_request(format!(
                "Failed to {}, user is not found",
                action.verb()
            ))),
        }
    }

    fn check_inconsistent(
        &self,
        action: Action,
        state: RelationshipState,
        user: &User,
        target: &User,
    ) -> AppResult<()> {
        match self.policy.inconsistent_state {
            InconsistentStatePolicy::Reject => Err(AppError::bad_request(format!(
                "Failed to {} user: relationship records are inconsistent",
                action.verb()
            ))),
            InconsistentStatePolicy::Repair => {
                tracing::warn!(
                    user_id = %user.id,
                    target_id = %target.id,
                    ?state,
                    "Repairing half-recorded follow relationship during {}",
                    action.verb()
                );
                Ok(())
            }
        }
    }

    /// Writes both documents concurrently.
    ///
    /// When exactly one write fails, the document whose write succeeded is
    /// restored from `previous` before the error is returned.
    async fn persist_pair(&self, user: User, target: User, previous: (User, User)) -> AppResult<()> {
        if ids_match(&user.id, &target.id) {
            // Self edge: both halves live on one document.
            let merged = User {
                followers: target.followers,
                ..user
            };
            return self.users.save(&merged).await;
        }

        let (user_saved, target_saved) =
            futures::join!(self.users.save(&user), self.users.save(&target));
        let (user_before, target_before) = previous;

        match (user_saved, target_saved) {
            (Ok(()), Ok(())) => Ok(()),
            (Ok(()), Err(err)) => {
                self.rollback(&user_before).await;
                Err(err)
            }
            (Err(err), Ok(())) => {
                self.rollback(&target_before).await;
                Err(err)
            }
            (Err(err), Err(other)) => {
                tracing::error!(
                    user_id = %user.id,
                    target_id = %target.id,
                    error = %other,
                    "Both relationship writes failed"
                );
                Err(err)
            }
        }
    }

    async fn rollback(&self, snapshot: &User) {
        match self.users.save(snapshot).await {
            Ok(()) => tracing::warn!(user_id = %snapshot.id, "Rolled back relationship write"),
            Err(err) => tracing::error!(
                user_id = %snapshot.id,
                error = %err,
                "Rollback failed, relationship lists may be asymmetric"
            ),
        }
    }
}

fn require_ids<'a>(
    action: Action,
    user_id: Option<&'a str>,
    target_id: Option<&'a str>,
) -> AppResult<(&'a str, &'a str)> {
    let present = |id: Option<&'a str>| id.filter(|s| !s.trim().is_empty());
    match (present(user_id), present(target_id)) {
        (Some(user_id), Some(target_id)) => Ok((user_id, target_id)),
        _ => Err(AppError::bad_request(format!(
            "Failed to {}, user id is not found",
            action.verb()
        ))),
    }
}
