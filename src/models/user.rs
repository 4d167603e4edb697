use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use crate::utils::validate::ids_match;

/// User document as stored in the document store.
///
/// `following` and `followers` are the two denormalized halves of every
/// follow edge touching this user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    #[serde(default)]
    pub following: Vec<String>,
    #[serde(default)]
    pub followers: Vec<String>,
    pub created_at: Timestamp,
}

impl User {
    pub fn new(id: impl Into<String>, username: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: username.into(),
            following: Vec::new(),
            followers: Vec::new(),
            created_at: Timestamp::now(),
        }
    }

    pub fn is_following(&self, user_id: &str) -> bool {
        self.following.iter().any(|id| ids_match(id, user_id))
    }

    pub fn has_follower(&self, user_id: &str) -> bool {
        self.followers.iter().any(|id| ids_match(id, user_id))
    }
}

/// NewUser carries the fields supplied when seeding a user.
#[derive(Debug, Clone, Deserialize)]
pub struct NewUser {
    pub username: String,
}
