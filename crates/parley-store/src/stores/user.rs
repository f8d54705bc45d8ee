//! In-memory implementation of UserStore

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::instrument;

use parley_core::entities::{User, UserPatch};
use parley_core::error::DomainError;
use parley_core::traits::{StoreResult, UserStore};
use parley_core::value_objects::Snowflake;

/// In-memory implementation of UserStore
///
/// Mutating primitives hold the entry's write lock for the whole mutation,
/// so push/pull on the same document serialize instead of clobbering.
#[derive(Default)]
pub struct MemoryUserStore {
    users: DashMap<Snowflake, User>,
}

impl MemoryUserStore {
    /// Create an empty MemoryUserStore
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.clone()))
    }

    #[instrument(skip(self, user), fields(user_id = %user.id))]
    async fn create(&self, user: &User) -> StoreResult<()> {
        if self.users.contains_key(&user.id) {
            return Err(DomainError::Conflict(format!(
                "user {} already exists",
                user.id
            )));
        }
        self.users.insert(user.id, user.clone());
        Ok(())
    }

    #[instrument(skip(self, patch))]
    async fn apply_patch(&self, id: Snowflake, patch: &UserPatch) -> StoreResult<()> {
        let mut entry = self
            .users
            .get_mut(&id)
            .ok_or(DomainError::UserNotFound(id))?;

        if let Some(username) = &patch.username {
            entry.username = username.clone();
        }
        if let Some(avatar) = &patch.avatar {
            entry.avatar = Some(avatar.clone());
        }
        if let Some(status) = patch.status {
            entry.status = status;
        }
        if let Some(guilds) = &patch.guilds {
            entry.guilds = guilds.clone();
        }
        entry.updated_at = Utc::now();

        Ok(())
    }

    #[instrument(skip(self))]
    async fn push_guild(&self, user_id: Snowflake, guild_id: Snowflake) -> StoreResult<()> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or(DomainError::UserNotFound(user_id))?;

        if !entry.guilds.contains(&guild_id) {
            entry.guilds.push(guild_id);
            entry.updated_at = Utc::now();
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn pull_guild(&self, user_id: Snowflake, guild_id: Snowflake) -> StoreResult<()> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or(DomainError::UserNotFound(user_id))?;

        let before = entry.guilds.len();
        entry.guilds.retain(|id| *id != guild_id);
        if entry.guilds.len() != before {
            entry.updated_at = Utc::now();
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn pull_friend(&self, user_id: Snowflake, friend_id: Snowflake) -> StoreResult<bool> {
        let mut entry = self
            .users
            .get_mut(&user_id)
            .ok_or(DomainError::UserNotFound(user_id))?;

        let before = entry.friends.len();
        entry.friends.retain(|id| *id != friend_id);
        let removed = entry.friends.len() != before;
        if removed {
            entry.updated_at = Utc::now();
        }

        Ok(removed)
    }
}
