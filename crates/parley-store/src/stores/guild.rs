//! In-memory implementation of GuildStore

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use tracing::instrument;

use parley_core::entities::Guild;
use parley_core::error::DomainError;
use parley_core::traits::{GuildStore, StoreResult};
use parley_core::value_objects::Snowflake;

/// In-memory implementation of GuildStore
#[derive(Default)]
pub struct MemoryGuildStore {
    guilds: DashMap<Snowflake, Guild>,
}

impl MemoryGuildStore {
    /// Create an empty MemoryGuildStore
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl GuildStore for MemoryGuildStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Guild>> {
        Ok(self.guilds.get(&id).map(|entry| entry.clone()))
    }

    #[instrument(skip(self, guild), fields(guild_id = %guild.id))]
    async fn create(&self, guild: &Guild) -> StoreResult<()> {
        if self.guilds.contains_key(&guild.id) {
            return Err(DomainError::Conflict(format!(
                "guild {} already exists",
                guild.id
            )));
        }
        self.guilds.insert(guild.id, guild.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn push_role(&self, guild_id: Snowflake, role_id: Snowflake) -> StoreResult<()> {
        let mut entry = self
            .guilds
            .get_mut(&guild_id)
            .ok_or(DomainError::GuildNotFound(guild_id))?;

        if !entry.roles.contains(&role_id) {
            entry.roles.push(role_id);
            entry.updated_at = Utc::now();
        }

        Ok(())
    }
}
