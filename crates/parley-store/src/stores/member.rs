//! In-memory implementation of MemberStore

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use parley_core::entities::GuildMember;
use parley_core::error::DomainError;
use parley_core::traits::{MemberStore, StoreResult};
use parley_core::value_objects::Snowflake;

/// In-memory implementation of MemberStore, keyed by (guild, user)
#[derive(Default)]
pub struct MemoryMemberStore {
    members: DashMap<(Snowflake, Snowflake), GuildMember>,
}

impl MemoryMemberStore {
    /// Create an empty MemoryMemberStore
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MemberStore for MemoryMemberStore {
    async fn find(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> StoreResult<Option<GuildMember>> {
        Ok(self
            .members
            .get(&(guild_id, user_id))
            .map(|entry| entry.clone()))
    }

    async fn exists(&self, guild_id: Snowflake, user_id: Snowflake) -> StoreResult<bool> {
        Ok(self.members.contains_key(&(guild_id, user_id)))
    }

    #[instrument(skip(self, member), fields(guild_id = %member.guild_id, user_id = %member.user_id))]
    async fn create(&self, member: &GuildMember) -> StoreResult<()> {
        let key = (member.guild_id, member.user_id);
        if self.members.contains_key(&key) {
            return Err(DomainError::Conflict(format!(
                "user {} is already a member of guild {}",
                member.user_id, member.guild_id
            )));
        }
        self.members.insert(key, member.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, guild_id: Snowflake, user_id: Snowflake) -> StoreResult<()> {
        self.members.remove(&(guild_id, user_id));
        Ok(())
    }
}
