//! In-memory implementation of ChannelStore

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use parley_core::entities::Channel;
use parley_core::error::DomainError;
use parley_core::traits::{ChannelStore, StoreResult};
use parley_core::value_objects::Snowflake;

/// In-memory implementation of ChannelStore
#[derive(Default)]
pub struct MemoryChannelStore {
    channels: DashMap<Snowflake, Channel>,
}

impl MemoryChannelStore {
    /// Create an empty MemoryChannelStore
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChannelStore for MemoryChannelStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Channel>> {
        Ok(self.channels.get(&id).map(|entry| entry.clone()))
    }

    async fn find_by_guild(&self, guild_id: Snowflake) -> StoreResult<Vec<Channel>> {
        let mut channels: Vec<Channel> = self
            .channels
            .iter()
            .filter(|entry| entry.guild_id == Some(guild_id))
            .map(|entry| entry.clone())
            .collect();
        // DashMap iteration order is arbitrary
        channels.sort_by_key(|channel| channel.id);
        Ok(channels)
    }

    #[instrument(skip(self, channel), fields(channel_id = %channel.id))]
    async fn create(&self, channel: &Channel) -> StoreResult<()> {
        if self.channels.contains_key(&channel.id) {
            return Err(DomainError::Conflict(format!(
                "channel {} already exists",
                channel.id
            )));
        }
        self.channels.insert(channel.id, channel.clone());
        Ok(())
    }
}
