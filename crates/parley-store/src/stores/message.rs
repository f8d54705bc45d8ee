//! In-memory implementation of MessageStore

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use parley_core::entities::Message;
use parley_core::error::DomainError;
use parley_core::traits::{MessageStore, StoreResult};
use parley_core::value_objects::Snowflake;

/// In-memory implementation of MessageStore
#[derive(Default)]
pub struct MemoryMessageStore {
    messages: DashMap<Snowflake, Message>,
}

impl MemoryMessageStore {
    /// Create an empty MemoryMessageStore
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MessageStore for MemoryMessageStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Message>> {
        Ok(self.messages.get(&id).map(|entry| entry.clone()))
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn create(&self, message: &Message) -> StoreResult<()> {
        if self.messages.contains_key(&message.id) {
            return Err(DomainError::Conflict(format!(
                "message {} already exists",
                message.id
            )));
        }
        self.messages.insert(message.id, message.clone());
        Ok(())
    }

    #[instrument(skip(self, message), fields(message_id = %message.id))]
    async fn update(&self, message: &Message) -> StoreResult<()> {
        let mut entry = self
            .messages
            .get_mut(&message.id)
            .ok_or(DomainError::MessageNotFound(message.id))?;
        *entry = message.clone();
        Ok(())
    }
}
