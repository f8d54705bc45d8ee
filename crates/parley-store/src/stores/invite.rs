//! In-memory implementation of InviteStore

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use parley_core::entities::Invite;
use parley_core::error::DomainError;
use parley_core::traits::{InviteStore, StoreResult};

/// In-memory implementation of InviteStore, keyed by invite code
#[derive(Default)]
pub struct MemoryInviteStore {
    invites: DashMap<String, Invite>,
}

impl MemoryInviteStore {
    /// Create an empty MemoryInviteStore
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl InviteStore for MemoryInviteStore {
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Invite>> {
        Ok(self.invites.get(code).map(|entry| entry.clone()))
    }

    #[instrument(skip(self, invite), fields(code = %invite.code))]
    async fn create(&self, invite: &Invite) -> StoreResult<()> {
        if self.invites.contains_key(&invite.code) {
            return Err(DomainError::Conflict(format!(
                "invite {} already exists",
                invite.code
            )));
        }
        self.invites.insert(invite.code.clone(), invite.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn increment_uses(&self, code: &str) -> StoreResult<()> {
        let mut entry = self
            .invites
            .get_mut(code)
            .ok_or_else(|| DomainError::InviteNotFound(code.to_string()))?;
        entry.uses += 1;
        Ok(())
    }
}
