//! In-memory implementation of RoleStore

use async_trait::async_trait;
use dashmap::DashMap;
use tracing::instrument;

use parley_core::entities::Role;
use parley_core::error::DomainError;
use parley_core::traits::{RoleStore, StoreResult};
use parley_core::value_objects::Snowflake;

/// In-memory implementation of RoleStore
#[derive(Default)]
pub struct MemoryRoleStore {
    roles: DashMap<Snowflake, Role>,
}

impl MemoryRoleStore {
    /// Create an empty MemoryRoleStore
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RoleStore for MemoryRoleStore {
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Role>> {
        Ok(self.roles.get(&id).map(|entry| entry.clone()))
    }

    async fn find_many(&self, ids: &[Snowflake]) -> StoreResult<Vec<Role>> {
        // Unknown ids are skipped rather than failing the whole lookup;
        // stale references in member rows must not wedge permission checks.
        Ok(ids
            .iter()
            .filter_map(|id| self.roles.get(id).map(|entry| entry.clone()))
            .collect())
    }

    #[instrument(skip(self, role), fields(role_id = %role.id))]
    async fn create(&self, role: &Role) -> StoreResult<()> {
        if self.roles.contains_key(&role.id) {
            return Err(DomainError::Conflict(format!(
                "role {} already exists",
                role.id
            )));
        }
        self.roles.insert(role.id, role.clone());
        Ok(())
    }
}
