//! Role hierarchy resolver
//!
//! Comparative authority and aggregate permission bitmasks over sets of
//! role ids.

use std::collections::HashSet;

use parley_core::{Permissions, Role, RoleStore, Snowflake};

use crate::error::GatewayResult;

/// Which end of the position order counts as the top of the hierarchy
///
/// The data model documents "higher position = more authority", so
/// `HighestPosition` is the default; `LowestPosition` keeps the inverted
/// reading available as a one-line switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HierarchyOrder {
    #[default]
    HighestPosition,
    LowestPosition,
}

/// Resolves authority questions against the role store
pub struct RoleHierarchy<'a> {
    roles: &'a dyn RoleStore,
    order: HierarchyOrder,
}

impl<'a> RoleHierarchy<'a> {
    /// Create a resolver over a role store
    #[must_use]
    pub fn new(roles: &'a dyn RoleStore, order: HierarchyOrder) -> Self {
        Self { roles, order }
    }

    /// OR of the stored bitmasks of all referenced roles
    ///
    /// Unknown or deleted role ids are ignored. The result is independent
    /// of the enumeration order of `role_ids`.
    pub async fn effective_permissions(
        &self,
        role_ids: &[Snowflake],
    ) -> GatewayResult<Permissions> {
        let roles = self.roles.find_many(role_ids).await?;
        Ok(Permissions::combine(roles.iter().map(|r| r.permissions)))
    }

    /// Whether set A holds the single most authoritative role of A ∪ B
    ///
    /// Used to prevent a member from managing another member who outranks
    /// them. Deterministic tie-break: position first, then role id. When
    /// the extreme role appears in both sets (or the union is empty),
    /// neither side is strictly superior and the answer is `false`.
    pub async fn is_higher(&self, a: &[Snowflake], b: &[Snowflake]) -> GatewayResult<bool> {
        let union: Vec<Snowflake> = a
            .iter()
            .chain(b.iter())
            .copied()
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();

        let roles = self.roles.find_many(&union).await?;

        let extreme = match self.order {
            HierarchyOrder::HighestPosition => roles.iter().max_by_key(Self::rank),
            HierarchyOrder::LowestPosition => roles.iter().min_by_key(Self::rank),
        };

        let Some(top) = extreme else {
            return Ok(false);
        };

        Ok(a.contains(&top.id) && !b.contains(&top.id))
    }

    fn rank(role: &&Role) -> (i32, Snowflake) {
        (role.position, role.id)
    }
}
