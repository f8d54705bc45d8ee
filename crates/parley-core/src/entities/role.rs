//! Role entity - a named, ordered permission grouping

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Permissions, Snowflake};

/// Role entity
///
/// Roles of one guild form a total order by `position`; a higher position
/// means more authority. Ties are tolerated but never expected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
    pub id: Snowflake,
    pub guild_id: Snowflake,
    pub name: String,
    pub position: i32,
    pub permissions: Permissions,
    pub mentionable: bool,
    pub hoisted: bool,
    pub created_at: DateTime<Utc>,
}

impl Role {
    /// Create a new Role
    pub fn new(
        id: Snowflake,
        guild_id: Snowflake,
        name: String,
        permissions: Permissions,
    ) -> Self {
        Self {
            id,
            guild_id,
            name,
            position: 1,
            permissions,
            mentionable: false,
            hoisted: false,
            created_at: Utc::now(),
        }
    }

    /// Check if this role grants a specific permission
    #[inline]
    pub fn grants(&self, permission: Permissions) -> bool {
        self.permissions.has(permission)
    }

    /// Compare positions for hierarchy (higher position = more authority)
    #[inline]
    pub fn outranks(&self, other: &Role) -> bool {
        self.position > other.position
    }
}
