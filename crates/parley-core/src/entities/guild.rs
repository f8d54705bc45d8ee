//! Guild entity - a community grouping channels and members

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Guild entity
///
/// `roles` and `channels` are ordered id lists. The membership roster itself
/// lives in `GuildMember` rows plus each member's `User.guilds` projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Guild {
    pub id: Snowflake,
    pub name: String,
    pub owner_id: Snowflake,
    pub icon: Option<String>,
    /// Role ids in hierarchy order
    pub roles: Vec<Snowflake>,
    /// Channel ids in display order
    pub channels: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Guild {
    /// Create a new Guild
    pub fn new(id: Snowflake, name: String, owner_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            name,
            owner_id,
            icon: None,
            roles: Vec::new(),
            channels: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if a user is the guild owner
    #[inline]
    pub fn is_owner(&self, user_id: Snowflake) -> bool {
        self.owner_id == user_id
    }

    /// Check if a role belongs to this guild's ordered role list
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.roles.contains(&role_id)
    }
}
