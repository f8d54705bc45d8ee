//! Guild member entity - a user's membership row in one guild

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Guild member row, keyed by `(guild_id, user_id)`
///
/// Created when an invite is accepted, deleted on removal. Must stay
/// consistent with the owning user's `guilds` projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuildMember {
    pub guild_id: Snowflake,
    pub user_id: Snowflake,
    pub role_ids: Vec<Snowflake>,
    pub joined_at: DateTime<Utc>,
}

impl GuildMember {
    /// Create a new member row
    pub fn new(guild_id: Snowflake, user_id: Snowflake) -> Self {
        Self {
            guild_id,
            user_id,
            role_ids: Vec::new(),
            joined_at: Utc::now(),
        }
    }

    /// Check if the member holds a specific role
    #[inline]
    pub fn has_role(&self, role_id: Snowflake) -> bool {
        self.role_ids.contains(&role_id)
    }
}
