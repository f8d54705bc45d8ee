//! User entity - a platform account

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Presence status of a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UserStatus {
    #[default]
    Online,
    Away,
    Busy,
    Offline,
}

/// User entity
///
/// `guilds` is the user-side projection of guild membership and must stay
/// consistent with the `GuildMember` rows for the same user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Snowflake,
    pub username: String,
    pub avatar: Option<String>,
    pub status: UserStatus,
    pub bot: bool,
    /// Ordered list of guilds the user belongs to
    pub guilds: Vec<Snowflake>,
    pub friends: Vec<Snowflake>,
    pub friend_requests: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new User with required fields
    pub fn new(id: Snowflake, username: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            username,
            avatar: None,
            status: UserStatus::Online,
            bot: false,
            guilds: Vec::new(),
            friends: Vec::new(),
            friend_requests: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Check membership in a guild (user-side projection)
    #[inline]
    pub fn is_in_guild(&self, guild_id: Snowflake) -> bool {
        self.guilds.contains(&guild_id)
    }

    /// Check friendship with another user
    #[inline]
    pub fn is_friend_of(&self, user_id: Snowflake) -> bool {
        self.friends.contains(&user_id)
    }

    /// Check if the account is a bot
    #[inline]
    pub fn is_bot(&self) -> bool {
        self.bot
    }
}

/// Partial update applied to a user through the profile-update path
///
/// Only the fields a user may change about themselves. Guild membership is
/// deliberately not mutable here beyond reordering; the length check happens
/// in the handler before the patch is applied.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPatch {
    pub username: Option<String>,
    pub avatar: Option<String>,
    pub status: Option<UserStatus>,
    pub guilds: Option<Vec<Snowflake>>,
}

impl UserPatch {
    /// True when the patch changes nothing
    pub fn is_empty(&self) -> bool {
        self.username.is_none()
            && self.avatar.is_none()
            && self.status.is_none()
            && self.guilds.is_none()
    }
}
