//! Gateway event names
//!
//! One name per supported inbound or outbound event.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Gateway event types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Identify reply: user snapshot plus joined guild/channel rooms
    Ready,
    /// User removed from a guild (kick or self-removal)
    GuildMemberRemove,
    /// Role created in a guild
    GuildRoleCreate,
    /// Message edited
    MessageUpdate,
    /// Friend relationship removed from both sides
    RemoveFriend,
    /// Profile fields updated
    UserUpdate,
    /// Outbound only: tells the departing connection which guild it left
    GuildLeave,
    /// Outbound only: error response to the originating connection
    Error,
}

impl EventType {
    /// Get the string representation of the event type
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ready => "READY",
            Self::GuildMemberRemove => "GUILD_MEMBER_REMOVE",
            Self::GuildRoleCreate => "GUILD_ROLE_CREATE",
            Self::MessageUpdate => "MESSAGE_UPDATE",
            Self::RemoveFriend => "REMOVE_FRIEND",
            Self::UserUpdate => "USER_UPDATE",
            Self::GuildLeave => "GUILD_LEAVE",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for EventType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
