//! Channel entity - a text, voice, or DM destination for messages

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Closed channel type discriminant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChannelType {
    /// Guild text channel
    #[default]
    Text,
    /// Guild voice channel
    Voice,
    /// Direct message between exactly two users
    Dm,
}

/// Channel entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Channel {
    pub id: Snowflake,
    pub name: String,
    pub channel_type: ChannelType,
    /// Set for guild channels, absent for DMs
    pub guild_id: Option<Snowflake>,
    /// Exactly two user ids for DM channels, empty otherwise
    pub recipient_ids: Vec<Snowflake>,
    pub created_at: DateTime<Utc>,
}

impl Channel {
    /// Create a new guild text channel
    pub fn new_text(id: Snowflake, guild_id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            channel_type: ChannelType::Text,
            guild_id: Some(guild_id),
            recipient_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a new guild voice channel
    pub fn new_voice(id: Snowflake, guild_id: Snowflake, name: String) -> Self {
        Self {
            id,
            name,
            channel_type: ChannelType::Voice,
            guild_id: Some(guild_id),
            recipient_ids: Vec::new(),
            created_at: Utc::now(),
        }
    }

    /// Create a new DM channel between two users
    pub fn new_dm(id: Snowflake, a: Snowflake, b: Snowflake) -> Self {
        Self {
            id,
            name: String::new(),
            channel_type: ChannelType::Dm,
            guild_id: None,
            recipient_ids: vec![a, b],
            created_at: Utc::now(),
        }
    }

    /// Check if this is a DM channel
    #[inline]
    pub fn is_dm(&self) -> bool {
        self.channel_type == ChannelType::Dm
    }

    /// Check if a user is a DM recipient of this channel
    #[inline]
    pub fn has_recipient(&self, user_id: Snowflake) -> bool {
        self.recipient_ids.contains(&user_id)
    }
}
