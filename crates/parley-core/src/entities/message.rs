//! Message entity - a chat message, mutable only by its author

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::Snowflake;

/// Link-preview metadata attached to a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Embed {
    pub title: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Embed {
    /// True when the lookup produced nothing usable
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.image_url.is_none()
    }
}

/// Message entity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Snowflake,
    pub channel_id: Snowflake,
    pub author_id: Snowflake,
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub embed: Option<Embed>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Message {
    /// Create a new Message
    pub fn new(
        id: Snowflake,
        channel_id: Snowflake,
        author_id: Snowflake,
        content: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            channel_id,
            author_id,
            content,
            embed: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check whether a user authored this message
    #[inline]
    pub fn is_author(&self, user_id: Snowflake) -> bool {
        self.author_id == user_id
    }

    /// Check if the message has been edited since creation
    #[inline]
    pub fn is_edited(&self) -> bool {
        self.updated_at > self.created_at
    }
}
