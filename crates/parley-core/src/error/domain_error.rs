//! Error types for the domain layer

use thiserror::Error;

use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("user not found: {0}")]
    UserNotFound(Snowflake),

    #[error("guild not found: {0}")]
    GuildNotFound(Snowflake),

    #[error("channel not found: {0}")]
    ChannelNotFound(Snowflake),

    #[error("message not found: {0}")]
    MessageNotFound(Snowflake),

    #[error("role not found: {0}")]
    RoleNotFound(Snowflake),

    #[error("member not found in guild")]
    MemberNotFound,

    #[error("invite not found: {0}")]
    InviteNotFound(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("conflict: {0}")]
    Conflict(String),

    /// Store adapter fault that does not map to a missing entity
    #[error("storage error: {0}")]
    Storage(String),
}

impl DomainError {
    /// Check if this error means a referenced entity is absent
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::UserNotFound(_)
                | Self::GuildNotFound(_)
                | Self::ChannelNotFound(_)
                | Self::MessageNotFound(_)
                | Self::RoleNotFound(_)
                | Self::MemberNotFound
                | Self::InviteNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }
}
