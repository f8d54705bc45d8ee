//! # parley-core
//!
//! Domain layer containing entities, value objects, store traits, and domain
//! errors. This crate has zero dependencies on infrastructure (storage
//! engine, web framework, etc.).

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    Channel, ChannelType, Embed, Guild, GuildMember, Invite, Message, Role, User, UserPatch,
    UserStatus, generate_invite_code,
};
pub use error::DomainError;
pub use traits::{
    ChannelStore, GuildStore, InviteStore, MemberStore, MessageStore, RoleStore, StoreResult,
    UserStore,
};
pub use value_objects::{Permissions, Snowflake, SnowflakeGenerator, SnowflakeParseError};
