//! Store traits (ports) - the interface the core expects from the entity store
//!
//! The persistent engine behind these traits is an external collaborator.
//! Every mutating primitive is atomic at single-document granularity; nothing
//! here spans documents transactionally. Array mutations are expressed as
//! push/pull primitives rather than read-modify-write so concurrent writers
//! cannot clobber each other's elements.

use async_trait::async_trait;

use crate::entities::{Channel, Guild, GuildMember, Invite, Message, Role, User, UserPatch};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for store operations
pub type StoreResult<T> = Result<T, DomainError>;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<User>>;

    /// Create a new user
    async fn create(&self, user: &User) -> StoreResult<()>;

    /// Apply a field-level partial update to a user
    async fn apply_patch(&self, id: Snowflake, patch: &UserPatch) -> StoreResult<()>;

    /// Atomically append a guild to the user's `guilds` projection
    async fn push_guild(&self, user_id: Snowflake, guild_id: Snowflake) -> StoreResult<()>;

    /// Atomically remove a guild from the user's `guilds` projection
    async fn pull_guild(&self, user_id: Snowflake, guild_id: Snowflake) -> StoreResult<()>;

    /// Atomically remove a friend from the user's `friends` list
    ///
    /// Returns whether the entry was present. Pulling an absent friend is a
    /// no-op, which keeps friend removal idempotent.
    async fn pull_friend(&self, user_id: Snowflake, friend_id: Snowflake) -> StoreResult<bool>;
}

#[async_trait]
pub trait GuildStore: Send + Sync {
    /// Find a guild by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Guild>>;

    /// Create a new guild
    async fn create(&self, guild: &Guild) -> StoreResult<()>;

    /// Atomically append a role id to the guild's ordered role list
    async fn push_role(&self, guild_id: Snowflake, role_id: Snowflake) -> StoreResult<()>;
}

#[async_trait]
pub trait MemberStore: Send + Sync {
    /// Find a member row by guild and user ID
    async fn find(&self, guild_id: Snowflake, user_id: Snowflake)
        -> StoreResult<Option<GuildMember>>;

    /// Check whether a member row exists
    async fn exists(&self, guild_id: Snowflake, user_id: Snowflake) -> StoreResult<bool>;

    /// Create a member row
    async fn create(&self, member: &GuildMember) -> StoreResult<()>;

    /// Delete a member row; deleting an absent row is a no-op
    async fn delete(&self, guild_id: Snowflake, user_id: Snowflake) -> StoreResult<()>;
}

#[async_trait]
pub trait RoleStore: Send + Sync {
    /// Find a role by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Role>>;

    /// Resolve a set of role ids; unknown or deleted ids are skipped
    async fn find_many(&self, ids: &[Snowflake]) -> StoreResult<Vec<Role>>;

    /// Create a new role
    async fn create(&self, role: &Role) -> StoreResult<()>;
}

#[async_trait]
pub trait ChannelStore: Send + Sync {
    /// Find a channel by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Channel>>;

    /// List channels belonging to a guild
    async fn find_by_guild(&self, guild_id: Snowflake) -> StoreResult<Vec<Channel>>;

    /// Create a new channel
    async fn create(&self, channel: &Channel) -> StoreResult<()>;
}

#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Find a message by ID
    async fn find_by_id(&self, id: Snowflake) -> StoreResult<Option<Message>>;

    /// Create a new message
    async fn create(&self, message: &Message) -> StoreResult<()>;

    /// Replace a message document (content, embed, updated timestamp)
    async fn update(&self, message: &Message) -> StoreResult<()>;
}

#[async_trait]
pub trait InviteStore: Send + Sync {
    /// Find an invite by its code
    async fn find_by_code(&self, code: &str) -> StoreResult<Option<Invite>>;

    /// Create a new invite
    async fn create(&self, invite: &Invite) -> StoreResult<()>;

    /// Atomically increment the use count
    async fn increment_uses(&self, code: &str) -> StoreResult<()>;
}
