//! In-memory store implementations

mod channel;
mod guild;
mod invite;
mod member;
mod message;
mod role;
mod user;

use std::sync::Arc;

pub use channel::MemoryChannelStore;
pub use guild::MemoryGuildStore;
pub use invite::MemoryInviteStore;
pub use member::MemoryMemberStore;
pub use message::MemoryMessageStore;
pub use role::MemoryRoleStore;
pub use user::MemoryUserStore;

/// Bundle of every store, shared behind `Arc` so the gateway and tests
/// can hand out trait objects from one place.
#[derive(Clone, Default)]
pub struct MemoryStores {
    pub users: Arc<MemoryUserStore>,
    pub guilds: Arc<MemoryGuildStore>,
    pub members: Arc<MemoryMemberStore>,
    pub roles: Arc<MemoryRoleStore>,
    pub channels: Arc<MemoryChannelStore>,
    pub messages: Arc<MemoryMessageStore>,
    pub invites: Arc<MemoryInviteStore>,
}

impl MemoryStores {
    /// Create an empty store bundle
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
