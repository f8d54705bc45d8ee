//! Store traits (ports) for the external entity store

mod stores;

pub use stores::{
    ChannelStore, GuildStore, InviteStore, MemberStore, MessageStore, RoleStore, StoreResult,
    UserStore,
};
