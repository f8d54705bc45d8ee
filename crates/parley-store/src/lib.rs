//! # parley-store
//!
//! Entity store layer implementing the store traits from `parley-core`
//! over concurrent in-memory maps.
//!
//! ## Overview
//!
//! Each store keeps one `DashMap` keyed by the entity's ID (or code, for
//! invites). Atomicity is per document: array push/pull primitives take the
//! entry's write lock for the duration of the mutation, so concurrent
//! writers never clobber each other's elements.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use parley_store::MemoryStores;
//!
//! let stores = MemoryStores::new();
//! // stores.users, stores.guilds, ... implement the parley-core traits
//! ```

pub mod stores;

pub use stores::{
    MemoryChannelStore, MemoryGuildStore, MemoryInviteStore, MemoryMemberStore,
    MemoryMessageStore, MemoryRoleStore, MemoryStores, MemoryUserStore,
};
