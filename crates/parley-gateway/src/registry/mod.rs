//! Connection registry
//!
//! Tracks live connections, their bound identities, and room membership.

mod connection;
mod registry;

pub use connection::Connection;
pub use registry::ConnectionRegistry;
