//! # parley-gateway
//!
//! Realtime event gateway: dispatch, authorization, and room fanout for
//! long-lived connections.
//!
//! ## Overview
//!
//! A connection sends an event envelope `{name, payload}`; the dispatcher
//! routes it to its handler; the handler authorizes through the guard,
//! mutates state through the entity stores, and announces the result
//! through room fanout. The connection registry underlies fanout and is
//! updated directly by handlers that change membership.

pub mod context;
pub mod dispatch;
pub mod error;
pub mod fanout;
pub mod guard;
pub mod handlers;
pub mod hierarchy;
pub mod preview;
pub mod protocol;
pub mod registry;
pub mod server;

pub use context::{GatewayContext, GatewayContextBuilder, GatewayPolicies, RemovalPrecondition};
pub use dispatch::{Dispatcher, EventHandler, RegistrationError};
pub use error::{GatewayError, GatewayResult};
pub use fanout::Fanout;
pub use guard::Guard;
pub use hierarchy::{HierarchyOrder, RoleHierarchy};
pub use preview::{HttpLinkPreview, LinkPreview};
pub use protocol::{ErrorPayload, EventEnvelope, EventType};
pub use registry::{Connection, ConnectionRegistry};
