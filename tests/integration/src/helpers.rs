//! Test harness for dispatch-level gateway tests
//!
//! Exercises the real dispatcher and handlers against the in-memory stores,
//! with channel-backed connections standing in for sockets.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::mpsc;

use parley_common::SessionTokens;
use parley_core::{Embed, Snowflake, SnowflakeGenerator};
use parley_gateway::{
    handlers::build_dispatcher, Connection, ConnectionRegistry, Dispatcher, EventEnvelope,
    GatewayContext, GatewayContextBuilder, GatewayPolicies, LinkPreview,
};
use parley_store::MemoryStores;

/// Secret used by every test token service
const TEST_SECRET: &str = "integration-test-secret";

/// Outbound channel capacity per test connection
const BUFFER: usize = 64;

/// Link preview double that always fails, like an unreachable lookup
pub struct FailingPreview;

#[async_trait]
impl LinkPreview for FailingPreview {
    async fn fetch_preview(&self, _url: &str) -> Option<Embed> {
        None
    }
}

/// Link preview double that returns a fixed embed
pub struct StaticPreview(pub Embed);

#[async_trait]
impl LinkPreview for StaticPreview {
    async fn fetch_preview(&self, _url: &str) -> Option<Embed> {
        Some(self.0.clone())
    }
}

/// In-process gateway: stores, registry, dispatcher, token service
pub struct TestGateway {
    pub stores: MemoryStores,
    pub ctx: Arc<GatewayContext>,
    pub dispatcher: Dispatcher,
    tokens: SessionTokens,
}

impl TestGateway {
    /// Harness with default policies and a failing link preview
    pub fn new() -> Self {
        Self::with(GatewayPolicies::default(), Arc::new(FailingPreview))
    }

    /// Harness with explicit policies and preview double
    pub fn with(policies: GatewayPolicies, preview: Arc<dyn LinkPreview>) -> Self {
        let stores = MemoryStores::new();
        let registry = ConnectionRegistry::new_shared();
        let tokens = Arc::new(SessionTokens::new(TEST_SECRET, 3600));

        let ctx = GatewayContextBuilder::new()
            .users(stores.users.clone())
            .guilds(stores.guilds.clone())
            .members(stores.members.clone())
            .roles(stores.roles.clone())
            .channels(stores.channels.clone())
            .messages(stores.messages.clone())
            .registry(registry)
            .tokens(tokens)
            .snowflakes(Arc::new(SnowflakeGenerator::new(0)))
            .preview(preview)
            .policies(policies)
            .build()
            .expect("context wiring");

        let dispatcher = build_dispatcher().expect("handler registration");

        Self {
            stores,
            ctx: Arc::new(ctx),
            dispatcher,
            tokens: SessionTokens::new(TEST_SECRET, 3600),
        }
    }

    /// Register a channel-backed connection
    pub fn connect(&self, id: &str) -> (Arc<Connection>, mpsc::Receiver<EventEnvelope>) {
        let (tx, rx) = mpsc::channel(BUFFER);
        let connection = self.ctx.registry().add_connection(id.to_string(), tx);
        (connection, rx)
    }

    /// A connection already bound to a user and joined to its personal room
    pub fn connect_as(
        &self,
        id: &str,
        user_id: Snowflake,
    ) -> (Arc<Connection>, mpsc::Receiver<EventEnvelope>) {
        let (connection, rx) = self.connect(id);
        self.ctx.registry().bind(id, user_id);
        self.ctx.registry().join(id, &user_id.to_string());
        (connection, rx)
    }

    /// Dispatch one inbound event through the real dispatcher
    pub async fn send(&self, connection: &Arc<Connection>, name: &str, payload: Value) {
        self.dispatcher
            .dispatch(
                &self.ctx,
                connection,
                EventEnvelope {
                    name: name.to_string(),
                    payload,
                },
            )
            .await;
    }

    /// Issue a valid session token for a user
    pub fn issue_key(&self, user_id: Snowflake) -> String {
        self.tokens.issue(user_id).expect("token issue")
    }
}

impl Default for TestGateway {
    fn default() -> Self {
        Self::new()
    }
}

/// Pop the next buffered event, panicking when none arrived
pub fn recv_event(rx: &mut mpsc::Receiver<EventEnvelope>) -> EventEnvelope {
    rx.try_recv().expect("expected a buffered event")
}

/// Assert nothing was delivered to this connection
pub fn assert_no_event(rx: &mut mpsc::Receiver<EventEnvelope>) {
    assert!(rx.try_recv().is_err(), "unexpected event delivered");
}

/// Assert the next event is an ERROR with the given code
pub fn assert_error(rx: &mut mpsc::Receiver<EventEnvelope>, code: &str) {
    let envelope = recv_event(rx);
    assert_eq!(envelope.name, "ERROR");
    assert_eq!(envelope.payload["code"], code);
}
