//! Event dispatcher
//!
//! Handler registry and invocation loop. The dispatch boundary is the
//! single recovery point: any handler error becomes an ERROR event to the
//! originating connection and never tears the connection down.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;

use crate::context::GatewayContext;
use crate::error::{GatewayError, GatewayResult};
use crate::protocol::{EventEnvelope, EventType};
use crate::registry::Connection;

/// A handler for one named event
#[async_trait]
pub trait EventHandler: Send + Sync {
    /// The event this handler owns
    fn name(&self) -> EventType;

    /// Process one inbound event
    async fn handle(
        &self,
        ctx: &GatewayContext,
        connection: &Arc<Connection>,
        payload: Value,
    ) -> GatewayResult<()>;
}

/// Deserialize an event payload into a handler's typed params
pub fn params<T: DeserializeOwned>(payload: Value) -> GatewayResult<T> {
    serde_json::from_value(payload)
        .map_err(|e| GatewayError::Validation(format!("invalid payload: {e}")))
}

/// Boot-time registration errors
#[derive(Debug, Error)]
pub enum RegistrationError {
    #[error("duplicate handler for event {0}")]
    Duplicate(EventType),
}

/// Routes inbound envelopes to their registered handlers
#[derive(Default)]
pub struct Dispatcher {
    handlers: HashMap<&'static str, Arc<dyn EventHandler>>,
}

impl Dispatcher {
    /// Create an empty dispatcher
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler; one handler per event name
    ///
    /// Duplicate registration is a configuration error, fatal at boot.
    pub fn register(&mut self, handler: Arc<dyn EventHandler>) -> Result<(), RegistrationError> {
        let name = handler.name();
        if self.handlers.insert(name.as_str(), handler).is_some() {
            return Err(RegistrationError::Duplicate(name));
        }
        Ok(())
    }

    /// Dispatch one inbound envelope
    ///
    /// Unknown names and handler failures of any kind are answered with an
    /// ERROR envelope to the originating connection only; other connections
    /// are never informed or affected.
    pub async fn dispatch(
        &self,
        ctx: &GatewayContext,
        connection: &Arc<Connection>,
        envelope: EventEnvelope,
    ) {
        let result = match self.handlers.get(envelope.name.as_str()) {
            Some(handler) => handler.handle(ctx, connection, envelope.payload).await,
            None => Err(GatewayError::Validation(format!(
                "unknown event: {}",
                envelope.name
            ))),
        };

        if let Err(err) = result {
            tracing::debug!(
                connection_id = %connection.id(),
                event = %envelope.name,
                code = err.code(),
                error = %err,
                "handler failed"
            );

            // Best-effort; a closed connection is cleaned up by its own task
            let _ = connection.send(EventEnvelope::error(&err)).await;
        }
    }

    /// Number of registered handlers
    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
