//! Room fanout
//!
//! Delivers a named event to every connection joined to one or more target
//! rooms. Delivery is best-effort and asynchronous; no delivery
//! acknowledgement, no backpressure beyond the per-connection channel.

use std::collections::HashSet;
use std::sync::Arc;

use serde::Serialize;

use crate::protocol::{EventEnvelope, EventType};
use crate::registry::ConnectionRegistry;

/// Broadcast and unicast over the connection registry
#[derive(Clone)]
pub struct Fanout {
    registry: Arc<ConnectionRegistry>,
}

impl Fanout {
    /// Create a fanout over a registry
    #[must_use]
    pub fn new(registry: Arc<ConnectionRegistry>) -> Self {
        Self { registry }
    }

    /// Deliver an event to every connection joined to any of the rooms
    ///
    /// A connection joined to several target rooms receives exactly one
    /// copy. Returns the number of connections reached.
    pub async fn broadcast<T: Serialize>(
        &self,
        rooms: &[String],
        event: EventType,
        payload: &T,
    ) -> usize {
        let envelope = EventEnvelope::new(event, payload);

        let mut seen: HashSet<String> = HashSet::new();
        let mut sent = 0;

        for room in rooms {
            for connection in self.registry.members_of(room) {
                if !seen.insert(connection.id().to_string()) {
                    continue;
                }
                if connection.send(envelope.clone()).await.is_ok() {
                    sent += 1;
                }
            }
        }

        tracing::trace!(event = %event, rooms = rooms.len(), sent, "broadcast");

        sent
    }

    /// Unicast to one connection, used for direct replies and denials
    pub async fn emit_to<T: Serialize>(
        &self,
        connection_id: &str,
        event: EventType,
        payload: &T,
    ) -> bool {
        let Some(connection) = self.registry.get(connection_id) else {
            return false;
        };
        connection
            .send(EventEnvelope::new(event, payload))
            .await
            .is_ok()
    }
}
