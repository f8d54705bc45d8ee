//! Individual gateway connection

use std::sync::Arc;

use parking_lot::RwLock;
use parley_core::Snowflake;
use tokio::sync::mpsc;

use crate::protocol::EventEnvelope;

/// A single live connection
///
/// Outbound delivery goes through the mpsc sender; a dedicated send task on
/// the other end owns the transport sink. The identity binding is never
/// treated as long-lived trust: guarded actions re-validate the session
/// token on every call.
pub struct Connection {
    /// Unique connection ID, also usable as a room id for direct replies
    id: String,

    /// Bound user identity (None until the first successful key decode)
    user_id: RwLock<Option<Snowflake>>,

    /// Channel to the connection's send task
    sender: mpsc::Sender<EventEnvelope>,
}

impl Connection {
    /// Create a new connection
    pub fn new(id: String, sender: mpsc::Sender<EventEnvelope>) -> Arc<Self> {
        Arc::new(Self {
            id,
            user_id: RwLock::new(None),
            sender,
        })
    }

    /// Get the connection ID
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Get the bound user ID, if identified
    pub fn user_id(&self) -> Option<Snowflake> {
        *self.user_id.read()
    }

    /// Bind the connection to an authenticated identity (idempotent)
    pub fn bind(&self, user_id: Snowflake) {
        *self.user_id.write() = Some(user_id);
    }

    /// Drop the identity binding
    pub fn unbind(&self) {
        *self.user_id.write() = None;
    }

    /// Check whether an identity is bound
    pub fn is_identified(&self) -> bool {
        self.user_id.read().is_some()
    }

    /// Send an envelope to this connection, best-effort
    pub async fn send(
        &self,
        envelope: EventEnvelope,
    ) -> Result<(), mpsc::error::SendError<EventEnvelope>> {
        self.sender.send(envelope).await
    }

    /// Check if the send task has gone away
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }
}

impl std::fmt::Debug for Connection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Connection")
            .field("id", &self.id)
            .field("user_id", &*self.user_id.read())
            .finish()
    }
}
