//! Connection registry
//!
//! Room ids are opaque strings; by convention a room id equals a guild id,
//! a channel id, a user id, or a connection id. The registry never
//! interprets the namespace.

use std::collections::HashSet;
use std::sync::Arc;

use dashmap::DashMap;
use parley_core::Snowflake;
use tokio::sync::mpsc;

use super::Connection;
use crate::protocol::EventEnvelope;

/// Tracks live connections and room membership
pub struct ConnectionRegistry {
    /// Active connections by connection ID
    connections: DashMap<String, Arc<Connection>>,

    /// Room ID to connection IDs
    rooms: DashMap<String, HashSet<String>>,

    /// Connection ID to room IDs, for disconnect cleanup
    connection_rooms: DashMap<String, HashSet<String>>,
}

impl ConnectionRegistry {
    /// Create an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
            rooms: DashMap::new(),
            connection_rooms: DashMap::new(),
        }
    }

    /// Create a registry wrapped in Arc
    #[must_use]
    pub fn new_shared() -> Arc<Self> {
        Arc::new(Self::new())
    }

    /// Register a new connection
    pub fn add_connection(
        &self,
        connection_id: String,
        sender: mpsc::Sender<EventEnvelope>,
    ) -> Arc<Connection> {
        let connection = Connection::new(connection_id.clone(), sender);
        self.connections
            .insert(connection_id.clone(), connection.clone());

        tracing::debug!(connection_id = %connection_id, "connection added");

        connection
    }

    /// Get a connection by ID
    pub fn get(&self, connection_id: &str) -> Option<Arc<Connection>> {
        self.connections.get(connection_id).map(|r| r.clone())
    }

    /// Bind a connection to an authenticated identity (idempotent)
    pub fn bind(&self, connection_id: &str, user_id: Snowflake) -> bool {
        if let Some(connection) = self.connections.get(connection_id) {
            connection.bind(user_id);
            tracing::debug!(
                connection_id = %connection_id,
                user_id = %user_id,
                "connection identified"
            );
            true
        } else {
            false
        }
    }

    /// Get the identity bound to a connection
    pub fn user_of(&self, connection_id: &str) -> Option<Snowflake> {
        self.connections
            .get(connection_id)
            .and_then(|conn| conn.user_id())
    }

    /// Join a connection to a room
    pub fn join(&self, connection_id: &str, room_id: &str) -> bool {
        if !self.connections.contains_key(connection_id) {
            return false;
        }

        self.rooms
            .entry(room_id.to_string())
            .or_default()
            .insert(connection_id.to_string());
        self.connection_rooms
            .entry(connection_id.to_string())
            .or_default()
            .insert(room_id.to_string());

        tracing::trace!(connection_id = %connection_id, room_id = %room_id, "joined room");

        true
    }

    /// Remove a connection from a room; leaving a never-joined room is a no-op
    pub fn leave(&self, connection_id: &str, room_id: &str) {
        self.rooms.alter(room_id, |_, mut members| {
            members.remove(connection_id);
            members
        });
        self.rooms.retain(|_, members| !members.is_empty());

        self.connection_rooms.alter(connection_id, |_, mut rooms| {
            rooms.remove(room_id);
            rooms
        });
        self.connection_rooms.retain(|_, rooms| !rooms.is_empty());

        tracing::trace!(connection_id = %connection_id, room_id = %room_id, "left room");
    }

    /// Get the rooms a connection is joined to
    pub fn rooms_of(&self, connection_id: &str) -> Vec<String> {
        self.connection_rooms
            .get(connection_id)
            .map(|rooms| rooms.iter().cloned().collect())
            .unwrap_or_default()
    }

    /// Get every connection joined to a room
    pub fn members_of(&self, room_id: &str) -> Vec<Arc<Connection>> {
        self.rooms
            .get(room_id)
            .map(|members| {
                members
                    .iter()
                    .filter_map(|id| self.connections.get(id).map(|c| c.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Remove a connection entirely: every room membership plus the
    /// identity binding
    pub fn disconnect(&self, connection_id: &str) {
        if let Some((_, rooms)) = self.connection_rooms.remove(connection_id) {
            for room_id in rooms {
                self.rooms.alter(&room_id, |_, mut members| {
                    members.remove(connection_id);
                    members
                });
            }
            self.rooms.retain(|_, members| !members.is_empty());
        }

        if let Some((_, connection)) = self.connections.remove(connection_id) {
            connection.unbind();
            tracing::debug!(connection_id = %connection_id, "connection removed");
        }
    }

    /// Total number of active connections
    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    /// Number of rooms with at least one member
    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.connections.len())
            .field("rooms", &self.rooms.len())
            .finish()
    }
}
