//! Event envelope format
//!
//! Every message on the transport, inbound or outbound, is one envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::EventType;
use crate::error::GatewayError;

/// Event envelope: `{ "name": string, "payload": object }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventEnvelope {
    /// Event name
    pub name: String,

    /// Event payload
    #[serde(default)]
    pub payload: Value,
}

impl EventEnvelope {
    /// Create an outbound envelope from a serializable payload
    ///
    /// Serialization of handler-built payloads never fails for the types we
    /// send; if it somehow does, the payload degrades to null.
    #[must_use]
    pub fn new<T: Serialize>(event: EventType, payload: &T) -> Self {
        Self {
            name: event.as_str().to_string(),
            payload: serde_json::to_value(payload).unwrap_or(Value::Null),
        }
    }

    /// Build the ERROR envelope for a handler failure
    #[must_use]
    pub fn error(err: &GatewayError) -> Self {
        Self::new(
            EventType::Error,
            &ErrorPayload {
                code: err.code().to_string(),
                message: err.public_message(),
            },
        )
    }

    /// Parse an inbound envelope from its JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize to JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Payload of the outbound ERROR event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}
