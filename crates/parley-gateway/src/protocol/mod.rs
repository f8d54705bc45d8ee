//! Wire protocol types

mod envelope;
mod event_types;

pub use envelope::{ErrorPayload, EventEnvelope};
pub use event_types::EventType;
