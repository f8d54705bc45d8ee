//! Gateway server state

use std::sync::Arc;

use crate::context::GatewayContext;
use crate::dispatch::Dispatcher;

/// Shared state for the WebSocket server
#[derive(Clone)]
pub struct GatewayState {
    ctx: Arc<GatewayContext>,
    dispatcher: Arc<Dispatcher>,
}

impl GatewayState {
    /// Create a new gateway state
    #[must_use]
    pub fn new(ctx: Arc<GatewayContext>, dispatcher: Arc<Dispatcher>) -> Self {
        Self { ctx, dispatcher }
    }

    /// Get the gateway context
    pub fn ctx(&self) -> &Arc<GatewayContext> {
        &self.ctx
    }

    /// Get the event dispatcher
    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}

impl std::fmt::Debug for GatewayState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayState")
            .field("ctx", &self.ctx)
            .field("dispatcher", &self.dispatcher)
            .finish()
    }
}
