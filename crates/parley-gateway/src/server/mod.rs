//! Gateway server setup
//!
//! Routes, dependency wiring, and the serve loop.

mod handler;
mod state;

pub use handler::gateway_handler;
pub use state::GatewayState;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

use parley_common::{AppConfig, AppError, SessionTokens};
use parley_core::SnowflakeGenerator;
use parley_store::MemoryStores;

use crate::context::{GatewayContextBuilder, GatewayPolicies};
use crate::handlers::build_dispatcher;
use crate::preview::HttpLinkPreview;
use crate::registry::ConnectionRegistry;

/// Create the gateway router
pub fn create_router() -> Router<GatewayState> {
    Router::new()
        .route("/gateway", get(gateway_handler))
        .route("/health", get(health_check))
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Build the complete application
pub fn create_app(state: GatewayState) -> Router {
    create_router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Initialize all dependencies and create `GatewayState`
pub fn create_gateway_state(config: &AppConfig) -> Result<GatewayState, AppError> {
    let stores = MemoryStores::new();
    let registry = ConnectionRegistry::new_shared();

    let tokens = Arc::new(SessionTokens::new(
        &config.token.secret,
        config.token.expiry_secs,
    ));
    let snowflakes = Arc::new(SnowflakeGenerator::new(config.snowflake.worker_id));
    let preview = Arc::new(HttpLinkPreview::new(Duration::from_millis(
        config.preview.timeout_ms,
    )));

    let ctx = GatewayContextBuilder::new()
        .users(stores.users)
        .guilds(stores.guilds)
        .members(stores.members)
        .roles(stores.roles)
        .channels(stores.channels)
        .messages(stores.messages)
        .registry(registry)
        .tokens(tokens)
        .snowflakes(snowflakes)
        .preview(preview)
        .policies(GatewayPolicies::default())
        .build()
        .map_err(AppError::Config)?;

    let dispatcher = build_dispatcher().map_err(|e| AppError::Config(e.to_string()))?;

    Ok(GatewayState::new(Arc::new(ctx), Arc::new(dispatcher)))
}

/// Run the gateway server
pub async fn run_server(app: Router, addr: SocketAddr) -> Result<(), AppError> {
    tracing::info!("starting gateway server on {}", addr);

    let listener = TcpListener::bind(addr)
        .await
        .map_err(|e| AppError::Config(format!("failed to bind to {addr}: {e}")))?;

    tracing::info!("gateway listening on ws://{}/gateway", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| AppError::Config(format!("server error: {e}")))?;

    Ok(())
}

/// Resolve the listen address from configuration
fn bind_addr(config: &AppConfig) -> Result<SocketAddr, AppError> {
    config
        .gateway
        .address()
        .parse()
        .map_err(|e| AppError::Config(format!("invalid gateway address: {e}")))
}

/// Run the complete gateway server with configuration
pub async fn run(config: AppConfig) -> Result<(), AppError> {
    let addr = bind_addr(&config)?;

    let state = create_gateway_state(&config)?;
    let app = create_app(state);

    run_server(app, addr).await
}
