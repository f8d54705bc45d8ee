//! Parley gateway server entry point
//!
//! Run with:
//! ```bash
//! cargo run -p parley-gateway
//! ```
//!
//! Configuration is loaded from environment variables.

use parley_common::{try_init_tracing, AppConfig};
use tracing::{error, info};

#[tokio::main]
async fn main() {
    if let Err(e) = try_init_tracing() {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    if let Err(e) = run().await {
        error!(error = %e, "gateway failed to start");
        std::process::exit(1);
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    info!("starting parley gateway...");

    let config = AppConfig::from_env().map_err(|e| {
        error!(error = %e, "failed to load configuration");
        e
    })?;

    info!(
        env = ?config.app.env,
        port = config.gateway.port,
        "configuration loaded"
    );

    parley_gateway::server::run(config).await?;

    Ok(())
}
