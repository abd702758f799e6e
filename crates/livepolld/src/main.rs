//! Livepoll service binary.
//!
//! Entry point that wires configuration, tally state, and the
//! HTTP/`WebSocket` server together.
//!
//! # Startup Sequence
//!
//! 1. Initialize structured logging (tracing)
//! 2. Load configuration from `livepoll.yaml`
//! 3. Build shared state (tally store, mutation gateway, broadcast hub)
//! 4. Bind and serve until the process is terminated
//!
//! A bind failure (port already taken, bad address) is fatal: it propagates
//! out of `main` so the process exits non-zero with the error logged.

use std::path::Path;
use std::sync::Arc;

use livepoll_core::config::{ConfigError, ServiceConfig};
use livepoll_server::server::{start_server, ServerConfig};
use livepoll_server::state::AppState;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Application entry point for the Livepoll service.
///
/// # Errors
///
/// Returns an error if configuration loading fails or the server cannot
/// bind its listening endpoint.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Initialize structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .init();

    info!("livepolld starting");

    // 2. Load configuration.
    let config = load_config()?;
    info!(
        host = config.server.host,
        port = config.server.port,
        options = ?config.poll.options,
        "Configuration loaded"
    );

    // 3. Build shared state.
    let state = Arc::new(AppState::new(&config.poll.options));

    // 4. Serve until terminated.
    let server_config = ServerConfig {
        host: config.server.host,
        port: config.server.port,
    };
    start_server(&server_config, state).await?;

    info!("livepolld shutdown complete");
    Ok(())
}

/// Load the service configuration from `livepoll.yaml`.
///
/// Looks for the config file relative to the current working directory and
/// falls back to built-in defaults when it does not exist.
fn load_config() -> Result<ServiceConfig, ConfigError> {
    let config_path = Path::new("livepoll.yaml");
    if config_path.exists() {
        let config = ServiceConfig::from_file(config_path)?;
        Ok(config)
    } else {
        info!("Config file not found, using defaults");
        Ok(ServiceConfig::default())
    }
}
