use std::error::Error;

use tracing::info;
use tracing_subscriber::EnvFilter;

use fare_server::config::ServerConfig;
use fare_server::network::load_network;
use fare_server::web::{AppState, create_router};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServerConfig::from_env()?;

    // Load the network tables (fail fast if any are unreadable)
    let index = load_network(&config.data_dir)?;

    let addr = config.bind_addr;
    let app = create_router(AppState::new(index, config));

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Bus fare server listening on http://{addr}");
    info!("API endpoints:");
    info!("  GET /health                       - Health check");
    info!("  GET /api/stats                    - Network statistics");
    info!("  GET /api/sections/search          - Section name suggestions");
    info!("  GET /api/highway/sections/search  - Highway access point suggestions");
    info!("  GET /api/fares                    - Stage fares between two sections");
    info!("  GET /api/routes                   - Routes serving two sections");
    info!("  GET /api/highway-fares            - Highway fares between access points");

    axum::serve(listener, app).await?;
    Ok(())
}
