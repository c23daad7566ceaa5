// Main entry point - Dependency injection and server setup
use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use electrichome::application::energy_service::EnergyService;
use electrichome::application::geocode_service::GeocodeService;
use electrichome::infrastructure::config::load_app_config;
use electrichome::infrastructure::maps_co_search::MapsCoSearch;
use electrichome::presentation::app_state::AppState;
use electrichome::presentation::router::router;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Load configuration
    let config = load_app_config()?;

    // Create upstream search (infrastructure layer)
    let search = Arc::new(MapsCoSearch::new(
        config.geocoder.base_url.clone(),
        config.geocoder.api_key.clone(),
        config.geocoder.timeout(),
    )?);

    // Create services (application layer)
    let geocode_service = GeocodeService::new(
        search,
        config.geocoder.country.clone(),
        config.geocoder.cache(),
    );
    let energy_service = EnergyService::new();

    let state = Arc::new(AppState {
        geocode_service,
        energy_service,
    });

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.server.bind_address))?;
    tracing::info!("Starting electrichome service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router(state)).await?;

    Ok(())
}
