//! Lunar panchanga service
//!
//! Process wiring: environment, logging, the Horizons client, the SQLite
//! ledger, the lookup pipeline, and the HTTP surface.

use std::sync::Arc;

use tracing::info;
use tracing_subscriber::EnvFilter;

use lunar_panchanga::config::ServiceConfig;
use lunar_panchanga::server::{run_server, AppState};
use lunar_panchanga::{CalendarService, HorizonsClient, SqliteLedger};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = ServiceConfig::from_env();
    info!(?config, "starting lunar panchanga service");

    let source = Arc::new(HorizonsClient::new(
        &config.horizons_base_url,
        config.request_timeout,
    ));
    let ledger = Arc::new(
        SqliteLedger::new(&config.db_path)
            .await
            .map_err(std::io::Error::other)?,
    );
    let service = Arc::new(CalendarService::new(
        source,
        ledger,
        config.cache_ttl,
        config.cache_capacity,
    ));

    println!("🌙 Panchanga service ready on http://{}", config.bind_addr);
    run_server(AppState { service }, &config.bind_addr).await
}
