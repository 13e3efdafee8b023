//! CryptoSupermarket API server binary entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::EnvFilter;

use supermarket_chain::RpcChainClient;
use supermarket_common::config::AppConfig;

use supermarket_api::middleware::http::apply_http_layers;
use supermarket_api::routes::create_router;
use supermarket_api::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new("supermarket_api=debug,supermarket_engine=debug,tower_http=debug")
        }))
        .init();

    tracing::info!("Starting CryptoSupermarket API server...");

    // Load configuration
    let config = AppConfig::from_env()?;

    // Chain client for live balance queries
    let chain = RpcChainClient::connect_http(&config.eth_rpc_url)?;

    // Build application state
    let state = AppState::new(config.clone(), Arc::new(chain));

    // Build router
    let app = apply_http_layers(create_router(state), &config)?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(
        %addr,
        environment = %config.environment,
        frontend_url = %config.frontend_url,
        "API server listening"
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            tokio::signal::ctrl_c().await.ok();
            tracing::info!("Received shutdown signal, stopping gracefully...");
        })
        .await?;

    Ok(())
}
