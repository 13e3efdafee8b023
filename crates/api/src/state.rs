//! Shared application state for the Axum API server.

use std::sync::Arc;
use std::time::Duration;

use supermarket_chain::ChainClient;
use supermarket_common::config::AppConfig;
use supermarket_engine::aggregator::BalanceAggregator;
use supermarket_engine::valuer::PortfolioValuer;

/// Application state shared across all route handlers via Axum `State`.
///
/// Immutable after startup; the chain client is injected by the caller.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub aggregator: Arc<BalanceAggregator>,
    pub valuer: Arc<PortfolioValuer>,
}

impl AppState {
    pub fn new(config: AppConfig, chain: Arc<dyn ChainClient>) -> Self {
        let aggregator = BalanceAggregator::new(chain)
            .with_query_timeout(Duration::from_millis(config.balance_query_timeout_ms));

        Self {
            config,
            aggregator: Arc::new(aggregator),
            valuer: Arc::new(PortfolioValuer::default()),
        }
    }
}
