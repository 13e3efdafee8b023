pub mod ai;
pub mod health;
pub mod market;
pub mod root;
pub mod wallet;

use axum::Router;
use axum::extract::OriginalUri;
use chrono::{SecondsFormat, Utc};

use supermarket_common::error::AppError;

use crate::middleware::errors::with_fault_handling;
use crate::state::AppState;

/// Build the complete API router with all routes.
pub fn create_router(state: AppState) -> Router {
    let router = Router::new()
        .merge(root::router())
        .merge(health::router())
        .merge(ai::router())
        .merge(wallet::router())
        .merge(market::router())
        .fallback(not_found);

    with_fault_handling(router, &state).with_state(state)
}

/// Catch-all for unmatched routes.
async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    AppError::NotFound(uri.to_string())
}

/// Current time as an ISO-8601 string with millisecond precision.
pub(crate) fn timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
