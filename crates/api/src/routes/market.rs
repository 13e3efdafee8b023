//! Market data endpoints.

use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/market/prices", get(prices))
}

// TODO: serve PriceTable quotes here once a live price feed replaces the static table.
async fn prices() -> Json<serde_json::Value> {
    Json(json!({ "message": "Market prices endpoint - coming soon!" }))
}
