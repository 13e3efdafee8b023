//! API descriptor and greeting.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;

use crate::routes::timestamp;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(describe_api))
        .route("/api/hello", get(hello))
}

/// GET / — Name, version and endpoint listing.
async fn describe_api(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(json!({
        "name": "CryptoSupermarket API",
        "version": env!("CARGO_PKG_VERSION"),
        "description": "DeFi education simulator API for wallet analysis and portfolio management",
        "status": "running",
        "timestamp": timestamp(),
        "endpoints": {
            "health": "GET /health",
            "api": {
                "hello": "GET /api/hello",
                "portfolio_analysis": "POST /api/ai/analyze-portfolio",
                "ai_chat": "POST /api/ai/chat",
                "wallet_status": "GET /api/wallet/status",
                "wallet_connect": "POST /api/wallet/connect",
                "wallet_disconnect": "POST /api/wallet/disconnect",
                "wallet_balance": "GET /api/wallet/balance/{address}",
                "wallet_portfolio": "GET /api/wallet/portfolio/{address}",
                "wallet_analysis": "POST /api/wallet/analyze",
                "market_prices": "GET /api/market/prices"
            }
        },
        "frontend": state.config.frontend_url,
    }))
}

async fn hello() -> Json<serde_json::Value> {
    Json(json!({ "message": "Hello from CryptoSupermarket API!" }))
}
