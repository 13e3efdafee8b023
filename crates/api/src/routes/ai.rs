//! AI endpoints. Not implemented; any request body is accepted and ignored.

use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/ai/analyze-portfolio", post(analyze_portfolio))
        .route("/api/ai/chat", post(chat))
}

async fn analyze_portfolio() -> Json<serde_json::Value> {
    Json(json!({ "message": "Portfolio analysis endpoint - coming soon!" }))
}

async fn chat() -> Json<serde_json::Value> {
    Json(json!({ "message": "AI chat endpoint - coming soon!" }))
}
