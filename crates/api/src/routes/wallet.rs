//! Wallet routes — connection bookkeeping, balances and analysis.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use supermarket_common::error::AppError;
use supermarket_common::types::{Network, SUPPORTED_ASSETS, TokenBalance, WalletAddress};
use supermarket_engine::analysis::PortfolioAnalyzer;
use supermarket_engine::session::{SessionEvent, WalletSessionState};

use crate::routes::timestamp;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/wallet/status", get(status))
        .route("/api/wallet/connect", post(connect))
        .route("/api/wallet/disconnect", post(disconnect))
        .route("/api/wallet/balance/{address}", get(mock_balance))
        .route("/api/wallet/portfolio/{address}", get(portfolio))
        .route("/api/wallet/analyze", post(analyze))
}

/// Request body for wallet connection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub address: Option<String>,
    pub chain_id: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectResponse {
    pub success: bool,
    pub address: WalletAddress,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<Value>,
    pub timestamp: String,
    pub message: &'static str,
    pub session: WalletSessionState,
}

/// Request body for wallet disconnection. The address is echoed, not checked.
#[derive(Debug, Default, Deserialize)]
pub struct DisconnectRequest {
    pub address: Option<Value>,
}

/// Request body for portfolio analysis. Both fields are required.
#[derive(Debug, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub address: Option<Value>,
    pub balances: Option<Value>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioResponse {
    pub address: WalletAddress,
    pub balances: Vec<TokenBalance>,
    pub total_value: f64,
    pub timestamp: String,
}

/// GET /api/wallet/status — Supported networks and tokens.
async fn status() -> Json<Value> {
    let networks: Vec<String> = Network::ALL.iter().map(|n| n.to_string()).collect();
    let tokens: Vec<&str> = SUPPORTED_ASSETS.iter().map(|a| a.symbol).collect();

    Json(json!({
        "status": "available",
        "supportedNetworks": networks,
        "supportedTokens": tokens,
        "message": "Wallet connection service is available",
    }))
}

/// POST /api/wallet/connect — Validate the address and record the connection.
///
/// Nothing is persisted; the response carries the resulting session snapshot.
async fn connect(
    payload: Result<Json<ConnectRequest>, JsonRejection>,
) -> Result<Json<ConnectResponse>, AppError> {
    let req = json_body(payload)?;

    let raw = req
        .address
        .filter(|a| !a.is_empty())
        .ok_or_else(|| AppError::MissingField("Wallet address is required".to_string()))?;
    let address = WalletAddress::parse(&raw)?;

    let session = WalletSessionState::default()
        .apply(SessionEvent::ConnectRequested)
        .apply(SessionEvent::Connected {
            address: address.clone(),
            chain_id: req.chain_id.as_ref().and_then(chain_id_of),
        });

    tracing::info!(
        wallet = %address.shorten(),
        chain_id = ?session.chain_id,
        network = ?session.chain_id.and_then(Network::from_chain_id),
        "Wallet connection recorded"
    );

    Ok(Json(ConnectResponse {
        success: true,
        address,
        chain_id: req.chain_id,
        timestamp: timestamp(),
        message: "Wallet connection recorded",
        session,
    }))
}

/// POST /api/wallet/disconnect — Acknowledge a disconnect.
async fn disconnect(
    payload: Result<Json<DisconnectRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let req = json_body(payload)?;

    let mut body = json!({
        "success": true,
        "timestamp": timestamp(),
        "message": "Wallet disconnected",
    });
    if let Some(address) = req.address {
        body["address"] = address;
    }

    Ok(Json(body))
}

/// GET /api/wallet/balance/:address — Fixed mock balances.
async fn mock_balance(Path(address): Path<String>) -> Result<Json<Value>, AppError> {
    let address = WalletAddress::parse(&address)?;

    Ok(Json(json!({
        "address": address,
        "balances": [
            {
                "symbol": "ETH",
                "balance": "0.5",
                "decimals": 18,
                "usdValue": 1200,
            },
            {
                "symbol": "USDC",
                "balance": "100.50",
                "decimals": 6,
                "usdValue": 100.5,
            },
        ],
        "totalValue": 1300.5,
        "timestamp": timestamp(),
    })))
}

/// GET /api/wallet/portfolio/:address — Live balances valued at static prices.
async fn portfolio(
    State(state): State<AppState>,
    Path(address): Path<String>,
) -> Result<Json<PortfolioResponse>, AppError> {
    let address = WalletAddress::parse(&address)?;

    let balances = state.aggregator.aggregate_for(&address).await?;
    let valuation = state.valuer.value_breakdown(balances);

    Ok(Json(PortfolioResponse {
        address,
        balances: valuation.balances,
        total_value: valuation.total_value,
        timestamp: timestamp(),
    }))
}

/// POST /api/wallet/analyze — Static portfolio analysis.
async fn analyze(
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let req = json_body(payload)?;

    let (Some(address), Some(_balances)) = (
        req.address.filter(is_truthy),
        req.balances.filter(is_truthy),
    ) else {
        return Err(AppError::MissingField(
            "Address and balances are required".to_string(),
        ));
    };

    Ok(Json(json!({
        "address": address,
        "analysis": PortfolioAnalyzer::analyze(),
        "timestamp": timestamp(),
        "message": "Portfolio analysis completed",
    })))
}

/// Unwrap a JSON body. A request without a JSON content type is treated as an
/// empty body; malformed JSON is a validation error.
fn json_body<T: Default>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    match payload {
        Ok(Json(body)) => Ok(body),
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(T::default()),
        Err(rejection) => Err(AppError::Validation(rejection.body_text())),
    }
}

/// Null, `false`, `0` and `""` count as absent.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Chain id given as a number or a decimal/hex string.
fn chain_id_of(value: &Value) -> Option<u64> {
    match value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex) => u64::from_str_radix(hex, 16).ok(),
            None => s.parse().ok(),
        },
        _ => None,
    }
}
