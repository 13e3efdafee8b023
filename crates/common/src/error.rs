use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Generic message returned for server faults when detail is not exposed.
pub const GENERIC_FAULT_MESSAGE: &str = "Something went wrong";

/// Internal detail of a 500 response, attached as a response extension.
///
/// The HTTP layer decides whether to surface it based on the environment.
#[derive(Debug, Clone)]
pub struct FaultDetail(pub String);

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid wallet address format: {0}")]
    InvalidAddress(String),

    #[error("{0}")]
    MissingField(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Route {0} not found")]
    NotFound(String),

    #[error("Balance aggregation failed: {0}")]
    AggregationFailed(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::InvalidAddress(_) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "Invalid wallet address format" })),
            )
                .into_response(),
            AppError::MissingField(msg) | AppError::Validation(msg) => {
                (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
            }
            AppError::NotFound(path) => (
                StatusCode::NOT_FOUND,
                Json(json!({
                    "error": "Not Found",
                    "message": format!("Route {} not found", path),
                })),
            )
                .into_response(),
            AppError::AggregationFailed(_) | AppError::Config(_) | AppError::Internal(_) => {
                tracing::error!(error = %self, "Unhandled fault");
                let mut response = (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({
                        "error": "Internal server error",
                        "message": GENERIC_FAULT_MESSAGE,
                    })),
                )
                    .into_response();
                response
                    .extensions_mut()
                    .insert(FaultDetail(self.to_string()));
                response
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (AppError::InvalidAddress("0x12".into()), StatusCode::BAD_REQUEST),
            (AppError::MissingField("x".into()), StatusCode::BAD_REQUEST),
            (AppError::Validation("x".into()), StatusCode::BAD_REQUEST),
            (AppError::NotFound("/nope".into()), StatusCode::NOT_FOUND),
            (
                AppError::AggregationFailed("x".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (AppError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_fault_detail_attached_only_to_server_errors() {
        let response = AppError::Internal("disk on fire".into()).into_response();
        let detail = response.extensions().get::<FaultDetail>().unwrap();
        assert_eq!(detail.0, "Internal error: disk on fire");

        let response = AppError::MissingField("x".into()).into_response();
        assert!(response.extensions().get::<FaultDetail>().is_none());
    }
}
