//! Fault handling for the whole router.
//!
//! Server faults (an `AppError` mapped to 500, or a handler panic) always
//! produce `{error: "Internal server error", message}`. The message is the
//! fault detail in development and a generic string everywhere else.

use std::any::Any;

use axum::extract::{Request, State};
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::json;
use tower_http::catch_panic::CatchPanicLayer;

use supermarket_common::error::{FaultDetail, GENERIC_FAULT_MESSAGE};

use crate::state::AppState;

/// Wrap `router` with panic recovery and environment-gated fault detail.
pub fn with_fault_handling(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    router
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            expose_fault_detail,
        ))
}

/// Render a caught panic as a 500 response carrying the panic message as detail.
fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "Handler panicked");

    let mut response = (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({
            "error": "Internal server error",
            "message": GENERIC_FAULT_MESSAGE,
        })),
    )
        .into_response();
    response.extensions_mut().insert(FaultDetail(detail));
    response
}

/// Replace the generic 500 message with the fault detail when the environment allows it.
async fn expose_fault_detail(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;

    if !state.config.environment.exposes_error_detail() {
        return response;
    }

    let Some(FaultDetail(detail)) = response.extensions().get::<FaultDetail>().cloned() else {
        return response;
    };

    (
        response.status(),
        Json(json!({
            "error": "Internal server error",
            "message": detail,
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panic_with_string_payload() {
        let response = handle_panic(Box::new("kaboom".to_string()));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.extensions().get::<FaultDetail>().unwrap().0,
            "kaboom"
        );
    }

    #[test]
    fn test_panic_with_static_str_payload() {
        let response = handle_panic(Box::new("static kaboom"));
        assert_eq!(
            response.extensions().get::<FaultDetail>().unwrap().0,
            "static kaboom"
        );
    }

    #[test]
    fn test_panic_with_opaque_payload() {
        let response = handle_panic(Box::new(42u32));
        assert_eq!(
            response.extensions().get::<FaultDetail>().unwrap().0,
            "Unknown panic"
        );
    }
}
