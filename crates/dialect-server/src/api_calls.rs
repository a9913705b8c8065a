//! Call-initiation API handler.

use crate::AppState;
use axum::{
    extract::{Extension, Json},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use dialect_gateway::GatewayError;
use dialect_types::{CallConfig, CallResult};
use std::sync::Arc;

/// Fixed human-readable label on every error response. The `details` field
/// carries the underlying reason, the `code` field the machine-readable
/// failure kind.
const ERROR_LABEL: &str = "Error processing call request";

/// Error response for the call route.
///
/// All original failure kinds map to 500 — callers distinguish them by the
/// `code` field, not the status. The single-flight rejection is new
/// behavior, so it takes the natural 409.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    code: &'static str,
    details: String,
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        let status = match err {
            GatewayError::InFlight(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self {
            status,
            code: err.code(),
            details: err.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(serde_json::json!({
            "error": ERROR_LABEL,
            "details": self.details,
            "code": self.code,
        }));

        (self.status, body).into_response()
    }
}

/// Handler for `POST /api/calls`.
///
/// Relays the shaped configuration to the voice API and, for telephony
/// calls, bridges the returned join URL through the telephony API. The
/// merged result is returned verbatim.
pub async fn create_call_handler(
    Extension(state): Extension<Arc<AppState>>,
    Json(config): Json<CallConfig>,
) -> Result<Json<CallResult>, ApiError> {
    tracing::info!(
        telephony = config.is_telephony(),
        model = %config.model,
        "processing call start"
    );

    let result = state.gateway.start_call(&config).await.map_err(|e| {
        tracing::warn!(code = e.code(), "call start failed: {}", e);
        ApiError::from(e)
    })?;

    Ok(Json(result))
}
