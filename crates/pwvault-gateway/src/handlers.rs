// SPDX-FileCopyrightText: 2026 pwvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Request handlers for the gateway routes.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pwvault_core::{ErrorClass, HealthStatus, VaultError};
use pwvault_vault::RequestEnvelope;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use crate::server::GatewayState;

/// Body of `GET /health`.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub store: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// HTTP status for an error class.
pub fn status_for(class: ErrorClass) -> StatusCode {
    match class {
        ErrorClass::BadRequest => StatusCode::BAD_REQUEST,
        ErrorClass::Forbidden => StatusCode::FORBIDDEN,
        ErrorClass::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// Render an error as a status plus plain-text message.
pub fn error_response(err: &VaultError) -> Response {
    let class = err.class();
    match class {
        ErrorClass::Internal => error!(error = %err, "request failed"),
        ErrorClass::Forbidden => warn!("request rejected: {err}"),
        ErrorClass::BadRequest => debug!("malformed request: {err}"),
    }
    (status_for(class), err.to_string()).into_response()
}

/// POST / and POST /v1/vault.
///
/// The body is parsed here rather than through the `Json` extractor so an
/// unparseable envelope gets the same plain-text 400 as any other malformed
/// request.
pub async fn post_vault(State(state): State<GatewayState>, body: Bytes) -> Response {
    let envelope: RequestEnvelope = match serde_json::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(e) => return error_response(&VaultError::MalformedRequest(e.to_string())),
    };

    match state.router.handle(envelope).await {
        Ok(response) => (StatusCode::OK, Json(response)).into_response(),
        Err(e) => error_response(&e),
    }
}

/// GET /health.
pub async fn get_health(State(state): State<GatewayState>) -> (StatusCode, Json<HealthResponse>) {
    let store = state.router.service().store();
    let name = store.name().to_string();

    let (status, label, detail) = match store.health_check().await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "ok", None),
        Ok(HealthStatus::Degraded(detail)) => (StatusCode::OK, "degraded", Some(detail)),
        Ok(HealthStatus::Unhealthy(detail)) => {
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable", Some(detail))
        }
        Err(e) => (StatusCode::SERVICE_UNAVAILABLE, "unavailable", Some(e.to_string())),
    };

    (
        status,
        Json(HealthResponse {
            status: label.to_string(),
            store: name,
            detail,
        }),
    )
}
