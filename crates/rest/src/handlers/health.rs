//! Health check endpoint handlers.
//!
//! Provides health, liveness and readiness probes for monitoring and load
//! balancers.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use quire_persistence::core::QuireStorage;
use tracing::{debug, warn};

use crate::error::{RestError, RestResult};
use crate::state::AppState;

/// Handler for the health check endpoint.
///
/// # HTTP Request
///
/// `GET /health`
///
/// # Response
///
/// - `200 OK` - Server is running
pub async fn health_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: QuireStorage,
{
    debug!("Processing health check request");

    let health_response = serde_json::json!({
        "status": "healthy",
        "backend": state.storage().name(),
        "timestamp": chrono::Utc::now().to_rfc3339()
    });

    Ok((StatusCode::OK, Json(health_response)).into_response())
}

/// Handler for the liveness probe.
///
/// # HTTP Request
///
/// `GET /_liveness`
pub async fn liveness_handler() -> impl IntoResponse {
    StatusCode::OK
}

/// Handler for the readiness probe.
///
/// Runs the backend health check, so a broken database reports 503.
///
/// # HTTP Request
///
/// `GET /_readiness`
pub async fn readiness_handler<S>(State(state): State<AppState<S>>) -> RestResult<Response>
where
    S: QuireStorage,
{
    debug!("Processing readiness check request");

    let backend_name = state.storage().name();
    if let Err(e) = state.storage().health_check().await {
        warn!(backend = backend_name, error = %e, "Readiness check failed");
        return Err(RestError::ServiceUnavailable {
            message: format!("storage backend {} is not ready", backend_name),
        });
    }

    let response = serde_json::json!({
        "status": "ready",
        "backend": backend_name,
        "checks": {
            "storage": "ok"
        }
    });

    Ok((StatusCode::OK, Json(response)).into_response())
}
