use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;

use crate::dashboard::AppState;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    status: String,
    timestamp: chrono::DateTime<chrono::Utc>,
    backends: Backends,
}

/// Backends the service forwards to. Reachability is not probed; the
/// identity and sensor endpoints need credentials to answer meaningfully.
#[derive(Debug, Serialize)]
pub struct Backends {
    identity: String,
    sensor: String,
    weather: String,
}

/// GET /health - service status and configured backends
pub async fn health_check(State(state): State<AppState>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: chrono::Utc::now(),
        backends: Backends {
            identity: state.cfg.identity.base_url.clone(),
            sensor: state.cfg.sensor.base_url.clone(),
            weather: state.cfg.weather.base_url.clone(),
        },
    };
    (StatusCode::OK, Json(response))
}

/// GET /health/ready - Readiness probe
pub async fn readiness_check() -> impl IntoResponse {
    StatusCode::OK
}

/// GET /health/live - Liveness probe
pub async fn liveness_check() -> impl IntoResponse {
    StatusCode::OK
}
