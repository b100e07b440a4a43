pub mod error;
pub mod health;
pub mod proxy;
pub mod response;
pub mod v1;

use axum::{
    http::{header, HeaderValue, Method},
    routing::get,
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::warn;

use crate::dashboard::AppState;

const MAX_BODY_BYTES: usize = 1024 * 1024;

pub fn router(state: AppState) -> Router {
    let server = state.cfg.server.clone();

    let mut api = Router::new().nest("/api/v1", v1::router(state.clone()));
    if server.enable_cors {
        match ui_cors(&server.cors_origin) {
            Some(cors) => api = api.layer(cors),
            None => warn!(origin = %server.cors_origin, "invalid CORS origin, CORS disabled"),
        }
    }

    let health = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness_check))
        .route("/health/ready", get(health::readiness_check))
        .with_state(state.clone());

    Router::new()
        .merge(api)
        .merge(proxy::router(state))
        .merge(health)
        .layer(
            ServiceBuilder::new()
                .layer(axum::extract::DefaultBodyLimit::max(MAX_BODY_BYTES))
                .layer(TimeoutLayer::new(Duration::from_secs(server.request_timeout_secs))),
        )
        .layer(TraceLayer::new_for_http())
}

/// CORS for the dashboard UI origin.
fn ui_cors(origin: &str) -> Option<CorsLayer> {
    let origin = HeaderValue::from_str(origin).ok()?;
    Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::exact(origin))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE]),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ui_cors_rejects_invalid_origin() {
        assert!(ui_cors("http://localhost:5173").is_some());
        assert!(ui_cors("bad\norigin").is_none());
    }
}
