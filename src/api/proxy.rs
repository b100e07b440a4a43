//! Pass-through endpoint for browser clients that cannot call the sensor
//! platform directly. Every response, preflight or not, carries the same
//! fixed CORS headers.

use axum::{
    extract::State,
    http::{header, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tower::ServiceBuilder;
use tower_http::set_header::SetResponseHeaderLayer;
use tracing::error;

use crate::dashboard::AppState;
use crate::domain::DateRange;

const CORS_HEADERS: [(HeaderName, &str); 4] = [
    (header::ACCESS_CONTROL_ALLOW_CREDENTIALS, "true"),
    (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
    (header::ACCESS_CONTROL_ALLOW_METHODS, "GET,POST,OPTIONS"),
    (header::ACCESS_CONTROL_ALLOW_HEADERS, "Authorization,Content-Type"),
];

pub fn router(state: AppState) -> Router {
    let [credentials, origin, methods, headers] =
        CORS_HEADERS.map(|(name, value)| {
            SetResponseHeaderLayer::overriding(name, HeaderValue::from_static(value))
        });

    Router::new()
        .route("/api/hydra-energy", post(forward_energy).options(preflight))
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(credentials)
                .layer(origin)
                .layer(methods)
                .layer(headers),
        )
}

#[derive(Debug, Default, Deserialize)]
pub struct ProxyRequest {
    pub token: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

/// OPTIONS /api/hydra-energy
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

/// POST /api/hydra-energy - forward `{token, from, to}` to the sensor platform
pub async fn forward_energy(
    State(st): State<AppState>,
    body: Option<Json<ProxyRequest>>,
) -> Response {
    let req = body.map(|Json(b)| b).unwrap_or_default();

    let Some(token) = non_empty(req.token) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Token is required" })),
        )
            .into_response();
    };

    let defaults = DateRange::default_energy();
    let from = non_empty(req.from).unwrap_or_else(|| defaults.from_label());
    let to = non_empty(req.to).unwrap_or_else(|| defaults.to_label());

    match st.dashboard.energy.export_raw(&token, &from, &to).await {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(e) => {
            let details = e.details();
            error!(error = %e, %details, "Hydra API error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Hydra request failed", "details": details })),
            )
                .into_response()
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
