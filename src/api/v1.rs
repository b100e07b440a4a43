use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::{get, post},
    Json, Router,
};
use chrono::NaiveDate;
use serde::Deserialize;
use std::time::{Duration, Instant};
use validator::Validate;

use crate::{
    api::{error::ApiError, response::ApiResponse},
    auth::AuthBearer,
    dashboard::{AppState, DashboardSnapshot},
    domain::{DateRange, EnergyData, TokenResponse, WeatherReport},
};

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/auth/login", post(login))
        .route("/energy", get(get_energy))
        .route("/weather", get(get_weather))
        .route("/dashboard", get(get_dashboard))
        .with_state(state)
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

/// POST /api/v1/auth/login - exchange credentials for a bearer token
pub async fn login(
    State(st): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<TokenResponse>, ApiError> {
    req.validate()?;
    let token = st.dashboard.auth.login(&req.username, &req.password).await?;
    Ok(Json(token))
}

#[derive(Debug, Default, Deserialize)]
pub struct RangeQuery {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

/// GET /api/v1/energy - daily consumption, defaults to March 2025
pub async fn get_energy(
    State(st): State<AppState>,
    AuthBearer(token): AuthBearer,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<ApiResponse<Vec<EnergyData>>, ApiError> {
    let Query(q) = query?;
    let range = DateRange::or_default_energy(q.from, q.to)?;
    let start = Instant::now();
    let data = st.dashboard.energy.energy_data(&token, &range).await?;
    let count = data.len();
    Ok(ApiResponse::success(data)
        .with_count(count)
        .with_duration(elapsed_ms(start.elapsed())))
}

/// GET /api/v1/weather - daily weather, live or fallback
pub async fn get_weather(
    State(st): State<AppState>,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<ApiResponse<WeatherReport>, ApiError> {
    let Query(q) = query?;
    let (Some(from), Some(to)) = (q.from, q.to) else {
        return Err(ApiError::BadRequest("from and to are required".to_string()));
    };
    let range = DateRange::new(from, to)?;
    let report = st.dashboard.weather.daily_weather(&range).await;
    let count = report.days.len();
    Ok(ApiResponse::success(report).with_count(count))
}

/// GET /api/v1/dashboard - energy and weather for the same range
pub async fn get_dashboard(
    State(st): State<AppState>,
    AuthBearer(token): AuthBearer,
    query: Result<Query<RangeQuery>, QueryRejection>,
) -> Result<ApiResponse<DashboardSnapshot>, ApiError> {
    let Query(q) = query?;
    let range = DateRange::or_default_energy(q.from, q.to)?;
    let start = Instant::now();
    let snapshot = st.dashboard.snapshot(&token, &range).await?;
    Ok(ApiResponse::success(snapshot).with_duration(elapsed_ms(start.elapsed())))
}

fn elapsed_ms(elapsed: Duration) -> u64 {
    u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX)
}
