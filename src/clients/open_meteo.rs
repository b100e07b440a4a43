//! Weather integration (Open-Meteo daily forecast/archive endpoint)
//!
//! The live path zips Open-Meteo's columnar `daily` arrays into one
//! [`WeatherData`] per day. Any failure is logged and replaced by synthetic
//! data from [`MockWeatherGenerator`]; the returned [`WeatherReport`] says
//! which of the two the caller got.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::mock_weather::MockWeatherGenerator;
use crate::config::WeatherConfig;
use crate::domain::{DateRange, OpenMeteoDaily, WeatherData, WeatherReport};

const FORECAST_PATH: &str = "/v1/forecast";
const DAILY_METRICS: &str = "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode";

#[async_trait]
pub trait WeatherProvider: Send + Sync {
    /// Daily weather for `range`. Never fails; see [`WeatherReport::source`].
    async fn daily_weather(&self, range: &DateRange) -> WeatherReport;
}

#[derive(Debug, Error)]
pub enum WeatherError {
    #[error("weather request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("weather API returned HTTP {0}")]
    Status(StatusCode),

    #[error("invalid weather data response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("invalid weather data response: missing daily block")]
    MissingDaily,

    #[error("invalid weather data response: daily arrays differ in length ({days} days)")]
    Misaligned { days: usize },
}

#[derive(Debug, Serialize)]
struct ForecastQuery<'a> {
    latitude: f64,
    longitude: f64,
    start_date: String,
    end_date: String,
    daily: &'static str,
    timezone: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenMeteoResponse {
    daily: Option<OpenMeteoDaily>,
}

#[derive(Clone)]
pub struct OpenMeteoClient {
    client: Client,
    base_url: String,
    latitude: f64,
    longitude: f64,
    timezone: String,
    fallback_seed: Option<u64>,
}

impl OpenMeteoClient {
    pub fn new(cfg: &WeatherConfig) -> Result<Self> {
        let client = Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self::with_client(client, cfg))
    }

    pub fn with_client(client: Client, cfg: &WeatherConfig) -> Self {
        Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            latitude: cfg.latitude,
            longitude: cfg.longitude,
            timezone: cfg.timezone.clone(),
            fallback_seed: None,
        }
    }

    /// Seed the fallback generator so every fallback series is the same.
    pub fn with_fallback_seed(mut self, seed: u64) -> Self {
        self.fallback_seed = Some(seed);
        self
    }

    /// Live data only; errors are returned to the caller.
    pub async fn fetch_daily(&self, range: &DateRange) -> Result<Vec<WeatherData>, WeatherError> {
        let url = format!("{}{}", self.base_url, FORECAST_PATH);
        debug!(%url, from = %range.from, to = %range.to, "fetching daily weather");

        let resp = self
            .client
            .get(&url)
            .query(&ForecastQuery {
                latitude: self.latitude,
                longitude: self.longitude,
                start_date: range.from_label(),
                end_date: range.to_label(),
                daily: DAILY_METRICS,
                timezone: &self.timezone,
            })
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(WeatherError::Status(resp.status()));
        }

        let body = resp.bytes().await?;
        let parsed: OpenMeteoResponse = serde_json::from_slice(&body)?;
        let daily = parsed.daily.ok_or(WeatherError::MissingDaily)?;
        if !daily.is_aligned() {
            return Err(WeatherError::Misaligned { days: daily.time.len() });
        }

        info!(
            days = daily.time.len(),
            latitude = self.latitude,
            longitude = self.longitude,
            "fetched daily weather from Open-Meteo"
        );
        Ok(daily.to_days())
    }

    fn fallback(&self, range: &DateRange) -> Vec<WeatherData> {
        MockWeatherGenerator::new(self.fallback_seed).generate(range.from, range.to)
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoClient {
    async fn daily_weather(&self, range: &DateRange) -> WeatherReport {
        match self.fetch_daily(range).await {
            Ok(days) => WeatherReport::live(days),
            Err(e) => {
                warn!(error = %e, "failed to fetch weather data, serving mock data");
                WeatherReport::fallback(self.fallback(range))
            }
        }
    }
}
