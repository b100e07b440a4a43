use anyhow::Result;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::clients::{
    Authenticator, EnergyError, EnergyProvider, HydraClient, IdentityClient, OpenMeteoClient,
    WeatherProvider,
};
use crate::config::Config;
use crate::domain::{total_kwh, DateRange, EnergyData, WeatherReport};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub dashboard: Arc<Dashboard>,
}

impl AppState {
    pub fn new(cfg: Config) -> Result<Self> {
        let dashboard = Dashboard {
            auth: Arc::new(IdentityClient::new(&cfg.identity)?),
            energy: Arc::new(HydraClient::new(&cfg.sensor)?),
            weather: Arc::new(OpenMeteoClient::new(&cfg.weather)?),
        };
        info!(
            identity = %cfg.identity.base_url,
            sensor = %cfg.sensor.base_url,
            weather = %cfg.weather.base_url,
            "backends configured"
        );
        Ok(Self::from_parts(cfg, dashboard))
    }

    pub fn from_parts(cfg: Config, dashboard: Dashboard) -> Self {
        Self {
            cfg,
            dashboard: Arc::new(dashboard),
        }
    }
}

/// The three backends the dashboard reads from.
pub struct Dashboard {
    pub auth: Arc<dyn Authenticator>,
    pub energy: Arc<dyn EnergyProvider>,
    pub weather: Arc<dyn WeatherProvider>,
}

/// Energy and weather for the same range, as rendered on the dashboard page.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardSnapshot {
    pub range: DateRange,
    pub energy: Vec<EnergyData>,
    pub weather: WeatherReport,
    pub total_kwh: f64,
}

impl Dashboard {
    /// Energy is fetched first and fails the snapshot; weather cannot fail.
    pub async fn snapshot(
        &self,
        token: &str,
        range: &DateRange,
    ) -> Result<DashboardSnapshot, EnergyError> {
        let energy = self.energy.energy_data(token, range).await?;
        let weather = self.weather.daily_weather(range).await;
        Ok(DashboardSnapshot {
            range: *range,
            total_kwh: total_kwh(&energy),
            energy,
            weather,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{ExportError, IdentityError, ENERGY_FALLBACK_MESSAGE};
    use crate::domain::{EnergyRecord, TokenResponse, WeatherData};
    use async_trait::async_trait;
    use serde_json::Value;

    struct StubAuth;

    #[async_trait]
    impl Authenticator for StubAuth {
        async fn login(&self, _u: &str, _p: &str) -> Result<TokenResponse, IdentityError> {
            unreachable!("not used")
        }
    }

    struct StubEnergy {
        fail: bool,
    }

    #[async_trait]
    impl EnergyProvider for StubEnergy {
        async fn energy_data(
            &self,
            _token: &str,
            range: &DateRange,
        ) -> Result<Vec<EnergyData>, EnergyError> {
            if self.fail {
                return Err(EnergyError { message: ENERGY_FALLBACK_MESSAGE.into(), status: None });
            }
            Ok(range
                .days()
                .enumerate()
                .map(|(i, d)| {
                    use chrono::Datelike;
                    EnergyData::from(EnergyRecord {
                        sensor_id: "s".into(),
                        year: d.year(),
                        month: d.month(),
                        day: d.day(),
                        count: 1.0,
                        sum: 0.0,
                        min: i as f64 * 1000.0,
                        max: i as f64 * 1000.0 + 2000.0,
                    })
                })
                .collect())
        }

        async fn export_raw(&self, _t: &str, _f: &str, _to: &str) -> Result<Value, ExportError> {
            Ok(Value::Array(vec![]))
        }
    }

    struct StubWeather;

    #[async_trait]
    impl WeatherProvider for StubWeather {
        async fn daily_weather(&self, range: &DateRange) -> WeatherReport {
            WeatherReport::live(
                range
                    .days()
                    .map(|d| WeatherData {
                        date: d.to_string(),
                        temp: 20.0,
                        condition: "clear skies".into(),
                        humidity: None,
                        precipitation: Some(0.0),
                    })
                    .collect(),
            )
        }
    }

    fn dashboard(fail: bool) -> Dashboard {
        Dashboard {
            auth: Arc::new(StubAuth),
            energy: Arc::new(StubEnergy { fail }),
            weather: Arc::new(StubWeather),
        }
    }

    #[tokio::test]
    async fn test_snapshot_combines_series() {
        let range = DateRange::default_energy();
        let snap = dashboard(false).snapshot("t", &range).await.unwrap();
        assert_eq!(snap.energy.len(), 31);
        assert_eq!(snap.weather.days.len(), 31);
        assert!((snap.total_kwh - 62.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_snapshot_fails_on_energy_error() {
        let err = dashboard(true)
            .snapshot("t", &DateRange::default_energy())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), ENERGY_FALLBACK_MESSAGE);
    }
}
