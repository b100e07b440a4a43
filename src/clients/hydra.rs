//! Hydra sensor platform client.
//!
//! Requests day-binned aggregates for the configured device/sensor pair and
//! turns them into display-ready [`EnergyData`].

use anyhow::Result;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, error, info};

use crate::config::SensorConfig;
use crate::domain::{DateRange, EnergyData, EnergyRecord};

/// Message used when the backend gives no `message` of its own.
pub const ENERGY_FALLBACK_MESSAGE: &str = "Error fetching energy data";

const EXPORT_PATH: &str = "/Sensor/exportAggregatedNumbers";

#[async_trait]
pub trait EnergyProvider: Send + Sync {
    /// Normalized daily consumption for `range`.
    async fn energy_data(&self, token: &str, range: &DateRange)
        -> Result<Vec<EnergyData>, EnergyError>;

    /// Backend body for the export request, untouched. A success body that
    /// is not JSON comes back as a JSON string.
    async fn export_raw(&self, token: &str, from: &str, to: &str) -> Result<Value, ExportError>;
}

/// Failure of the raw export call.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("sensor platform request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("sensor platform returned HTTP {status}")]
    Status { status: StatusCode, body: Option<Value> },

    #[error("sensor platform returned an unreadable body: {0}")]
    Decode(String),
}

impl ExportError {
    /// Upstream error body if there was one, otherwise the error text.
    pub fn details(&self) -> Value {
        match self {
            ExportError::Status { body: Some(body), .. } => body.clone(),
            other => Value::String(other.to_string()),
        }
    }

    /// The `message` field of a JSON error body.
    pub fn upstream_message(&self) -> Option<&str> {
        match self {
            ExportError::Status { body: Some(body), .. } => body.get("message")?.as_str(),
            _ => None,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ExportError::Status { status, .. } => Some(*status),
            ExportError::Transport(e) => e.status(),
            ExportError::Decode(_) => None,
        }
    }
}

/// Energy fetch failure, carrying the message shown to the user.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct EnergyError {
    pub message: String,
    pub status: Option<StatusCode>,
}

impl EnergyError {
    fn fallback(status: Option<StatusCode>) -> Self {
        Self {
            message: ENERGY_FALLBACK_MESSAGE.to_string(),
            status,
        }
    }
}

impl From<ExportError> for EnergyError {
    fn from(err: ExportError) -> Self {
        match err.upstream_message() {
            Some(message) => Self {
                message: message.to_string(),
                status: err.status(),
            },
            None => Self::fallback(err.status()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExportRequest<'a> {
    use_csv: bool,
    device_id: &'a str,
    from: &'a str,
    to: &'a str,
    sensors: [&'a str; 1],
}

#[derive(Clone)]
pub struct HydraClient {
    client: Client,
    base_url: String,
    device_id: String,
    sensor_id: String,
}

impl HydraClient {
    pub fn new(cfg: &SensorConfig) -> Result<Self> {
        let client = Client::builder().timeout(cfg.timeout()).build()?;
        Ok(Self::with_client(client, cfg))
    }

    pub fn with_client(client: Client, cfg: &SensorConfig) -> Self {
        Self {
            client,
            base_url: cfg.base_url.trim_end_matches('/').to_string(),
            device_id: cfg.device_id.clone(),
            sensor_id: cfg.sensor_id.clone(),
        }
    }

    fn export_url(&self) -> String {
        format!("{}{}", self.base_url, EXPORT_PATH)
    }
}

#[async_trait]
impl EnergyProvider for HydraClient {
    async fn energy_data(
        &self,
        token: &str,
        range: &DateRange,
    ) -> Result<Vec<EnergyData>, EnergyError> {
        let result: Result<Vec<EnergyRecord>, ExportError> = async {
            let body = self
                .export_raw(token, &range.from_label(), &range.to_label())
                .await?;
            serde_json::from_value::<Vec<EnergyRecord>>(body)
                .map_err(|e| ExportError::Decode(e.to_string()))
        }
        .await;

        match result {
            Ok(records) => {
                info!(
                    days = records.len(),
                    from = %range.from,
                    to = %range.to,
                    "fetched energy data from Hydra"
                );
                Ok(records.into_iter().map(EnergyData::from).collect())
            }
            Err(e) => {
                error!(error = %e, "failed to fetch energy data");
                Err(e.into())
            }
        }
    }

    async fn export_raw(&self, token: &str, from: &str, to: &str) -> Result<Value, ExportError> {
        let url = self.export_url();
        debug!(%url, from, to, "requesting day-binned aggregates");

        let resp = self
            .client
            .post(&url)
            .query(&[("binBy", "day")])
            .bearer_auth(token)
            .json(&ExportRequest {
                use_csv: false,
                device_id: &self.device_id,
                from,
                to,
                sensors: [self.sensor_id.as_str()],
            })
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;

        if !status.is_success() {
            let body = (!text.trim().is_empty()).then(|| body_value(text));
            return Err(ExportError::Status { status, body });
        }

        Ok(body_value(text))
    }
}

fn body_value(text: String) -> Value {
    serde_json::from_str(&text).unwrap_or(Value::String(text))
}
