use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, time::Duration};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub identity: IdentityConfig,
    pub sensor: SensorConfig,
    pub weather: WeatherConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub enable_cors: bool,
    pub cors_origin: String,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        Ok(format!("{}:{}", self.host, self.port).parse()?)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            request_timeout_secs: 30,
            enable_cors: true,
            cors_origin: "http://localhost:5173".to_string(),
        }
    }
}

/// OAuth-style identity provider used for the password grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityConfig {
    pub base_url: String,
    pub client_id: String,
    pub client_secret: String,
    pub scope: String,
    pub http_timeout_seconds: u64,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        Self {
            base_url: "https://identity.hydra.africa".to_string(),
            client_id: "ro.client".to_string(),
            client_secret: "secret".to_string(),
            scope: "api1".to_string(),
            http_timeout_seconds: 10,
        }
    }
}

/// Hydra sensor platform and the device/sensor pair the dashboard reads.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SensorConfig {
    pub base_url: String,
    pub device_id: String,
    pub sensor_id: String,
    pub http_timeout_seconds: u64,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://hydra-api.azurewebsites.net".to_string(),
            device_id: "38394d4c-cb8e-ef11-a81c-6045bd88aa3b".to_string(),
            sensor_id: "470b1334-0000-0001-0000-000000000000".to_string(),
            http_timeout_seconds: 30,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    pub base_url: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
    pub http_timeout_seconds: u64,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.open-meteo.com".to_string(),
            // Pretoria
            latitude: -25.7479,
            longitude: 28.2293,
            timezone: "Africa/Johannesburg".to_string(),
            http_timeout_seconds: 10,
        }
    }
}

impl IdentityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

impl SensorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

impl WeatherConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.http_timeout_seconds)
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from("config/default.toml")
    }

    /// Compiled defaults, then the TOML file (if present), then
    /// `DASHBOARD__SECTION__KEY` environment variables.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let figment = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("DASHBOARD__").split("__"));
        Ok(figment.extract()?)
    }
}
