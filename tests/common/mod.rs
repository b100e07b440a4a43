#![allow(dead_code)]

use hydra_energy_dashboard::config::Config;
use serde_json::{json, Value};

pub const TOKEN: &str = "test-access-token";

/// Default config with every backend pointed at one mock server.
pub fn config_for(uri: &str) -> Config {
    let mut cfg = Config::default();
    cfg.identity.base_url = uri.to_string();
    cfg.sensor.base_url = uri.to_string();
    cfg.weather.base_url = uri.to_string();
    cfg.server.request_timeout_secs = 5;
    cfg
}

/// One Hydra aggregate row with meter readings in Wh.
pub fn energy_row(month: u32, day: u32, min: f64, max: f64) -> Value {
    json!({
        "sensorId": "470b1334-0000-0001-0000-000000000000",
        "year": 2025,
        "month": month,
        "day": day,
        "count": 96,
        "sum": (min + max) / 2.0 * 96.0,
        "min": min,
        "max": max,
    })
}

/// Open-Meteo response for 2025-03-01..=2025-03-03.
pub fn open_meteo_body() -> Value {
    json!({
        "latitude": -25.75,
        "longitude": 28.25,
        "timezone": "Africa/Johannesburg",
        "daily_units": { "time": "iso8601" },
        "daily": {
            "time": ["2025-03-01", "2025-03-02", "2025-03-03"],
            "temperature_2m_max": [29.0, 27.5, 24.0],
            "temperature_2m_min": [17.0, 16.0, 14.6],
            "precipitation_sum": [0.0, 4.2, 11.8],
            "weathercode": [1, 63, 95]
        }
    })
}
