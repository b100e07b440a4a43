//! Daily weather types and the WMO weather-code classifier.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Human-readable category for a WMO weather code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WeatherCondition {
    #[strum(serialize = "clear skies")]
    ClearSkies,
    #[strum(serialize = "partly cloudy")]
    PartlyCloudy,
    #[strum(serialize = "foggy")]
    Foggy,
    #[strum(serialize = "rainy")]
    Rainy,
    #[strum(serialize = "snowy")]
    Snowy,
    #[strum(serialize = "rain showers")]
    RainShowers,
    #[strum(serialize = "snow showers")]
    SnowShowers,
    #[strum(serialize = "thunderstorms")]
    Thunderstorms,
    #[strum(serialize = "varied conditions")]
    Varied,
}

impl WeatherCondition {
    /// Classify a weather code. Bands are ascending with inclusive upper
    /// bounds and the first matching band wins, so negative codes land in
    /// the `<= 3` band.
    pub fn from_code(code: i32) -> Self {
        match code {
            0 => Self::ClearSkies,
            c if c <= 3 => Self::PartlyCloudy,
            4..=48 => Self::Foggy,
            49..=67 => Self::Rainy,
            68..=77 => Self::Snowy,
            78..=82 => Self::RainShowers,
            83..=86 => Self::SnowShowers,
            87..=99 => Self::Thunderstorms,
            _ => Self::Varied,
        }
    }
}

/// Open-Meteo `daily` block: parallel arrays indexed by day offset.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OpenMeteoDaily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub weathercode: Vec<i32>,
}

impl OpenMeteoDaily {
    /// True when every metric array has as many entries as `time`.
    pub fn is_aligned(&self) -> bool {
        let n = self.time.len();
        self.temperature_2m_max.len() == n
            && self.temperature_2m_min.len() == n
            && self.precipitation_sum.len() == n
            && self.weathercode.len() == n
    }

    /// Zip the arrays into one record per day. Callers check `is_aligned`
    /// first; extra entries in longer arrays are ignored.
    pub fn to_days(&self) -> Vec<WeatherData> {
        self.time
            .iter()
            .zip(&self.temperature_2m_max)
            .zip(&self.temperature_2m_min)
            .zip(&self.precipitation_sum)
            .zip(&self.weathercode)
            .map(|((((date, max), min), precip), code)| WeatherData {
                date: date.clone(),
                temp: round_one_decimal((max + min) / 2.0),
                condition: WeatherCondition::from_code(*code).to_string(),
                humidity: None,
                precipitation: Some(*precip),
            })
            .collect()
    }
}

/// Display-ready weather entry for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherData {
    pub date: String,
    pub temp: f64,
    pub condition: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub humidity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub precipitation: Option<f64>,
}

/// Where a weather series came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum WeatherSource {
    Live,
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherReport {
    pub source: WeatherSource,
    pub days: Vec<WeatherData>,
}

impl WeatherReport {
    pub fn live(days: Vec<WeatherData>) -> Self {
        Self { source: WeatherSource::Live, days }
    }

    pub fn fallback(days: Vec<WeatherData>) -> Self {
        Self { source: WeatherSource::Fallback, days }
    }

    pub fn is_fallback(&self) -> bool {
        self.source == WeatherSource::Fallback
    }
}

/// Round half-up to one decimal place (`-2.25` becomes `-2.2`).
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}
