//! Synthetic daily weather used when the live weather call fails.
//!
//! The series follows a yearly sine around 20 °C with ±5 °C of noise, a
//! random condition and up to 5 mm of precipitation per day.

use chrono::{Datelike, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::f64::consts::PI;

use crate::domain::{round_one_decimal, DateRange, WeatherData, DATE_FORMAT};

/// Conditions drawn for synthetic days. Not the classifier's vocabulary.
pub const MOCK_CONDITIONS: [&str; 5] = ["clear skies", "partly cloudy", "cloudy", "rainy", "sunny"];

const BASE_TEMP_C: f64 = 20.0;
const SEASONAL_AMPLITUDE_C: f64 = 10.0;
const NOISE_SPAN_C: f64 = 5.0;
const MAX_PRECIPITATION_MM: f64 = 5.0;

pub struct MockWeatherGenerator {
    rng: StdRng,
}

impl MockWeatherGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng }
    }

    /// One entry per day from `from` to `to` inclusive; empty when `from > to`.
    pub fn generate(&mut self, from: NaiveDate, to: NaiveDate) -> Vec<WeatherData> {
        DateRange { from, to }
            .days()
            .map(|day| self.day(day))
            .collect()
    }

    fn day(&mut self, date: NaiveDate) -> WeatherData {
        let noise = self.rng.gen_range(-NOISE_SPAN_C..NOISE_SPAN_C);
        let condition = MOCK_CONDITIONS[self.rng.gen_range(0..MOCK_CONDITIONS.len())];
        let precipitation = self.rng.gen_range(0.0..MAX_PRECIPITATION_MM);

        WeatherData {
            date: date.format(DATE_FORMAT).to_string(),
            temp: round_one_decimal(seasonal_base_temp(date.ordinal()) + noise),
            condition: condition.to_string(),
            humidity: None,
            precipitation: Some(precipitation),
        }
    }
}

impl Default for MockWeatherGenerator {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Seasonal baseline for a 1-based day of year.
pub fn seasonal_base_temp(day_of_year: u32) -> f64 {
    BASE_TEMP_C + SEASONAL_AMPLITUDE_C * (f64::from(day_of_year) / 365.0 * 2.0 * PI).sin()
}
