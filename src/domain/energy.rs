use serde::{Deserialize, Serialize};

/// One day-binned aggregate row as returned by the Hydra sensor platform.
///
/// `min`/`max` are meter readings in watt-hours, so `max - min` is the energy
/// consumed within the bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnergyRecord {
    pub sensor_id: String,
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub count: f64,
    pub sum: f64,
    pub min: f64,
    pub max: f64,
}

impl EnergyRecord {
    /// Bin date as `YYYY-MM-DD`. Month and day are zero-padded, the year is
    /// printed as-is and no calendar validation takes place.
    pub fn date_label(&self) -> String {
        format_bin_date(self.year, self.month, self.day)
    }

    /// Energy consumed within the bin in kWh.
    pub fn consumed_kwh(&self) -> f64 {
        (self.max - self.min) / 1000.0
    }
}

/// Display-ready energy entry for a single day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnergyData {
    pub date: String,
    #[serde(rename = "kWh")]
    pub kwh: f64,
    pub raw: EnergyRecord,
}

impl From<EnergyRecord> for EnergyData {
    fn from(raw: EnergyRecord) -> Self {
        Self {
            date: raw.date_label(),
            kwh: raw.consumed_kwh(),
            raw,
        }
    }
}

pub fn format_bin_date(year: i32, month: u32, day: u32) -> String {
    format!("{year}-{month:02}-{day:02}")
}

/// Sum of daily consumption over a series.
pub fn total_kwh(series: &[EnergyData]) -> f64 {
    series.iter().map(|e| e.kwh).sum()
}
