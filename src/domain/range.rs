use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Wire format for dates sent to and received from the backends.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid date range: {from} is after {to}")]
pub struct InvalidRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, InvalidRange> {
        if from > to {
            return Err(InvalidRange { from, to });
        }
        Ok(Self { from, to })
    }

    /// Default window requested from the sensor platform: March 2025.
    pub fn default_energy() -> Self {
        Self {
            from: NaiveDate::from_ymd_opt(2025, 3, 1).unwrap_or_default(),
            to: NaiveDate::from_ymd_opt(2025, 3, 31).unwrap_or_default(),
        }
    }

    /// Fill in missing ends from the energy default.
    pub fn or_default_energy(
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Self, InvalidRange> {
        let d = Self::default_energy();
        Self::new(from.unwrap_or(d.from), to.unwrap_or(d.to))
    }

    pub fn from_label(&self) -> String {
        self.from.format(DATE_FORMAT).to_string()
    }

    pub fn to_label(&self) -> String {
        self.to.format(DATE_FORMAT).to_string()
    }

    /// Every day from `from` to `to`, both included.
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let to = self.to;
        std::iter::successors(Some(self.from), |d| d.checked_add_days(Days::new(1)))
            .take_while(move |d| *d <= to)
    }
}
