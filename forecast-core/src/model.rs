use chrono::{DateTime, FixedOffset, NaiveDate, Offset, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub struct ForecastRequest {
    pub location: String,
    /// Number of 3-hour slots to ask for.
    pub sample_count: u16,
}

/// One 3-hour forecast slot, as delivered by the API.
///
/// Temperatures are in Kelvin. Fields the API is allowed to omit are kept as
/// `Option` so the display layer can apply its own defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastSample {
    /// Epoch seconds, UTC.
    pub timestamp: i64,
    /// Slot time as text, `YYYY-MM-DD HH:MM:SS`.
    pub time_text: String,
    pub temperature: f64,
    pub feels_like: f64,
    pub temp_min: f64,
    pub temp_max: f64,
    pub humidity: u8,
    pub pressure: u32,
    pub wind_speed: Option<f64>,
    pub visibility: Option<u32>,
    pub weather_icon: Option<String>,
    pub weather_description: Option<String>,
}

impl ForecastSample {
    pub fn utc_time(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.timestamp, 0)
    }

    /// Calendar date of the slot, on the UTC day boundary.
    pub fn utc_date(&self) -> Option<NaiveDate> {
        self.utc_time().map(|t| t.date_naive())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CityMetadata {
    pub name: String,
    pub country: String,
    /// Seconds east of UTC.
    pub timezone_offset: i32,
    pub sunrise: i64,
    pub sunset: i64,
}

impl CityMetadata {
    /// The city's UTC offset, falling back to UTC when the API sends nonsense.
    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.timezone_offset).unwrap_or_else(utc_offset)
    }
}

/// A full forecast response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub samples: Vec<ForecastSample>,
    pub city: CityMetadata,
}

pub(crate) fn utc_offset() -> FixedOffset {
    Utc.fix()
}
