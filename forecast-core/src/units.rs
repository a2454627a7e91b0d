//! Conversions from raw API units to display values.
//!
//! None of these fail. Missing upstream fields are replaced by the caller with
//! the `DEFAULT_*` constants before conversion, and those defaults show up in
//! rendered output.

use chrono::{NaiveDateTime, Timelike};
use serde::Serialize;

/// Visibility assumed when the API omits it, in metres.
pub const DEFAULT_VISIBILITY_M: u32 = 10_000;
/// Wind speed assumed when the API omits it, in m/s.
pub const DEFAULT_WIND_SPEED_MPS: f64 = 1.64;
/// Icon shown when a slot carries no weather entry.
pub const DEFAULT_ICON: &str = "01d";

const KELVIN_OFFSET: f64 = 273.15;
const DAY_START_HOUR: u32 = 6;
const NIGHT_START_HOUR: u32 = 18;

pub fn kelvin_to_celsius(kelvin: f64) -> i64 {
    (kelvin - KELVIN_OFFSET).round() as i64
}

pub fn mps_to_kmh(mps: f64) -> f64 {
    mps * 3.6
}

/// Wind speed as a whole-number km/h label, e.g. `"6km/h"`. Halves round up.
pub fn convert_wind_speed(mps: f64) -> String {
    format!("{}km/h", mps_to_kmh(mps).round() as i64)
}

pub fn meters_to_kilometers(meters: u32) -> f64 {
    f64::from(meters) / 1000.0
}

/// Visibility as a whole-number km label, e.g. `"10km"`. Halves round up.
pub fn format_kilometers(meters: u32) -> String {
    format!("{}km", meters_to_kilometers(meters).round() as i64)
}

/// Swap the trailing day/night marker of an OpenWeather icon code.
///
/// Slots between 06:00 and 18:00 get the `d` variant, everything else `n`.
/// This is a fixed window, not a sunrise/sunset lookup. Codes that can't be
/// parsed as a slot time are returned as-is.
pub fn day_or_night_icon(icon: &str, time_text: &str) -> String {
    let Some(hour) = parse_slot_time(time_text).map(|t| t.hour()) else {
        return icon.to_string();
    };

    let suffix = if (DAY_START_HOUR..NIGHT_START_HOUR).contains(&hour) { 'd' } else { 'n' };

    let mut chars = icon.chars();
    match chars.next_back() {
        Some(_) => format!("{}{suffix}", chars.as_str()),
        None => icon.to_string(),
    }
}

/// Parse the API's `dt_txt` format. Accepts a `T` separator as well.
pub fn parse_slot_time(text: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(text, "%Y-%m-%d %H:%M:%S")
        .or_else(|_| NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

/// Coarse wind bands, upper bounds in m/s taken from the Beaufort scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WindCategory {
    Calm,
    LightAir,
    Breeze,
    StrongBreeze,
    Gale,
    Storm,
}

impl WindCategory {
    pub fn from_mps(mps: f64) -> Self {
        match mps {
            s if s < 0.5 => Self::Calm,
            s if s < 1.6 => Self::LightAir,
            s if s < 8.0 => Self::Breeze,
            s if s < 13.9 => Self::StrongBreeze,
            s if s < 24.5 => Self::Gale,
            _ => Self::Storm,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Calm => "calm",
            Self::LightAir => "light air",
            Self::Breeze => "breeze",
            Self::StrongBreeze => "strong breeze",
            Self::Gale => "gale",
            Self::Storm => "storm",
        }
    }
}

impl std::fmt::Display for WindCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
