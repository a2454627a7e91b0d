//! Display-ready view of one forecast response.
//!
//! Everything here is pure: the CLI renders it as text or dumps it as JSON.

use chrono::{DateTime, FixedOffset};
use serde::Serialize;

use crate::{
    grouper::{DailySummary, derive_daily_summaries, today_samples},
    model::{CityMetadata, Forecast, ForecastSample},
    units::{
        DEFAULT_ICON, DEFAULT_VISIBILITY_M, DEFAULT_WIND_SPEED_MPS, WindCategory,
        convert_wind_speed, day_or_night_icon, format_kilometers, kelvin_to_celsius,
        parse_slot_time,
    },
};

pub const LOADING_MESSAGE: &str = "Loading weather…";

/// Temperatures in whole °C.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Temperatures {
    pub current: i64,
    pub feels_like: i64,
    pub min: i64,
    pub max: i64,
}

impl Temperatures {
    fn from_sample(sample: &ForecastSample) -> Self {
        Self {
            current: kelvin_to_celsius(sample.temperature),
            feels_like: kelvin_to_celsius(sample.feels_like),
            min: kelvin_to_celsius(sample.temp_min),
            max: kelvin_to_celsius(sample.temp_max),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wind {
    pub speed: String,
    pub category: WindCategory,
}

impl Wind {
    fn from_mps(mps: Option<f64>) -> Self {
        let mps = mps.unwrap_or(DEFAULT_WIND_SPEED_MPS);
        Self { speed: convert_wind_speed(mps), category: WindCategory::from_mps(mps) }
    }
}

/// The detail block shown next to a day: visibility, pressure and so on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conditions {
    pub visibility: String,
    pub pressure: String,
    pub humidity: String,
    pub wind: Wind,
    pub sunrise: String,
    pub sunset: String,
}

impl Conditions {
    fn new(sample: Option<&ForecastSample>, city: &CityMetadata) -> Self {
        let offset = city.offset();
        Self {
            visibility: format_kilometers(
                sample.and_then(|s| s.visibility).unwrap_or(DEFAULT_VISIBILITY_M),
            ),
            pressure: sample.map(|s| format!("{} hPa", s.pressure)).unwrap_or_default(),
            humidity: sample.map(|s| format!("{}%", s.humidity)).unwrap_or_default(),
            wind: Wind::from_mps(sample.and_then(|s| s.wind_speed)),
            sunrise: clock_time(city.sunrise, offset),
            sunset: clock_time(city.sunset, offset),
        }
    }
}

/// Today's headline panel, built from the first slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentPanel {
    pub weekday: String,
    pub date: String,
    pub temperatures: Temperatures,
    pub description: String,
    pub icon: String,
    pub conditions: Conditions,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourlySlot {
    pub time: String,
    pub icon: String,
    pub temperature: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyRow {
    /// True when the day had no slot to represent it.
    pub placeholder: bool,
    pub date: String,
    pub weekday: String,
    pub icon: String,
    pub description: String,
    pub temperatures: Temperatures,
    pub conditions: Conditions,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub location: String,
    pub current: Option<CurrentPanel>,
    pub hourly: Vec<HourlySlot>,
    pub daily: Vec<DailyRow>,
}

impl Dashboard {
    pub fn build(forecast: &Forecast) -> Self {
        let city = &forecast.city;
        let samples = today_samples(&forecast.samples);

        let current = samples.first().map(|first| CurrentPanel {
            weekday: slot_format(first, "%A"),
            date: slot_format(first, "%d.%m.%Y"),
            temperatures: Temperatures::from_sample(first),
            description: description(first),
            icon: day_or_night_icon(&icon(first), &first.time_text),
            conditions: Conditions::new(Some(first), city),
        });

        let hourly = samples
            .iter()
            .map(|s| HourlySlot {
                time: slot_format(s, "%-I:%M %p"),
                icon: day_or_night_icon(&icon(s), &s.time_text),
                temperature: kelvin_to_celsius(s.temperature),
            })
            .collect();

        let daily = derive_daily_summaries(samples, city.offset())
            .into_iter()
            .map(|summary| daily_row(summary, city))
            .collect();

        Self { location: city.name.clone(), current, hourly, daily }
    }
}

fn daily_row(summary: DailySummary<'_>, city: &CityMetadata) -> DailyRow {
    let conditions = Conditions::new(summary.sample, city);

    match summary.sample {
        Some(sample) => DailyRow {
            placeholder: false,
            date: slot_format(sample, "%d.%m"),
            weekday: slot_format(sample, "%A"),
            icon: icon(sample),
            description: description(sample),
            temperatures: Temperatures::from_sample(sample),
            conditions,
        },
        None => DailyRow {
            placeholder: true,
            date: String::new(),
            weekday: String::new(),
            icon: DEFAULT_ICON.to_string(),
            description: String::new(),
            temperatures: Temperatures::default(),
            conditions,
        },
    }
}

fn icon(sample: &ForecastSample) -> String {
    sample.weather_icon.clone().unwrap_or_else(|| DEFAULT_ICON.to_string())
}

fn description(sample: &ForecastSample) -> String {
    sample.weather_description.clone().unwrap_or_default()
}

fn slot_format(sample: &ForecastSample, fmt: &str) -> String {
    parse_slot_time(&sample.time_text)
        .map(|t| t.format(fmt).to_string())
        .unwrap_or_default()
}

fn clock_time(epoch: i64, offset: FixedOffset) -> String {
    DateTime::from_timestamp(epoch, 0)
        .map(|t| t.with_timezone(&offset).format("%-H:%M").to_string())
        .unwrap_or_default()
}

/// Where a fetch-and-render cycle currently stands.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum LoadState {
    Loading,
    Failed(String),
    Ready(Box<Dashboard>),
}

impl LoadState {
    /// Build the final state from a fetch outcome. Error kinds are not told apart.
    pub fn from_result<E: std::fmt::Display>(result: Result<Forecast, E>) -> Self {
        match result {
            Ok(forecast) => Self::Ready(Box::new(Dashboard::build(&forecast))),
            Err(err) => Self::Failed(err.to_string()),
        }
    }

    /// The user-facing line for the non-ready states.
    pub fn status_message(&self) -> Option<String> {
        match self {
            Self::Loading => Some(LOADING_MESSAGE.to_string()),
            Self::Failed(msg) => Some(format!("Error: {msg}")),
            Self::Ready(_) => None,
        }
    }
}
