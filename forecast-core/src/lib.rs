//! Core library for the `weather` dashboard.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The forecast provider abstraction and its OpenWeather implementation
//! - Shared domain models (samples, city metadata)
//! - Grouping of 3-hour samples into an hourly strip and a daily outlook
//! - Unit conversion and the display-ready dashboard view
//!
//! It is used by `forecast-cli`, but can also be reused by other front ends.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod grouper;
pub mod model;
pub mod provider;
pub mod units;

pub use config::{Config, EndpointConfig};
pub use dashboard::{Dashboard, LoadState};
pub use error::ForecastError;
pub use grouper::{DailySummary, derive_daily_summaries, today_samples};
pub use model::{CityMetadata, Forecast, ForecastRequest, ForecastSample};
pub use provider::{ForecastProvider, openweather::OpenWeatherProvider, provider_from_config};
