use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::{
    config::EndpointConfig,
    error::{ForecastError, truncate_body},
    model::{CityMetadata, Forecast, ForecastRequest, ForecastSample},
};

use super::ForecastProvider;

const PROVIDER: &str = "OpenWeather";

#[derive(Debug, Clone)]
pub struct OpenWeatherProvider {
    api_key: String,
    base_url: String,
    http: Client,
}

impl OpenWeatherProvider {
    pub fn new(api_key: &str, endpoint: &EndpointConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = endpoint.timeout() {
            builder = builder.timeout(timeout);
        }
        let http = builder.build()?;

        Ok(Self {
            api_key: api_key.to_owned(),
            base_url: endpoint.base_url.trim_end_matches('/').to_owned(),
            http,
        })
    }

    fn forecast_url(&self) -> String {
        format!("{}/forecast", self.base_url)
    }
}

#[derive(Debug, Deserialize)]
struct OwMain {
    temp: f64,
    feels_like: f64,
    temp_min: f64,
    temp_max: f64,
    pressure: u32,
    humidity: u8,
}

#[derive(Debug, Deserialize)]
struct OwWeather {
    description: String,
    icon: String,
}

#[derive(Debug, Deserialize)]
struct OwWind {
    speed: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct OwForecastEntry {
    dt: i64,
    dt_txt: String,
    main: OwMain,
    #[serde(default)]
    weather: Vec<OwWeather>,
    wind: Option<OwWind>,
    visibility: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct OwCity {
    name: String,
    #[serde(default)]
    country: String,
    #[serde(default)]
    timezone: i32,
    sunrise: i64,
    sunset: i64,
}

#[derive(Debug, Deserialize)]
struct OwForecastResponse {
    city: OwCity,
    list: Vec<OwForecastEntry>,
}

impl From<OwForecastEntry> for ForecastSample {
    fn from(entry: OwForecastEntry) -> Self {
        let weather = entry.weather.into_iter().next();

        Self {
            timestamp: entry.dt,
            time_text: entry.dt_txt,
            temperature: entry.main.temp,
            feels_like: entry.main.feels_like,
            temp_min: entry.main.temp_min,
            temp_max: entry.main.temp_max,
            humidity: entry.main.humidity,
            pressure: entry.main.pressure,
            wind_speed: entry.wind.and_then(|w| w.speed),
            visibility: entry.visibility,
            weather_icon: weather.as_ref().map(|w| w.icon.clone()),
            weather_description: weather.map(|w| w.description),
        }
    }
}

impl From<OwForecastResponse> for Forecast {
    fn from(parsed: OwForecastResponse) -> Self {
        Self {
            samples: parsed.list.into_iter().map(ForecastSample::from).collect(),
            city: CityMetadata {
                name: parsed.city.name,
                country: parsed.city.country,
                timezone_offset: parsed.city.timezone,
                sunrise: parsed.city.sunrise,
                sunset: parsed.city.sunset,
            },
        }
    }
}

/// Decode a `/forecast` body into the domain model.
pub fn parse_forecast(body: &str) -> Result<Forecast, ForecastError> {
    let parsed: OwForecastResponse = serde_json::from_str(body)
        .map_err(|source| ForecastError::Decode { provider: PROVIDER, source })?;

    Ok(parsed.into())
}

#[async_trait]
impl ForecastProvider for OpenWeatherProvider {
    fn name(&self) -> &'static str {
        PROVIDER
    }

    #[instrument(skip(self, request), fields(location = %request.location))]
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<Forecast, ForecastError> {
        let url = self.forecast_url();
        let count = request.sample_count.to_string();

        debug!(%url, cnt = request.sample_count, "requesting forecast");

        // Without `units` the API answers in Kelvin, which the converters expect.
        let res = self
            .http
            .get(&url)
            .query(&[
                ("q", request.location.as_str()),
                ("appid", self.api_key.as_str()),
                ("cnt", count.as_str()),
            ])
            .send()
            .await
            .map_err(|source| ForecastError::Request { provider: PROVIDER, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| ForecastError::Request { provider: PROVIDER, source })?;

        if !status.is_success() {
            return Err(ForecastError::Status {
                provider: PROVIDER,
                status,
                body: truncate_body(&body),
            });
        }

        let forecast = parse_forecast(&body)?;
        debug!(samples = forecast.samples.len(), city = %forecast.city.name, "forecast received");

        Ok(forecast)
    }
}
