//! Integration tests for the OpenWeather provider using wiremock.

use forecast_core::{
    EndpointConfig, ForecastError, ForecastProvider, ForecastRequest, LoadState,
    OpenWeatherProvider,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

fn sample_forecast_response() -> serde_json::Value {
    serde_json::json!({
        "cod": "200",
        "message": 0,
        "cnt": 4,
        "list": [
            {
                "dt": 1705276800,
                "main": {"temp": 284.2, "feels_like": 283.1, "temp_min": 283.0, "temp_max": 285.0,
                         "pressure": 1018, "humidity": 72},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
                "wind": {"speed": 2.5, "deg": 90},
                "visibility": 10000,
                "dt_txt": "2024-01-15 00:00:00"
            },
            {
                "dt": 1705287600,
                "main": {"temp": 283.2, "feels_like": 282.1, "temp_min": 282.0, "temp_max": 284.0,
                         "pressure": 1018, "humidity": 75},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
                "wind": {"speed": 2.0, "deg": 90},
                "visibility": 10000,
                "dt_txt": "2024-01-15 03:00:00"
            },
            {
                "dt": 1705298400,
                "main": {"temp": 288.9, "feels_like": 288.0, "temp_min": 288.0, "temp_max": 290.0,
                         "pressure": 1017, "humidity": 60},
                "weather": [{"id": 801, "main": "Clouds", "description": "few clouds", "icon": "02d"}],
                "wind": {"speed": 3.4, "deg": 100},
                "dt_txt": "2024-01-15 06:00:00"
            },
            {
                "dt": 1705363200,
                "main": {"temp": 282.0, "feels_like": 281.0, "temp_min": 281.0, "temp_max": 283.0,
                         "pressure": 1019, "humidity": 80},
                "weather": [{"id": 800, "main": "Clear", "description": "clear sky", "icon": "01n"}],
                "wind": {"speed": 1.2, "deg": 80},
                "visibility": 9000,
                "dt_txt": "2024-01-16 00:00:00"
            }
        ],
        "city": {
            "id": 281133,
            "name": "Gaza",
            "coord": {"lat": 31.5, "lon": 34.4667},
            "country": "PS",
            "population": 410000,
            "timezone": 0,
            "sunrise": 1705293600,
            "sunset": 1705330620
        }
    })
}

fn provider_for(server: &MockServer) -> OpenWeatherProvider {
    let endpoint = EndpointConfig {
        base_url: format!("{}/data/2.5", server.uri()),
        timeout_secs: 5,
        ..EndpointConfig::default()
    };
    OpenWeatherProvider::new("TEST_KEY", &endpoint).expect("provider should build")
}

fn request(location: &str) -> ForecastRequest {
    ForecastRequest { location: location.to_string(), sample_count: 56 }
}

#[tokio::test]
async fn fetch_forecast_sends_location_key_and_count() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .and(query_param("q", "Gaza"))
        .and(query_param("appid", "TEST_KEY"))
        .and(query_param("cnt", "56"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .expect(1)
        .mount(&server)
        .await;

    let forecast = provider_for(&server)
        .fetch_forecast(&request("Gaza"))
        .await
        .expect("forecast should be fetched");

    assert_eq!(forecast.city.name, "Gaza");
    assert_eq!(forecast.samples.len(), 4);
    assert_eq!(forecast.samples[2].visibility, None);
}

#[tokio::test]
async fn fetched_forecast_builds_dashboard() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_forecast_response()))
        .mount(&server)
        .await;

    let result = provider_for(&server).fetch_forecast(&request("Gaza")).await;
    let LoadState::Ready(dash) = LoadState::from_result(result) else {
        panic!("expected a ready dashboard");
    };

    assert_eq!(dash.location, "Gaza");
    assert_eq!(dash.hourly.len(), 4);
    assert_eq!(dash.daily.len(), 2);
    assert_eq!(dash.daily[0].description, "few clouds");
    assert_eq!(dash.daily[0].conditions.visibility, "10km");
    assert!(dash.daily[1].placeholder);

    let current = dash.current.as_ref().expect("current panel");
    assert_eq!(current.temperatures.current, 11);
    assert_eq!(current.conditions.sunrise, "4:40");
    assert_eq!(current.icon, "01n");
}

#[tokio::test]
async fn http_error_is_reported_with_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(
            ResponseTemplate::new(404)
                .set_body_json(serde_json::json!({"cod": "404", "message": "city not found"})),
        )
        .mount(&server)
        .await;

    let err = provider_for(&server)
        .fetch_forecast(&request("Atlantis"))
        .await
        .unwrap_err();

    assert!(matches!(err, ForecastError::Status { .. }));
    let msg = err.to_string();
    assert!(msg.contains("404"));
    assert!(msg.contains("city not found"));

    let state = LoadState::from_result(Err::<forecast_core::Forecast, _>(err));
    assert!(state.status_message().unwrap().starts_with("Error: "));
}

#[tokio::test]
async fn unauthorized_key_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Invalid API key"))
        .mount(&server)
        .await;

    let err = provider_for(&server).fetch_forecast(&request("Gaza")).await.unwrap_err();
    assert!(err.to_string().contains("401"));
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&server)
        .await;

    let err = provider_for(&server).fetch_forecast(&request("Gaza")).await.unwrap_err();
    assert!(matches!(err, ForecastError::Decode { .. }));
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let endpoint = EndpointConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout_secs: 2,
        ..EndpointConfig::default()
    };
    let provider = OpenWeatherProvider::new("TEST_KEY", &endpoint).unwrap();

    let err = provider.fetch_forecast(&request("Gaza")).await.unwrap_err();
    assert!(matches!(err, ForecastError::Request { .. }));
}

#[tokio::test]
async fn zero_timeout_does_not_abort_requests() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/data/2.5/forecast"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(sample_forecast_response())
                .set_delay(std::time::Duration::from_millis(50)),
        )
        .mount(&server)
        .await;

    let endpoint = EndpointConfig {
        base_url: format!("{}/data/2.5", server.uri()),
        timeout_secs: 0,
        ..EndpointConfig::default()
    };
    let provider = OpenWeatherProvider::new("TEST_KEY", &endpoint).unwrap();

    let forecast = provider.fetch_forecast(&request("Gaza")).await.expect("no timeout applied");
    assert_eq!(forecast.samples.len(), 4);
}
