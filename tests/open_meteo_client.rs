mod common;

use chrono::NaiveDate;
use hydra_energy_dashboard::clients::{OpenMeteoClient, WeatherError, WeatherProvider, MOCK_CONDITIONS};
use hydra_energy_dashboard::domain::{DateRange, WeatherSource};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{config_for, open_meteo_body};

fn client(server: &MockServer) -> OpenMeteoClient {
    OpenMeteoClient::new(&config_for(&server.uri()).weather).unwrap()
}

fn march(from: u32, to: u32) -> DateRange {
    DateRange::new(
        NaiveDate::from_ymd_opt(2025, 3, from).unwrap(),
        NaiveDate::from_ymd_opt(2025, 3, to).unwrap(),
    )
    .unwrap()
}

#[tokio::test]
async fn test_live_weather_is_zipped_per_day() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "-25.7479"))
        .and(query_param("longitude", "28.2293"))
        .and(query_param("start_date", "2025-03-01"))
        .and(query_param("end_date", "2025-03-03"))
        .and(query_param(
            "daily",
            "temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode",
        ))
        .and(query_param("timezone", "Africa/Johannesburg"))
        .respond_with(ResponseTemplate::new(200).set_body_json(open_meteo_body()))
        .expect(1)
        .mount(&server)
        .await;

    let report = client(&server).daily_weather(&march(1, 3)).await;

    assert_eq!(report.source, WeatherSource::Live);
    assert_eq!(report.days.len(), 3);
    let temps: Vec<f64> = report.days.iter().map(|d| d.temp).collect();
    for (got, want) in temps.iter().zip([23.0, 21.8, 19.3]) {
        assert!((got - want).abs() < 1e-9, "got {got}, want {want}");
    }
    let conditions: Vec<&str> = report.days.iter().map(|d| d.condition.as_str()).collect();
    assert_eq!(conditions, ["partly cloudy", "rainy", "thunderstorms"]);
    assert_eq!(report.days[1].precipitation, Some(4.2));
    assert!(report.days.iter().all(|d| d.humidity.is_none()));
}

#[tokio::test]
async fn test_server_error_falls_back_to_mock_data() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let report = client(&server).daily_weather(&march(1, 31)).await;

    assert_eq!(report.source, WeatherSource::Fallback);
    assert_eq!(report.days.len(), 31);
    assert_eq!(report.days[0].date, "2025-03-01");
    assert_eq!(report.days[30].date, "2025-03-31");
    assert!(report
        .days
        .iter()
        .all(|d| MOCK_CONDITIONS.contains(&d.condition.as_str())));
}

#[tokio::test]
async fn test_missing_daily_time_falls_back() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "daily": { "temperature_2m_max": [20.0] }
        })))
        .mount(&server)
        .await;

    let c = client(&server);
    assert!(matches!(c.fetch_daily(&march(1, 2)).await, Err(WeatherError::Decode(_))));

    let report = c.daily_weather(&march(1, 2)).await;
    assert!(report.is_fallback());
    assert_eq!(report.days.len(), 2);
}

#[tokio::test]
async fn test_misaligned_arrays_fall_back() {
    let server = MockServer::start().await;
    let mut body = open_meteo_body();
    body["daily"]["weathercode"] = json!([1, 2]);
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&server)
        .await;

    let c = client(&server);
    assert!(matches!(
        c.fetch_daily(&march(1, 3)).await,
        Err(WeatherError::Misaligned { days: 3 })
    ));
    assert!(c.daily_weather(&march(1, 3)).await.is_fallback());
}

#[tokio::test]
async fn test_unreachable_backend_never_errors() {
    let server = MockServer::start().await;
    let cfg = config_for(&server.uri());
    drop(server);

    let report = OpenMeteoClient::new(&cfg.weather)
        .unwrap()
        .with_fallback_seed(3)
        .daily_weather(&march(10, 12))
        .await;

    assert!(report.is_fallback());
    let dates: Vec<&str> = report.days.iter().map(|d| d.date.as_str()).collect();
    assert_eq!(dates, ["2025-03-10", "2025-03-11", "2025-03-12"]);
}
