//! Upstream HTTP clients against mock servers.

use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toolbox::http::build_client;
use toolbox::{DomainError, GeocodeClient, ImageClient, WeatherClient};

fn http() -> reqwest::Client {
    build_client("toolbox-tests/0.1", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn test_geocode_returns_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "Seoul"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "37.5666791", "lon": "126.9782914", "display_name": "서울특별시, 대한민국"},
            {"lat": "0", "lon": "0", "display_name": "ignored"}
        ])))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(http(), server.uri());
    let place = client.search("Seoul").await.unwrap();

    assert_eq!(place.display_name, "서울특별시, 대한민국");
    assert_eq!(
        place.to_string(),
        "검색 결과: 서울특별시, 대한민국\n위도: 37.5666791\n경도: 126.9782914"
    );
}

#[tokio::test]
async fn test_geocode_empty_result_is_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(http(), server.uri());
    let err = client.search("nowhere-at-all").await.unwrap_err();

    assert!(matches!(err, DomainError::PlaceNotFound(ref q) if q == "nowhere-at-all"));
}

#[tokio::test]
async fn test_geocode_http_failure_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = GeocodeClient::new(http(), server.uri());
    let err = client.search("Seoul").await.unwrap_err();

    assert!(matches!(err, DomainError::UpstreamStatus { status: 503, .. }));
    assert!(err.render().starts_with("오류: "));
    assert!(err.render().contains("503"));
}

#[tokio::test]
async fn test_weather_forecast_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "37.5"))
        .and(query_param("longitude", "127"))
        .and(query_param("forecast_days", "3"))
        .and(query_param("current_weather", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_weather": {"temperature": 18.0, "weathercode": 0, "windspeed": 3.0, "winddirection": 90.0},
            "daily": {
                "time": ["2024-06-01"],
                "temperature_2m_max": [22.0],
                "temperature_2m_min": [12.0],
                "precipitation_sum": [0.0],
                "weathercode": [95]
            }
        })))
        .mount(&server)
        .await;

    let client = WeatherClient::new(http(), server.uri());
    let forecast = client.forecast(37.5, 127.0, 3).await.unwrap();
    let text = forecast.render(37.5, 127.0, 3);

    assert!(text.contains("- 상태: 맑음"));
    assert!(text.contains("1일 예보:"));
    assert!(text.contains("- 2024-06-01: 뇌우, 최고 22°C / 최저 12°C"));
    assert!(!text.contains("강수량"));
}

#[tokio::test]
async fn test_weather_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"unexpected": true})))
        .mount(&server)
        .await;

    let client = WeatherClient::new(http(), server.uri());
    let err = client.forecast(0.0, 0.0, 7).await.unwrap_err();

    assert!(matches!(err, DomainError::Decode { .. }));
}

#[tokio::test]
async fn test_image_generation_returns_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test/model"))
        .and(header("authorization", "Bearer secret"))
        .and(body_json(json!({"inputs": "a red fox"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xFF, 0xD8, 0xFF]),
        )
        .mount(&server)
        .await;

    let client = ImageClient::new(http(), server.uri(), "test/model");
    let image = client.generate("a red fox", "secret").await.unwrap();

    assert_eq!(image.mime_type, "image/jpeg");
    assert_eq!(image.data_uri(), "data:image/jpeg;base64,/9j/");
}

#[tokio::test]
async fn test_image_generation_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = ImageClient::new(http(), server.uri(), "test/model");
    let err = client.generate("prompt", "bad").await.unwrap_err();

    assert!(matches!(err, DomainError::UpstreamStatus { status: 401, .. }));
}

#[tokio::test]
async fn test_timeout_surfaces_as_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(2))
                .set_body_json(json!([])),
        )
        .mount(&server)
        .await;

    let slow = build_client("toolbox-tests/0.1", Duration::from_millis(100)).unwrap();
    let client = GeocodeClient::new(slow, server.uri());
    let err = client.search("Seoul").await.unwrap_err();

    assert!(matches!(err, DomainError::Network { .. }));
}
