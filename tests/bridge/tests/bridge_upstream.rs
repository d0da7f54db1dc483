//! Bridge tests: HTTP-backed tools end to end against mocked upstream APIs.
//!
//! Each test starts a wiremock server, points every upstream URL of the
//! server configuration at it and drives the protocol handler with
//! JSON-RPC messages the way a client would.

use std::sync::Arc;

use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use toolbox_mcp::config::ServerConfig;
use toolbox_mcp::types::{JsonRpcMessage, JsonRpcNotification, JsonRpcRequest, RequestId};
use toolbox_mcp::{Dispatcher, ProtocolHandler};

const TOKEN_ENV: &str = "TOOLBOX_BRIDGE_TEST_TOKEN";

// ─── Helpers ───────────────────────────────────────────────────────────────

fn create_handler(server: &MockServer, token_env: &str) -> ProtocolHandler {
    let config = ServerConfig {
        geocoding_url: server.uri(),
        weather_url: server.uri(),
        image_url: server.uri(),
        image_model: "test/model".to_string(),
        image_token_env: token_env.to_string(),
        http_timeout_secs: 2,
        tool_timeout_secs: 5,
        ..ServerConfig::default()
    };
    let dispatcher = Dispatcher::from_config(&config).expect("Failed to build dispatcher");
    ProtocolHandler::new(Arc::new(dispatcher))
}

async fn init_handler(handler: &ProtocolHandler) {
    let init_req = JsonRpcRequest::new(
        RequestId::Number(0),
        "initialize",
        Some(json!({
            "protocolVersion": "2025-06-18",
            "capabilities": {},
            "clientInfo": {"name": "bridge", "version": "1.0"}
        })),
    );
    handler
        .handle_message(JsonRpcMessage::Request(init_req))
        .await;

    let init_notif = JsonRpcNotification::new("notifications/initialized", None);
    handler
        .handle_message(JsonRpcMessage::Notification(init_notif))
        .await;
}

async fn call_tool(handler: &ProtocolHandler, name: &str, args: Value) -> Value {
    let req = JsonRpcRequest::new(
        RequestId::Number(1),
        "tools/call",
        Some(json!({"name": name, "arguments": args})),
    );
    let reply = handler
        .handle_message(JsonRpcMessage::Request(req))
        .await
        .expect("tools/call must reply");
    assert!(reply.get("error").is_none(), "unexpected error: {reply}");
    reply["result"].clone()
}

fn first_text(result: &Value) -> &str {
    result["content"][0]["text"].as_str().expect("text content")
}

// ─── Geocoding ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_geocode_first_match() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("q", "서울"))
        .and(query_param("format", "json"))
        .and(query_param("limit", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"lat": "37.5666791", "lon": "126.9782914", "display_name": "서울특별시, 대한민국"}
        ])))
        .expect(1)
        .mount(&server)
        .await;

    let handler = create_handler(&server, TOKEN_ENV);
    init_handler(&handler).await;

    let result = call_tool(&handler, "geocode", json!({"query": "서울"})).await;
    assert_eq!(
        first_text(&result),
        "검색 결과: 서울특별시, 대한민국\n위도: 37.5666791\n경도: 126.9782914"
    );
    assert!(result.get("isError").is_none());
}

#[tokio::test]
async fn test_geocode_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let handler = create_handler(&server, TOKEN_ENV);
    init_handler(&handler).await;

    let result = call_tool(&handler, "geocode", json!({"query": "Atlantis"})).await;
    assert_eq!(result["isError"], true);
    assert_eq!(first_text(&result), "오류: 'Atlantis'에 대한 위치를 찾을 수 없습니다.");
}

#[tokio::test]
async fn test_geocode_upstream_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let handler = create_handler(&server, TOKEN_ENV);
    init_handler(&handler).await;

    let result = call_tool(&handler, "geocode", json!({"query": "Seoul"})).await;
    assert_eq!(result["isError"], true);
    let text = first_text(&result);
    assert!(text.starts_with("오류: "));
    assert!(text.contains("503"), "{text}");
}

// ─── Weather ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_weather_forecast() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "37.5"))
        .and(query_param("longitude", "127"))
        .and(query_param("current_weather", "true"))
        .and(query_param("forecast_days", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_weather": {
                "temperature": 21.5,
                "weathercode": 0,
                "windspeed": 3.2,
                "winddirection": 180
            },
            "daily": {
                "time": ["2024-05-01", "2024-05-02"],
                "temperature_2m_max": [24.1, 19.0],
                "temperature_2m_min": [12.3, 11.0],
                "precipitation_sum": [0.0, 4.2],
                "weathercode": [1, 777]
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handler = create_handler(&server, TOKEN_ENV);
    init_handler(&handler).await;

    let result = call_tool(
        &handler,
        "get-weather",
        json!({"latitude": 37.5, "longitude": 127, "forecastDays": 2}),
    )
    .await;
    let text = first_text(&result);

    assert!(text.starts_with("현재 날씨 (위도 37.5, 경도 127):"), "{text}");
    assert!(text.contains("- 기온: 21.5°C"));
    assert!(text.contains("2일 예보:"));
    assert!(text.contains("- 2024-05-01: "));
    assert!(!text.lines().any(|l| l.starts_with("- 2024-05-01") && l.contains("강수량")));
    assert!(text.contains("날씨 코드: 777"));
    assert!(text.contains("강수량 4.2mm"));
}

#[tokio::test]
async fn test_weather_default_days() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("forecast_days", "7"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "current_weather": {
                "temperature": 1.0,
                "weathercode": 71,
                "windspeed": 0.0,
                "winddirection": 0
            },
            "daily": {
                "time": [],
                "temperature_2m_max": [],
                "temperature_2m_min": [],
                "precipitation_sum": [],
                "weathercode": []
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let handler = create_handler(&server, TOKEN_ENV);
    init_handler(&handler).await;

    let result = call_tool(&handler, "get-weather", json!({"latitude": 0, "longitude": 0})).await;
    assert!(result.get("isError").is_none());
    assert!(!first_text(&result).contains("일 예보:"));
}

// ─── Image generation ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_generate_image_data_uri() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/models/test/model"))
        .and(header("authorization", "Bearer secret-token"))
        .and(body_json(json!({"inputs": "a red fox"})))
        .respond_with(
            ResponseTemplate::new(200)
                .insert_header("content-type", "image/jpeg")
                .set_body_bytes(vec![0xff, 0xd8, 0xff]),
        )
        .expect(1)
        .mount(&server)
        .await;

    let token_env = "TOOLBOX_BRIDGE_IMAGE_TOKEN";
    std::env::set_var(token_env, "secret-token");
    let handler = create_handler(&server, token_env);
    init_handler(&handler).await;

    let result = call_tool(&handler, "generate-image", json!({"prompt": "a red fox"})).await;
    assert_eq!(first_text(&result), "data:image/jpeg;base64,/9j/");
}

#[tokio::test]
async fn test_generate_image_missing_credential() {
    let server = MockServer::start().await;
    let handler = create_handler(&server, "TOOLBOX_BRIDGE_MISSING_TOKEN");
    init_handler(&handler).await;

    let result = call_tool(&handler, "generate-image", json!({"prompt": "anything"})).await;
    assert_eq!(result["isError"], true);
    assert_eq!(
        first_text(&result),
        "오류: TOOLBOX_BRIDGE_MISSING_TOKEN 환경 변수가 설정되지 않았습니다."
    );
    assert!(server.received_requests().await.unwrap_or_default().is_empty());
}
