//! Bridge tests: full sessions through the newline-delimited stdio transport.

use std::sync::Arc;

use serde_json::{json, Value};

use toolbox_mcp::config::ServerConfig;
use toolbox_mcp::transport::MAX_MESSAGE_BYTES;
use toolbox_mcp::{Dispatcher, ProtocolHandler, StdioTransport};

fn create_transport() -> StdioTransport {
    let config = ServerConfig {
        geocoding_url: "http://127.0.0.1:9".to_string(),
        weather_url: "http://127.0.0.1:9".to_string(),
        image_url: "http://127.0.0.1:9".to_string(),
        ..ServerConfig::default()
    };
    let dispatcher = Dispatcher::from_config(&config).expect("Failed to build dispatcher");
    StdioTransport::new(ProtocolHandler::new(Arc::new(dispatcher)))
}

/// Feed `lines` through a fresh server and collect every reply line.
async fn run_session(lines: &[String]) -> Vec<Value> {
    let transport = create_transport();
    let input = lines.join("\n") + "\n";
    let mut output = Vec::new();

    transport
        .serve(input.as_bytes(), &mut output)
        .await
        .expect("session should end cleanly at EOF");

    String::from_utf8(output)
        .expect("utf8")
        .lines()
        .map(|l| serde_json::from_str(l).expect("each reply is one JSON line"))
        .collect()
}

fn msg(value: Value) -> String {
    value.to_string()
}

fn initialize() -> String {
    msg(json!({
        "jsonrpc": "2.0",
        "id": 0,
        "method": "initialize",
        "params": {"protocolVersion": "2025-03-26", "capabilities": {}, "clientInfo": {"name": "t", "version": "0"}}
    }))
}

#[tokio::test]
async fn test_full_session() {
    let replies = run_session(&[
        initialize(),
        msg(json!({"jsonrpc": "2.0", "method": "notifications/initialized"})),
        msg(json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"})),
        msg(json!({
            "jsonrpc": "2.0",
            "id": 2,
            "method": "tools/call",
            "params": {"name": "calculator", "arguments": {"num1": 6, "num2": 3, "operator": "/"}}
        })),
        msg(json!({
            "jsonrpc": "2.0",
            "id": "t",
            "method": "tools/call",
            "params": {"name": "time", "arguments": {"timezone": "UTC-5"}}
        })),
    ])
    .await;

    // The notification produces no reply.
    assert_eq!(replies.len(), 4);
    assert_eq!(replies[0]["result"]["protocolVersion"], "2025-03-26");
    assert_eq!(replies[1]["result"]["tools"].as_array().unwrap().len(), 6);
    assert_eq!(replies[2]["id"], 2);
    assert_eq!(replies[2]["result"]["content"][0]["text"], "6 ÷ 3 = 2");

    assert_eq!(replies[3]["id"], "t");
    let text = replies[3]["result"]["content"][0]["text"].as_str().unwrap();
    let stamp = text.strip_prefix("UTC-5 시간대의 현재 시각: ").unwrap();
    assert_eq!(stamp.len(), "2024-01-01 00:00:00".len());
    assert!(stamp.chars().enumerate().all(|(i, c)| match i {
        4 | 7 => c == '-',
        10 => c == ' ',
        13 | 16 => c == ':',
        _ => c.is_ascii_digit(),
    }));
}

#[tokio::test]
async fn test_parse_error_uses_null_id() {
    let replies = run_session(&["{not json".to_string(), initialize()]).await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["id"], Value::Null);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[1]["id"], 0);
}

#[tokio::test]
async fn test_blank_lines_skipped() {
    let replies = run_session(&[String::new(), "   ".to_string(), initialize()]).await;
    assert_eq!(replies.len(), 1);
}

#[tokio::test]
async fn test_invalid_message_keeps_id() {
    let replies = run_session(&[msg(json!({"jsonrpc": "2.0", "id": 5}))]).await;
    assert_eq!(replies[0]["id"], 5);
    assert_eq!(replies[0]["error"]["code"], -32600);
}

#[tokio::test]
async fn test_unsupported_request_ids_rejected() {
    let ids = [json!(1.5), json!(true), json!(18_446_744_073_709_551_615u64)];
    let lines: Vec<String> = std::iter::once(initialize())
        .chain(
            ids.iter()
                .map(|id| msg(json!({"jsonrpc": "2.0", "id": id, "method": "ping"}))),
        )
        .collect();
    let replies = run_session(&lines).await;

    // Each request gets an answer instead of being dropped as a notification.
    assert_eq!(replies.len(), 1 + ids.len());
    for reply in &replies[1..] {
        assert_eq!(reply["error"]["code"], -32600);
        assert!(reply["id"].is_null());
    }
}

#[tokio::test]
async fn test_oversized_message_rejected() {
    let huge = format!(
        "{{\"jsonrpc\":\"2.0\",\"id\":1,\"method\":\"ping\",\"params\":{{\"pad\":\"{}\"}}}}",
        "x".repeat(MAX_MESSAGE_BYTES)
    );
    let replies = run_session(&[huge, initialize()]).await;

    assert_eq!(replies.len(), 2);
    assert_eq!(replies[0]["error"]["code"], -32700);
    assert_eq!(replies[1]["result"]["serverInfo"]["name"], "toolbox-mcp");
}

#[tokio::test]
async fn test_uninitialized_session() {
    let replies = run_session(&[
        msg(json!({"jsonrpc": "2.0", "id": 1, "method": "prompts/list"})),
        msg(json!({"jsonrpc": "2.0", "id": 2, "method": "ping"})),
    ])
    .await;

    assert_eq!(replies[0]["error"]["code"], -32600);
    assert_eq!(replies[1]["result"], json!({}));
}
