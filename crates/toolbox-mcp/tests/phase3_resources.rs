//! Phase 3: Resource functionality tests.

mod common;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;

use toolbox_mcp::resources::{Resource, ResourceProducer, ResourceRegistry, SERVER_INFO_URI};
use toolbox_mcp::tools::{calculator, greet, Tool};
use toolbox_mcp::types::{CapabilityKind, Implementation, McpError, McpResult};
use toolbox_mcp::Dispatcher;

use common::fixtures::offline_dispatcher;

struct Constant(&'static str);

#[async_trait]
impl ResourceProducer for Constant {
    async fn read(&self) -> McpResult<String> {
        Ok(self.0.to_string())
    }
}

async fn read_server_info() -> Value {
    let dispatcher = offline_dispatcher();
    let result = dispatcher.resources().read(SERVER_INFO_URI).await.unwrap();
    assert_eq!(result.contents.len(), 1);
    assert_eq!(result.contents[0].mime_type.as_deref(), Some("application/json"));
    serde_json::from_str(&result.contents[0].text).unwrap()
}

#[tokio::test]
async fn test_resource_list() {
    let dispatcher = offline_dispatcher();
    let resources = dispatcher.list_resources().resources;
    assert_eq!(resources.len(), 1);
    assert_eq!(resources[0].uri, "server://info");
    assert!(dispatcher.list_resource_templates().resource_templates.is_empty());
}

#[tokio::test]
async fn test_server_info_document() {
    let info = read_server_info().await;
    assert_eq!(info["name"], "toolbox-mcp");
    assert!(info["version"].is_string());
    assert!(info["uptime"].as_f64().unwrap() >= 0.0);
    assert!(chrono::DateTime::parse_from_rfc3339(info["timestamp"].as_str().unwrap()).is_ok());

    let tools = info["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 6);
    let weather = tools.iter().find(|t| t["name"] == "get-weather").unwrap();
    assert!(weather["description"].is_string());
    assert_eq!(weather["inputSchema"]["type"], "object");
}

#[tokio::test]
async fn test_server_info_recomputed_per_read() {
    let dispatcher = offline_dispatcher();
    let first = dispatcher.resources().read(SERVER_INFO_URI).await.unwrap();
    tokio::time::sleep(Duration::from_millis(20)).await;
    let second = dispatcher.resources().read(SERVER_INFO_URI).await.unwrap();

    let uptime = |text: &str| -> f64 {
        let v: Value = serde_json::from_str(text).unwrap();
        v["uptime"].as_f64().unwrap()
    };
    assert!(uptime(&second.contents[0].text) > uptime(&first.contents[0].text));
}

#[tokio::test]
async fn test_unknown_resource() {
    let dispatcher = offline_dispatcher();
    let err = dispatcher
        .invoke(CapabilityKind::Resource, "server://missing", None)
        .await
        .unwrap_err();
    assert!(matches!(err, McpError::ResourceNotFound(uri) if uri == "server://missing"));
}

#[tokio::test]
async fn test_duplicate_uri_rejected() {
    let mut registry = ResourceRegistry::new();
    registry
        .register(Resource::new("mem://a", "a", "first", "text/plain", Constant("one")))
        .unwrap();
    let err = registry
        .register(Resource::new("mem://a", "a2", "second", "text/plain", Constant("two")))
        .unwrap_err();
    assert!(matches!(err, McpError::DuplicateCapability { .. }));

    let result = registry.read("mem://a").await.unwrap();
    assert_eq!(result.contents[0].text, "one");
    assert_eq!(registry.uris(), ["mem://a"]);
}

#[test]
fn test_started_is_in_the_past() {
    let dispatcher = offline_dispatcher();
    assert!(dispatcher.started() <= Instant::now());
}

#[tokio::test]
async fn test_tools_after_server_info_rejected() {
    let mut builder = Dispatcher::builder(Implementation::server("late-tools"));
    builder.register_tool(Tool::new(greet::spec(), greet::Greet)).unwrap();
    builder.register_server_info().unwrap();

    let err = builder
        .register_tool(Tool::new(calculator::spec(), calculator::Calculator))
        .unwrap_err();
    assert!(matches!(
        err,
        McpError::InvalidRegistration { kind: CapabilityKind::Tool, .. }
    ));

    let dispatcher = builder.build();
    assert_eq!(dispatcher.tools().names(), ["greet"]);

    let result = dispatcher.resources().read(SERVER_INFO_URI).await.unwrap();
    let info: Value = serde_json::from_str(&result.contents[0].text).unwrap();
    let tools = info["tools"].as_array().unwrap();
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0]["name"], "greet");
}
