//! Test data fixtures for MCP server tests.

use std::sync::Arc;

use toolbox_mcp::config::ServerConfig;
use toolbox_mcp::Dispatcher;

/// Address nothing listens on; upstream calls fail fast.
pub const UNREACHABLE: &str = "http://127.0.0.1:9";

/// Config pointing every upstream API at `base_url`.
pub fn test_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        geocoding_url: base_url.to_string(),
        weather_url: base_url.to_string(),
        image_url: base_url.to_string(),
        image_token_env: "TOOLBOX_TEST_UNSET_TOKEN".to_string(),
        http_timeout_secs: 2,
        tool_timeout_secs: 5,
        ..ServerConfig::default()
    }
}

/// Dispatcher with every built-in capability, upstreams at `base_url`.
pub fn create_test_dispatcher(base_url: &str) -> Arc<Dispatcher> {
    Arc::new(Dispatcher::from_config(&test_config(base_url)).expect("Failed to build dispatcher"))
}

/// Dispatcher for tests that never reach an upstream API.
pub fn offline_dispatcher() -> Arc<Dispatcher> {
    create_test_dispatcher(UNREACHABLE)
}
