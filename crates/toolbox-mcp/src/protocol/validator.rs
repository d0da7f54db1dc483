//! Structural checks on incoming JSON-RPC messages.

use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::types::{JsonRpcRequest, McpError, McpResult, JSONRPC_VERSION};

/// Reject requests that are not JSON-RPC 2.0 or name no method.
pub fn validate_request(request: &JsonRpcRequest) -> McpResult<()> {
    if request.jsonrpc != JSONRPC_VERSION {
        return Err(McpError::InvalidRequest(format!(
            "unsupported jsonrpc version '{}'",
            request.jsonrpc
        )));
    }
    if request.method.is_empty() {
        return Err(McpError::InvalidRequest("method must not be empty".to_string()));
    }
    Ok(())
}

/// Deserialize method params. Absent params are read as `{}`.
pub fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> McpResult<T> {
    let params = match params {
        None | Some(Value::Null) => json!({}),
        Some(value) => value,
    };
    serde_json::from_value(params).map_err(|e| McpError::InvalidParams(e.to_string()))
}
