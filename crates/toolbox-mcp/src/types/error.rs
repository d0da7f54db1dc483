//! Protocol-level errors and their JSON-RPC codes.
//!
//! Only failures the client must treat as a broken request live here. Tool
//! handler failures are [`toolbox::DomainError`]s and travel as content.

use serde_json::{json, Value};
use thiserror::Error;

use super::capabilities::CapabilityKind;
use super::message::{JsonRpcError, RequestId};

/// Standard JSON-RPC error codes.
pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
    pub const INTERNAL_ERROR: i32 = -32603;
}

/// Server-specific error codes.
pub mod mcp_error_codes {
    pub const TOOL_NOT_FOUND: i32 = -32001;
    pub const RESOURCE_NOT_FOUND: i32 = -32002;
    pub const PROMPT_NOT_FOUND: i32 = -32003;
    pub const DUPLICATE_CAPABILITY: i32 = -32010;
}

/// Result alias used throughout the server crate.
pub type McpResult<T> = Result<T, McpError>;

#[derive(Error, Debug)]
pub enum McpError {
    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Method not found: {0}")]
    MethodNotFound(String),

    #[error("Invalid params: {0}")]
    InvalidParams(String),

    #[error("Invalid argument '{field}': {reason}")]
    InvalidArgument { field: String, reason: String },

    #[error("Internal error: {0}")]
    InternalError(String),

    #[error("Tool not found: {0}")]
    ToolNotFound(String),

    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("Duplicate {kind} registration: {name}")]
    DuplicateCapability { kind: CapabilityKind, name: String },

    #[error("Invalid {kind} registration: {reason}")]
    InvalidRegistration { kind: CapabilityKind, reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl McpError {
    /// The lookup failure for a capability of `kind` named `name`.
    pub fn unknown(kind: CapabilityKind, name: impl Into<String>) -> Self {
        let name = name.into();
        match kind {
            CapabilityKind::Tool => McpError::ToolNotFound(name),
            CapabilityKind::Resource => McpError::ResourceNotFound(name),
            CapabilityKind::Prompt => McpError::PromptNotFound(name),
        }
    }

    /// Shorthand for a field-level validation failure.
    pub fn invalid_argument(field: impl Into<String>, reason: impl Into<String>) -> Self {
        McpError::InvalidArgument {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Whether this error reports a lookup of an unregistered capability.
    pub fn is_unknown_capability(&self) -> bool {
        matches!(
            self,
            McpError::ToolNotFound(_) | McpError::ResourceNotFound(_) | McpError::PromptNotFound(_)
        )
    }

    /// JSON-RPC error code for this error.
    pub fn code(&self) -> i32 {
        match self {
            McpError::ParseError(_) => error_codes::PARSE_ERROR,
            McpError::InvalidRequest(_) => error_codes::INVALID_REQUEST,
            McpError::MethodNotFound(_) => error_codes::METHOD_NOT_FOUND,
            McpError::InvalidParams(_) | McpError::InvalidArgument { .. } => {
                error_codes::INVALID_PARAMS
            }
            McpError::ToolNotFound(_) => mcp_error_codes::TOOL_NOT_FOUND,
            McpError::ResourceNotFound(_) => mcp_error_codes::RESOURCE_NOT_FOUND,
            McpError::PromptNotFound(_) => mcp_error_codes::PROMPT_NOT_FOUND,
            McpError::DuplicateCapability { .. } => mcp_error_codes::DUPLICATE_CAPABILITY,
            McpError::InternalError(_)
            | McpError::InvalidRegistration { .. }
            | McpError::Config(_)
            | McpError::Io(_)
            | McpError::Json(_) => error_codes::INTERNAL_ERROR,
        }
    }

    /// Structured detail attached to the JSON-RPC error, if any.
    pub fn data(&self) -> Option<Value> {
        match self {
            McpError::InvalidArgument { field, reason } => {
                Some(json!({ "field": field, "reason": reason }))
            }
            McpError::ToolNotFound(name) => Some(json!({ "kind": "tool", "name": name })),
            McpError::ResourceNotFound(uri) => Some(json!({ "kind": "resource", "uri": uri })),
            McpError::PromptNotFound(name) => Some(json!({ "kind": "prompt", "name": name })),
            _ => None,
        }
    }

    /// Convert into a JSON-RPC error response for request `id`.
    pub fn to_json_rpc_error(&self, id: RequestId) -> JsonRpcError {
        JsonRpcError::new(id, self.code(), self.to_string()).with_data(self.data())
    }
}
