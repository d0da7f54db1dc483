//! Tool registration and dispatch.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::{json, Value};
use toolbox::DomainError;

use super::{HandlerError, Tool};
use crate::types::{CapabilityKind, McpError, McpResult, ToolCallResult, ToolDefinition};

/// Default bound on a single tool invocation.
pub const DEFAULT_TOOL_TIMEOUT: Duration = Duration::from_secs(30);

/// Immutable-after-startup table of tools.
pub struct ToolRegistry {
    tools: Vec<Tool>,
    index: HashMap<String, usize>,
    timeout: Duration,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
            timeout: DEFAULT_TOOL_TIMEOUT,
        }
    }

    /// Bound every invocation by `timeout`.
    pub fn set_timeout(&mut self, timeout: Duration) {
        self.timeout = timeout;
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Add a tool. Empty and duplicate names are rejected.
    pub fn register(&mut self, tool: Tool) -> McpResult<()> {
        let name = tool.spec.name.clone();
        if name.trim().is_empty() {
            return Err(McpError::InvalidRegistration {
                kind: CapabilityKind::Tool,
                reason: "name must not be empty".to_string(),
            });
        }
        if self.index.contains_key(&name) {
            return Err(McpError::DuplicateCapability {
                kind: CapabilityKind::Tool,
                name,
            });
        }

        tracing::debug!("Registered tool: {name}");
        self.index.insert(name, self.tools.len());
        self.tools.push(tool);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.index.get(name).map(|&i| &self.tools[i])
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.spec.name.clone()).collect()
    }

    /// Definitions in registration order.
    pub fn list_tools(&self) -> Vec<ToolDefinition> {
        self.tools.iter().map(|t| t.spec.definition()).collect()
    }

    /// Name, description and input shape of every tool.
    pub fn manifest(&self) -> Vec<Value> {
        self.tools
            .iter()
            .map(|t| {
                json!({
                    "name": t.spec.name,
                    "description": t.spec.description,
                    "inputSchema": t.spec.input.to_json_schema(),
                })
            })
            .collect()
    }

    /// Validate `args`, run the tool and wrap its outcome.
    ///
    /// Unknown names and invalid arguments are protocol errors. Handler
    /// failures and timeouts come back as `isError` results.
    pub async fn call(&self, name: &str, args: Option<Value>) -> McpResult<ToolCallResult> {
        let tool = self
            .get(name)
            .ok_or_else(|| McpError::unknown(CapabilityKind::Tool, name))?;
        let args = tool.spec.input.validate(args)?;

        tracing::debug!("Calling tool {name}");
        let outcome = tokio::time::timeout(self.timeout, tool.handler.call(Value::Object(args))).await;

        let content = match outcome {
            Err(_) => {
                let err = DomainError::Timeout(self.timeout.as_secs());
                tracing::warn!("Tool {name} timed out after {:?}", self.timeout);
                return Ok(ToolCallResult::error(err.render()));
            }
            Ok(Err(HandlerError::Protocol(err))) => return Err(err),
            Ok(Err(HandlerError::Domain(err))) => {
                tracing::warn!("Tool {name} failed: {err}");
                return Ok(ToolCallResult::error(err.render()));
            }
            Ok(Ok(content)) => content,
        };

        if content.is_empty() {
            return Err(McpError::InternalError(format!(
                "tool '{name}' returned no content"
            )));
        }
        Ok(ToolCallResult::success(content))
    }
}
