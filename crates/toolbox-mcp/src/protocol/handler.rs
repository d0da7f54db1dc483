//! JSON-RPC method routing.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::Mutex;

use super::negotiation::NegotiatedCapabilities;
use super::validator::{parse_params, validate_request};
use crate::dispatcher::Dispatcher;
use crate::types::{
    error_codes, CancelledParams, CapabilityKind, InitializeParams, JsonRpcMessage, JsonRpcNotification,
    JsonRpcRequest, JsonRpcResponse, LogLevel, McpError, McpResult, PromptGetParams,
    ResourceReadParams, SetLevelParams, ToolCallParams, JSONRPC_VERSION,
};

/// Routes decoded messages to the dispatcher and shapes the replies.
pub struct ProtocolHandler {
    dispatcher: Arc<Dispatcher>,
    negotiated: Mutex<NegotiatedCapabilities>,
    log_level: Mutex<Option<LogLevel>>,
}

impl ProtocolHandler {
    pub fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self {
            dispatcher,
            negotiated: Mutex::new(NegotiatedCapabilities::default()),
            log_level: Mutex::new(None),
        }
    }

    pub fn dispatcher(&self) -> &Arc<Dispatcher> {
        &self.dispatcher
    }

    /// Level last requested through logging/setLevel.
    pub async fn log_level(&self) -> Option<LogLevel> {
        *self.log_level.lock().await
    }

    pub async fn is_initialized(&self) -> bool {
        self.negotiated.lock().await.initialized
    }

    /// Handle one message. Returns the reply for requests, `None` otherwise.
    pub async fn handle_message(&self, message: JsonRpcMessage) -> Option<Value> {
        match message {
            JsonRpcMessage::Request(request) => Some(self.handle_request(request).await),
            JsonRpcMessage::Notification(notification) => {
                self.handle_notification(notification).await;
                None
            }
            JsonRpcMessage::Response(_) | JsonRpcMessage::Error(_) => {
                tracing::debug!("Ignoring client response message");
                None
            }
        }
    }

    async fn handle_request(&self, request: JsonRpcRequest) -> Value {
        let id = request.id.clone();
        let method = request.method.clone();
        tracing::debug!("Request {id}: {method}");

        let outcome = match validate_request(&request) {
            Ok(()) => self.dispatch_request(&method, request.params).await,
            Err(e) => Err(e),
        };

        match outcome {
            Ok(result) => to_value(JsonRpcResponse::new(id, result)),
            Err(e) => {
                if e.is_unknown_capability() {
                    tracing::info!("Request {id} ({method}): {e}");
                } else {
                    tracing::warn!("Request {id} ({method}) failed: {e}");
                }
                to_value(e.to_json_rpc_error(id))
            }
        }
    }

    async fn dispatch_request(&self, method: &str, params: Option<Value>) -> McpResult<Value> {
        match method {
            "initialize" => {
                let params: InitializeParams = parse_params(params)?;
                let result = self
                    .negotiated
                    .lock()
                    .await
                    .negotiate(params, self.dispatcher.info().clone());
                return Ok(serde_json::to_value(result)?);
            }
            "ping" => return Ok(json!({})),
            _ => {}
        }

        self.negotiated.lock().await.ensure_initialized()?;

        match method {
            "tools/list" => Ok(serde_json::to_value(self.dispatcher.list_tools())?),
            "tools/call" => {
                let params: ToolCallParams = parse_params(params)?;
                self.dispatcher
                    .invoke(CapabilityKind::Tool, &params.name, params.arguments)
                    .await
            }
            "resources/list" => Ok(serde_json::to_value(self.dispatcher.list_resources())?),
            "resources/templates/list" => Ok(serde_json::to_value(
                self.dispatcher.list_resource_templates(),
            )?),
            "resources/read" => {
                let params: ResourceReadParams = parse_params(params)?;
                self.dispatcher
                    .invoke(CapabilityKind::Resource, &params.uri, None)
                    .await
            }
            "prompts/list" => Ok(serde_json::to_value(self.dispatcher.list_prompts())?),
            "prompts/get" => {
                let params: PromptGetParams = parse_params(params)?;
                self.dispatcher
                    .invoke(CapabilityKind::Prompt, &params.name, params.arguments)
                    .await
            }
            "logging/setLevel" => {
                let params: SetLevelParams = parse_params(params)?;
                tracing::info!("Client requested log level {:?}", params.level);
                *self.log_level.lock().await = Some(params.level);
                Ok(json!({}))
            }
            other => Err(McpError::MethodNotFound(other.to_string())),
        }
    }

    async fn handle_notification(&self, notification: JsonRpcNotification) {
        match notification.method.as_str() {
            "initialized" | "notifications/initialized" => {
                self.negotiated.lock().await.mark_initialized();
            }
            "notifications/cancelled" => {
                match parse_params::<CancelledParams>(notification.params) {
                    // Requests run one at a time, so by now it has already been answered.
                    Ok(params) => tracing::debug!(
                        "Cancellation for request {} ignored: {}",
                        params.request_id,
                        params.reason.as_deref().unwrap_or("no reason")
                    ),
                    Err(e) => tracing::warn!("Malformed cancellation: {e}"),
                }
            }
            other => tracing::debug!("Ignoring notification: {other}"),
        }
    }
}

fn to_value<T: serde::Serialize>(message: T) -> Value {
    serde_json::to_value(message).unwrap_or_else(|e| {
        json!({
            "jsonrpc": JSONRPC_VERSION,
            "id": null,
            "error": {
                "code": error_codes::INTERNAL_ERROR,
                "message": format!("Internal error: {e}"),
            }
        })
    })
}
