//! MCP tool implementations.
//!
//! Each tool module exposes `spec()` describing its name and input shape,
//! and a handler type implementing [`ToolHandler`]. Handlers receive
//! arguments that already passed [`InputSchema::validate`], so they only
//! deal with domain failures.

pub mod calculator;
pub mod generate_image;
pub mod geocode;
pub mod get_weather;
pub mod greet;
pub mod registry;
pub mod time;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;
use toolbox::{DomainError, GeocodeClient, ImageClient, WeatherClient};

use crate::config::ServerConfig;
use crate::schema::InputSchema;
use crate::types::{content_output_schema, McpError, McpResult, ToolContent, ToolDefinition};

pub use registry::ToolRegistry;

/// Why a handler did not produce content.
#[derive(Debug)]
pub enum HandlerError {
    /// The request itself is unusable; reported as a JSON-RPC error.
    Protocol(McpError),
    /// The operation failed; reported as `isError` content.
    Domain(DomainError),
}

impl From<McpError> for HandlerError {
    fn from(err: McpError) -> Self {
        HandlerError::Protocol(err)
    }
}

impl From<DomainError> for HandlerError {
    fn from(err: DomainError) -> Self {
        HandlerError::Domain(err)
    }
}

pub type HandlerResult<T> = Result<T, HandlerError>;

/// Behavior behind a registered tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool on validated arguments.
    async fn call(&self, args: Value) -> HandlerResult<Vec<ToolContent>>;
}

/// Static description of a tool.
#[derive(Debug, Clone)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub input: InputSchema,
    /// JSON Schema of `structuredContent`. Defaults to the content mirror.
    pub output: Option<Value>,
}

impl ToolSpec {
    pub fn new(name: &str, description: &str, input: InputSchema) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            input,
            output: None,
        }
    }

    /// Entry advertised by tools/list.
    pub fn definition(&self) -> ToolDefinition {
        ToolDefinition {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            input_schema: self.input.to_json_schema(),
            output_schema: Some(self.output.clone().unwrap_or_else(content_output_schema)),
        }
    }
}

/// A tool ready for registration.
#[derive(Clone)]
pub struct Tool {
    pub spec: ToolSpec,
    pub handler: Arc<dyn ToolHandler>,
}

impl Tool {
    pub fn new(spec: ToolSpec, handler: impl ToolHandler + 'static) -> Self {
        Self {
            spec,
            handler: Arc::new(handler),
        }
    }
}

impl std::fmt::Debug for Tool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tool").field("spec", &self.spec).finish()
    }
}

/// Upstream clients shared by the HTTP-backed tools.
#[derive(Debug, Clone)]
pub struct ToolContext {
    pub geocode: GeocodeClient,
    pub weather: WeatherClient,
    pub image: ImageClient,
    /// Environment variable holding the image API token.
    pub image_token_env: String,
}

impl ToolContext {
    pub fn from_config(config: &ServerConfig) -> McpResult<Self> {
        let http = toolbox::http::build_client(
            &config.user_agent,
            Duration::from_secs(config.http_timeout_secs),
        )
        .map_err(|e| McpError::Config(e.to_string()))?;

        Ok(Self {
            geocode: GeocodeClient::new(http.clone(), &config.geocoding_url),
            weather: WeatherClient::new(http.clone(), &config.weather_url),
            image: ImageClient::new(http, &config.image_url, &config.image_model),
            image_token_env: config.image_token_env.clone(),
        })
    }
}

/// Every built-in tool, in advertisement order.
pub fn builtin_tools(ctx: &ToolContext) -> McpResult<Vec<Tool>> {
    Ok(vec![
        Tool::new(greet::spec(), greet::Greet),
        Tool::new(calculator::spec(), calculator::Calculator),
        Tool::new(time::spec()?, time::CurrentTime),
        Tool::new(geocode::spec(), geocode::Geocode::new(ctx.geocode.clone())),
        Tool::new(
            get_weather::spec(),
            get_weather::GetWeather::new(ctx.weather.clone()),
        ),
        Tool::new(
            generate_image::spec(),
            generate_image::GenerateImage::new(ctx.image.clone(), &ctx.image_token_env),
        ),
    ])
}
