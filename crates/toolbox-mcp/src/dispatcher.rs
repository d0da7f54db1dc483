//! The capability dispatcher.
//!
//! Holds the tool, resource and prompt tables. They are filled once through
//! [`DispatcherBuilder`] and never change afterwards, so a built
//! [`Dispatcher`] is shared behind an `Arc` without locking.

use std::time::{Duration, Instant};

use serde_json::{json, Value};

use crate::config::ServerConfig;
use crate::prompts::{builtin_prompts, Prompt, PromptRegistry};
use crate::resources::{Resource, ResourceRegistry, ServerInfo};
use crate::tools::{builtin_tools, Tool, ToolContext, ToolRegistry};
use crate::types::{
    CapabilityKind, Implementation, McpError, McpResult, PromptListResult, ResourceListResult,
    ResourceTemplateListResult, ToolListResult,
};

pub struct Dispatcher {
    info: Implementation,
    started: Instant,
    tools: ToolRegistry,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
}

impl Dispatcher {
    pub fn builder(info: Implementation) -> DispatcherBuilder {
        DispatcherBuilder::new(info)
    }

    /// Register every built-in capability using `config`.
    ///
    /// Tools go in first so the server-info resource can snapshot their
    /// manifest.
    pub fn from_config(config: &ServerConfig) -> McpResult<Self> {
        let ctx = ToolContext::from_config(config)?;
        let mut builder = Self::builder(Implementation::server(&config.server_name))
            .tool_timeout(Duration::from_secs(config.tool_timeout_secs));

        for tool in builtin_tools(&ctx)? {
            builder.register_tool(tool)?;
        }
        builder.register_server_info()?;
        for prompt in builtin_prompts() {
            builder.register_prompt(prompt)?;
        }

        Ok(builder.build())
    }

    pub fn info(&self) -> &Implementation {
        &self.info
    }

    pub fn started(&self) -> Instant {
        self.started
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    pub fn resources(&self) -> &ResourceRegistry {
        &self.resources
    }

    pub fn prompts(&self) -> &PromptRegistry {
        &self.prompts
    }

    /// Invoke the capability `name` of `kind`, returning the wire result.
    ///
    /// For resources `name` is the URI and `args` is ignored.
    pub async fn invoke(
        &self,
        kind: CapabilityKind,
        name: &str,
        args: Option<Value>,
    ) -> McpResult<Value> {
        let result = match kind {
            CapabilityKind::Tool => serde_json::to_value(self.tools.call(name, args).await?)?,
            CapabilityKind::Resource => serde_json::to_value(self.resources.read(name).await?)?,
            CapabilityKind::Prompt => serde_json::to_value(self.prompts.get_prompt(name, args)?)?,
        };
        Ok(result)
    }

    pub fn list_tools(&self) -> ToolListResult {
        ToolListResult {
            tools: self.tools.list_tools(),
        }
    }

    pub fn list_resources(&self) -> ResourceListResult {
        ResourceListResult {
            resources: self.resources.list_resources(),
        }
    }

    pub fn list_resource_templates(&self) -> ResourceTemplateListResult {
        ResourceTemplateListResult::default()
    }

    pub fn list_prompts(&self) -> PromptListResult {
        PromptListResult {
            prompts: self.prompts.list_prompts(),
        }
    }

    /// Server identity and registered capability names.
    pub fn summary(&self) -> Value {
        json!({
            "name": self.info.name,
            "version": self.info.version,
            "tools": self.tools.names(),
            "resources": self.resources.uris(),
            "prompts": self.prompts.names(),
        })
    }
}

/// Collects registrations before the dispatcher is frozen.
pub struct DispatcherBuilder {
    info: Implementation,
    started: Instant,
    tools: ToolRegistry,
    resources: ResourceRegistry,
    prompts: PromptRegistry,
    server_info_registered: bool,
}

impl std::fmt::Debug for DispatcherBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DispatcherBuilder")
            .field("info", &self.info)
            .field("server_info_registered", &self.server_info_registered)
            .finish_non_exhaustive()
    }
}

impl DispatcherBuilder {
    pub fn new(info: Implementation) -> Self {
        Self {
            info,
            started: Instant::now(),
            tools: ToolRegistry::new(),
            resources: ResourceRegistry::new(),
            prompts: PromptRegistry::new(),
            server_info_registered: false,
        }
    }

    pub fn tool_timeout(mut self, timeout: Duration) -> Self {
        self.tools.set_timeout(timeout);
        self
    }

    /// Add a tool.
    ///
    /// Fails once [`register_server_info`](Self::register_server_info) has
    /// run, since its manifest would no longer list every tool.
    pub fn register_tool(&mut self, tool: Tool) -> McpResult<&mut Self> {
        if self.server_info_registered {
            return Err(McpError::InvalidRegistration {
                kind: CapabilityKind::Tool,
                reason: format!(
                    "'{}' registered after server-info; register tools first",
                    tool.spec.name
                ),
            });
        }
        self.tools.register(tool)?;
        Ok(self)
    }

    pub fn register_resource(&mut self, resource: Resource) -> McpResult<&mut Self> {
        self.resources.register(resource)?;
        Ok(self)
    }

    pub fn register_prompt(&mut self, prompt: Prompt) -> McpResult<&mut Self> {
        self.prompts.register(prompt)?;
        Ok(self)
    }

    /// Register `server://info` over the tools registered so far.
    pub fn register_server_info(&mut self) -> McpResult<&mut Self> {
        let info = ServerInfo::new(self.info.clone(), self.started, self.tools.manifest());
        self.register_resource(info.into_resource())?;
        self.server_info_registered = true;
        Ok(self)
    }

    pub fn build(self) -> Dispatcher {
        tracing::info!(
            "Dispatcher ready: {} tools, {} resources, {} prompts",
            self.tools.len(),
            self.resources.len(),
            self.prompts.len()
        );
        Dispatcher {
            info: self.info,
            started: self.started,
            tools: self.tools,
            resources: self.resources,
            prompts: self.prompts,
        }
    }
}
