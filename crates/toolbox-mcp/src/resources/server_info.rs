//! Resource: server://info — Server metadata and tool manifest.

use std::time::Instant;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::{json, Value};

use super::{Resource, ResourceProducer};
use crate::types::{Implementation, McpResult};

pub const SERVER_INFO_URI: &str = "server://info";

/// Live server metadata. Uptime and timestamp are taken at read time.
#[derive(Debug, Clone)]
pub struct ServerInfo {
    implementation: Implementation,
    started: Instant,
    tools: Vec<Value>,
}

impl ServerInfo {
    /// `tools` is the manifest of every registered tool.
    pub fn new(implementation: Implementation, started: Instant, tools: Vec<Value>) -> Self {
        Self {
            implementation,
            started,
            tools,
        }
    }

    pub fn snapshot(&self) -> Value {
        json!({
            "name": self.implementation.name,
            "version": self.implementation.version,
            "uptime": self.started.elapsed().as_secs_f64(),
            "timestamp": Utc::now().to_rfc3339(),
            "tools": self.tools,
        })
    }

    pub fn into_resource(self) -> Resource {
        Resource::new(
            SERVER_INFO_URI,
            "server-info",
            "서버 이름, 버전, 가동 시간과 등록된 도구 목록",
            "application/json",
            self,
        )
    }
}

#[async_trait]
impl ResourceProducer for ServerInfo {
    async fn read(&self) -> McpResult<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }
}
