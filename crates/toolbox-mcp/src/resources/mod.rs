//! MCP resources: URI-addressed, read-only documents.

pub mod registry;
pub mod server_info;

use std::sync::Arc;

use async_trait::async_trait;

use crate::types::{McpResult, ResourceDefinition};

pub use registry::ResourceRegistry;
pub use server_info::{ServerInfo, SERVER_INFO_URI};

/// Produces a resource body. Called on every read; nothing is cached.
#[async_trait]
pub trait ResourceProducer: Send + Sync {
    async fn read(&self) -> McpResult<String>;
}

/// A resource ready for registration.
#[derive(Clone)]
pub struct Resource {
    pub definition: ResourceDefinition,
    pub producer: Arc<dyn ResourceProducer>,
}

impl Resource {
    pub fn new(
        uri: &str,
        name: &str,
        description: &str,
        mime_type: &str,
        producer: impl ResourceProducer + 'static,
    ) -> Self {
        Self {
            definition: ResourceDefinition {
                uri: uri.to_string(),
                name: name.to_string(),
                description: Some(description.to_string()),
                mime_type: Some(mime_type.to_string()),
            },
            producer: Arc::new(producer),
        }
    }

    pub fn uri(&self) -> &str {
        &self.definition.uri
    }
}

impl std::fmt::Debug for Resource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resource")
            .field("definition", &self.definition)
            .finish()
    }
}
