//! Resource registration and reads.

use std::collections::HashMap;

use super::Resource;
use crate::types::{
    CapabilityKind, McpError, McpResult, ReadResourceResult, ResourceContent, ResourceDefinition,
};

/// Resources keyed by URI, kept in registration order.
#[derive(Default)]
pub struct ResourceRegistry {
    resources: Vec<Resource>,
    index: HashMap<String, usize>,
}

impl ResourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a resource. Empty and duplicate URIs are rejected.
    pub fn register(&mut self, resource: Resource) -> McpResult<()> {
        let uri = resource.uri().to_string();
        if uri.trim().is_empty() {
            return Err(McpError::InvalidRegistration {
                kind: CapabilityKind::Resource,
                reason: "uri must not be empty".to_string(),
            });
        }
        if self.index.contains_key(&uri) {
            return Err(McpError::DuplicateCapability {
                kind: CapabilityKind::Resource,
                name: uri,
            });
        }

        tracing::debug!("Registered resource: {uri}");
        self.index.insert(uri, self.resources.len());
        self.resources.push(resource);
        Ok(())
    }

    pub fn get(&self, uri: &str) -> Option<&Resource> {
        self.index.get(uri).map(|&i| &self.resources[i])
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    pub fn uris(&self) -> Vec<String> {
        self.resources.iter().map(|r| r.uri().to_string()).collect()
    }

    pub fn list_resources(&self) -> Vec<ResourceDefinition> {
        self.resources.iter().map(|r| r.definition.clone()).collect()
    }

    /// Produce the current body of `uri`.
    pub async fn read(&self, uri: &str) -> McpResult<ReadResourceResult> {
        let resource = self
            .get(uri)
            .ok_or_else(|| McpError::unknown(CapabilityKind::Resource, uri))?;
        let text = resource.producer.read().await?;

        Ok(ReadResourceResult {
            contents: vec![ResourceContent {
                uri: uri.to_string(),
                mime_type: resource.definition.mime_type.clone(),
                text,
            }],
        })
    }
}
