//! MCP prompt templates.

pub mod code_review;
pub mod registry;

use std::sync::Arc;

use serde_json::Value;

use crate::schema::InputSchema;
use crate::types::{McpResult, PromptDefinition, PromptMessage};

pub use registry::PromptRegistry;

/// Expands validated arguments into messages.
pub trait PromptGenerator: Send + Sync {
    fn generate(&self, args: Value) -> McpResult<Vec<PromptMessage>>;
}

/// A prompt ready for registration.
#[derive(Clone)]
pub struct Prompt {
    pub name: String,
    pub description: String,
    pub arguments: InputSchema,
    pub generator: Arc<dyn PromptGenerator>,
}

impl Prompt {
    pub fn new(
        name: &str,
        description: &str,
        arguments: InputSchema,
        generator: impl PromptGenerator + 'static,
    ) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            arguments,
            generator: Arc::new(generator),
        }
    }

    pub fn definition(&self) -> PromptDefinition {
        PromptDefinition {
            name: self.name.clone(),
            description: Some(self.description.clone()),
            arguments: Some(self.arguments.prompt_arguments()),
        }
    }
}

impl std::fmt::Debug for Prompt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Prompt")
            .field("name", &self.name)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// Every built-in prompt.
pub fn builtin_prompts() -> Vec<Prompt> {
    vec![code_review::prompt()]
}
