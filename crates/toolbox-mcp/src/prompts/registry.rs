//! Prompt registration and expansion.

use std::collections::HashMap;

use serde_json::Value;

use super::Prompt;
use crate::types::{CapabilityKind, McpError, McpResult, PromptDefinition, PromptGetResult};

#[derive(Default)]
pub struct PromptRegistry {
    prompts: Vec<Prompt>,
    index: HashMap<String, usize>,
}

impl PromptRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a prompt. Empty and duplicate names are rejected.
    pub fn register(&mut self, prompt: Prompt) -> McpResult<()> {
        let name = prompt.name.clone();
        if name.trim().is_empty() {
            return Err(McpError::InvalidRegistration {
                kind: CapabilityKind::Prompt,
                reason: "name must not be empty".to_string(),
            });
        }
        if self.index.contains_key(&name) {
            return Err(McpError::DuplicateCapability {
                kind: CapabilityKind::Prompt,
                name,
            });
        }

        tracing::debug!("Registered prompt: {name}");
        self.index.insert(name, self.prompts.len());
        self.prompts.push(prompt);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Prompt> {
        self.index.get(name).map(|&i| &self.prompts[i])
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn names(&self) -> Vec<String> {
        self.prompts.iter().map(|p| p.name.clone()).collect()
    }

    pub fn list_prompts(&self) -> Vec<PromptDefinition> {
        self.prompts.iter().map(Prompt::definition).collect()
    }

    /// Validate `args` and expand the named prompt.
    pub fn get_prompt(&self, name: &str, args: Option<Value>) -> McpResult<PromptGetResult> {
        let prompt = self
            .get(name)
            .ok_or_else(|| McpError::unknown(CapabilityKind::Prompt, name))?;
        let args = prompt.arguments.validate(args)?;
        let messages = prompt.generator.generate(Value::Object(args))?;

        Ok(PromptGetResult {
            description: Some(prompt.description.clone()),
            messages,
        })
    }
}
