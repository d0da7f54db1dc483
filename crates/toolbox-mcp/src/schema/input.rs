//! Whole-object argument validation.

use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

use super::field::FieldSchema;
use crate::types::{McpError, McpResult, PromptArgument};

/// Ordered set of declared fields.
#[derive(Debug, Clone, Default)]
pub struct InputSchema {
    fields: Vec<FieldSchema>,
}

impl InputSchema {
    pub fn new(fields: Vec<FieldSchema>) -> Self {
        Self { fields }
    }

    /// Schema with no arguments.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn fields(&self) -> &[FieldSchema] {
        &self.fields
    }

    /// JSON Schema (`type: object`) advertised to clients.
    pub fn to_json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.to_json_schema()))
            .collect();
        let required: Vec<&str> = self
            .fields
            .iter()
            .filter(|f| f.required)
            .map(|f| f.name.as_str())
            .collect();

        let mut schema = json!({
            "type": "object",
            "properties": properties,
        });
        if !required.is_empty() {
            schema["required"] = json!(required);
        }
        schema
    }

    /// Argument list in the shape prompts/list expects.
    pub fn prompt_arguments(&self) -> Vec<PromptArgument> {
        self.fields
            .iter()
            .map(|f| PromptArgument {
                name: f.name.clone(),
                description: f.description.clone(),
                required: f.required,
            })
            .collect()
    }

    /// Validate raw wire arguments.
    ///
    /// Returns an object holding exactly the declared fields: supplied values
    /// normalized, omitted optional fields filled from their defaults.
    /// Undeclared keys are dropped. An explicit `null` counts as omitted.
    pub fn validate(&self, raw: Option<Value>) -> McpResult<Map<String, Value>> {
        let supplied = match raw {
            None | Some(Value::Null) => Map::new(),
            Some(Value::Object(map)) => map,
            Some(other) => {
                return Err(McpError::InvalidParams(format!(
                    "arguments must be an object, got {other}"
                )))
            }
        };

        let mut validated = Map::new();
        for field in &self.fields {
            match supplied.get(&field.name).filter(|v| !v.is_null()) {
                Some(value) => {
                    validated.insert(field.name.clone(), field.check(value)?);
                }
                None => {
                    if let Some(default) = &field.default {
                        validated.insert(field.name.clone(), default.clone());
                    } else if field.required {
                        return Err(McpError::invalid_argument(&field.name, "is required"));
                    }
                }
            }
        }

        Ok(validated)
    }
}

/// Deserialize validated arguments into a handler's parameter struct.
pub fn parse_arguments<T: DeserializeOwned>(args: Value) -> McpResult<T> {
    serde_json::from_value(args).map_err(|e| McpError::InvalidParams(e.to_string()))
}
