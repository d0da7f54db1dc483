//! A single declared argument.

use fancy_regex::Regex;
use serde_json::{json, Map, Value};

use crate::types::{McpError, McpResult};

/// JSON type tag of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Number,
    Integer,
}

impl FieldType {
    fn json_name(self) -> &'static str {
        match self {
            FieldType::String => "string",
            FieldType::Number => "number",
            FieldType::Integer => "integer",
        }
    }
}

/// Extra rule a value must satisfy beyond its type.
#[derive(Debug, Clone)]
pub enum Constraint {
    /// Inclusive numeric bounds.
    Range { min: Option<f64>, max: Option<f64> },
    /// String must equal one of the listed values.
    OneOf(Vec<String>),
    /// String must match the regular expression.
    Pattern { source: String, regex: Regex },
}

/// Declaration of one named argument.
#[derive(Debug, Clone)]
pub struct FieldSchema {
    pub name: String,
    pub field_type: FieldType,
    pub description: Option<String>,
    pub required: bool,
    pub default: Option<Value>,
    pub constraints: Vec<Constraint>,
}

impl FieldSchema {
    fn new(name: &str, field_type: FieldType) -> Self {
        Self {
            name: name.to_string(),
            field_type,
            description: None,
            required: true,
            default: None,
            constraints: Vec::new(),
        }
    }

    /// Required string field.
    pub fn string(name: &str) -> Self {
        Self::new(name, FieldType::String)
    }

    /// Required number field.
    pub fn number(name: &str) -> Self {
        Self::new(name, FieldType::Number)
    }

    /// Required integer field.
    pub fn integer(name: &str) -> Self {
        Self::new(name, FieldType::Integer)
    }

    pub fn describe(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Field may be omitted.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Value used when the field is omitted. Implies optional.
    pub fn default_value(mut self, value: Value) -> Self {
        self.required = false;
        self.default = Some(value);
        self
    }

    /// Inclusive numeric bounds.
    pub fn range(mut self, min: f64, max: f64) -> Self {
        self.constraints.push(Constraint::Range {
            min: Some(min),
            max: Some(max),
        });
        self
    }

    /// Restrict a string to the listed values.
    pub fn one_of<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.constraints
            .push(Constraint::OneOf(values.into_iter().map(Into::into).collect()));
        self
    }

    /// Require a string to match `pattern`.
    pub fn pattern(mut self, pattern: &str) -> McpResult<Self> {
        let regex = Regex::new(pattern).map_err(|e| {
            McpError::InternalError(format!("invalid pattern for '{}': {e}", self.name))
        })?;
        self.constraints.push(Constraint::Pattern {
            source: pattern.to_string(),
            regex,
        });
        Ok(self)
    }

    /// JSON Schema fragment describing this field.
    pub fn to_json_schema(&self) -> Value {
        let mut schema = Map::new();
        schema.insert("type".into(), json!(self.field_type.json_name()));
        if let Some(description) = &self.description {
            schema.insert("description".into(), json!(description));
        }
        if let Some(default) = &self.default {
            schema.insert("default".into(), default.clone());
        }
        for constraint in &self.constraints {
            match constraint {
                Constraint::Range { min, max } => {
                    if let Some(min) = min {
                        schema.insert("minimum".into(), json!(min));
                    }
                    if let Some(max) = max {
                        schema.insert("maximum".into(), json!(max));
                    }
                }
                Constraint::OneOf(values) => {
                    schema.insert("enum".into(), json!(values));
                }
                Constraint::Pattern { source, .. } => {
                    schema.insert("pattern".into(), json!(source));
                }
            }
        }
        Value::Object(schema)
    }

    /// Check `value` against type and constraints, returning the normalized value.
    pub fn check(&self, value: &Value) -> McpResult<Value> {
        let normalized = self.check_type(value)?;
        for constraint in &self.constraints {
            self.check_constraint(constraint, &normalized)?;
        }
        Ok(normalized)
    }

    fn invalid(&self, reason: String) -> McpError {
        McpError::invalid_argument(&self.name, reason)
    }

    fn check_type(&self, value: &Value) -> McpResult<Value> {
        let mismatch = || {
            self.invalid(format!(
                "expected {}, got {}",
                self.field_type.json_name(),
                json_type_name(value)
            ))
        };

        match self.field_type {
            FieldType::String if value.is_string() => Ok(value.clone()),
            FieldType::Number => match value.as_f64() {
                Some(n) if n.is_finite() => Ok(value.clone()),
                _ => Err(mismatch()),
            },
            FieldType::Integer => {
                if let Some(n) = value.as_i64() {
                    return Ok(json!(n));
                }
                // Integral floats such as `7.0` are accepted and normalized.
                match value.as_f64() {
                    Some(n) if n.fract() == 0.0 && n.abs() < i64::MAX as f64 => {
                        Ok(json!(n as i64))
                    }
                    _ => Err(mismatch()),
                }
            }
            _ => Err(mismatch()),
        }
    }

    fn check_constraint(&self, constraint: &Constraint, value: &Value) -> McpResult<()> {
        match constraint {
            Constraint::Range { min, max } => {
                let Some(n) = value.as_f64() else {
                    return Ok(());
                };
                let below = min.is_some_and(|min| n < min);
                let above = max.is_some_and(|max| n > max);
                if below || above {
                    return Err(self.invalid(format!(
                        "{n} is out of range [{}, {}]",
                        min.map_or("-inf".to_string(), |m| m.to_string()),
                        max.map_or("inf".to_string(), |m| m.to_string()),
                    )));
                }
            }
            Constraint::OneOf(allowed) => {
                let Some(s) = value.as_str() else {
                    return Ok(());
                };
                if !allowed.iter().any(|a| a == s) {
                    return Err(self.invalid(format!(
                        "'{s}' is not one of: {}",
                        allowed.join(", ")
                    )));
                }
            }
            Constraint::Pattern { source, regex } => {
                let Some(s) = value.as_str() else {
                    return Ok(());
                };
                let matched = regex
                    .is_match(s)
                    .map_err(|e| self.invalid(format!("pattern evaluation failed: {e}")))?;
                if !matched {
                    return Err(self.invalid(format!("'{s}' does not match pattern {source}")));
                }
            }
        }
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_i64() || n.is_u64() => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
