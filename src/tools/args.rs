//! Argument access and validation shared by the tool handlers.
//!
//! Every accessor fails fast with a [`ToolError`] naming the field. A JSON
//! `null` is treated the same as an absent key.

use crate::catalog::Catalog;
use crate::error::ToolError;
use serde_json::{Map, Value};

/// Borrowed view over a `tools/call` argument object
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    map: &'a Map<String, Value>,
}

impl<'a> Arguments<'a> {
    pub fn new(map: &'a Map<String, Value>) -> Self {
        Self { map }
    }

    fn get(&self, field: &str) -> Option<&'a Value> {
        self.map.get(field).filter(|value| !value.is_null())
    }

    /// Check that every field in `fields` is present, reporting the first missing one.
    pub fn require(&self, fields: &[&'static str]) -> Result<(), ToolError> {
        match fields.iter().find(|field| self.get(field).is_none()) {
            Some(field) => Err(ToolError::MissingArgument { field: *field }),
            None => Ok(()),
        }
    }

    /// A required string argument
    pub fn string(&self, field: &'static str) -> Result<&'a str, ToolError> {
        match self.get(field) {
            Some(Value::String(text)) => Ok(text.as_str()),
            Some(_) => Err(ToolError::InvalidType {
                field,
                expected: "string",
            }),
            None => Err(ToolError::MissingArgument { field }),
        }
    }

    /// A required catalog name
    pub fn catalog<C: Catalog>(&self, field: &'static str) -> Result<C, ToolError> {
        self.optional_catalog(field)?
            .ok_or(ToolError::MissingArgument { field })
    }

    /// An optional catalog name; `None` when absent
    pub fn optional_catalog<C: Catalog>(
        &self,
        field: &'static str,
    ) -> Result<Option<C>, ToolError> {
        let Some(value) = self.get(field) else {
            return Ok(None);
        };

        value
            .as_str()
            .and_then(C::from_name)
            .map(Some)
            .ok_or_else(|| ToolError::InvalidArgument {
                field,
                value: display_value(value),
                allowed: C::names(),
            })
    }

    /// An optional JSON boolean; strings like "true" are rejected
    pub fn optional_bool(&self, field: &'static str) -> Result<Option<bool>, ToolError> {
        match self.get(field) {
            None => Ok(None),
            Some(Value::Bool(flag)) => Ok(Some(*flag)),
            Some(other) => Err(ToolError::InvalidArgument {
                field,
                value: display_value(other),
                allowed: vec!["true", "false"],
            }),
        }
    }
}

/// Strings are shown bare, everything else as JSON text
fn display_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
