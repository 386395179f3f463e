//! Dispatch entry point: route a named invocation to its handler.

use super::ToolRegistry;
use crate::error::ToolError;
use serde_json::{Map, Value};
use tracing::{error, info};

impl ToolRegistry {
    /// Invoke the tool `name` with loosely typed `args`.
    ///
    /// Absent arguments are treated as an empty object; anything other than
    /// an object is rejected before the tool is even looked up.
    pub async fn invoke(&self, name: &str, args: Option<&Value>) -> Result<String, ToolError> {
        info!("Calling tool '{}'", name);

        let empty = Map::new();
        let args = match args {
            None | Some(Value::Null) => &empty,
            Some(Value::Object(map)) => map,
            Some(other) => {
                error!("Arguments for '{}' must be an object", name);
                return Err(ToolError::InvalidArgumentShape(json_type(other)));
            }
        };

        let handler = self.lookup(name).ok_or_else(|| {
            error!("Unknown tool: {}", name);
            ToolError::UnknownTool(name.to_string())
        })?;

        handler.run(args).await.map_err(|e| {
            error!("Error running tool '{}': {}", name, e);
            e
        })
    }
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
