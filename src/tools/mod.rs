//! MCP tools backed by the Sarvam API.
//!
//! Each tool validates its loosely typed JSON arguments against the provider
//! catalogs, calls [`SarvamClient`](crate::provider::SarvamClient), and
//! returns text. Tools are collected in a [`ToolRegistry`] that is built once
//! at startup and shared read-only afterwards.

mod args;
mod dispatch;
mod identify;
mod registry;
mod translate;
mod transliterate;

pub use args::Arguments;
pub use identify::IdentifyLanguageTool;
pub use registry::ToolRegistry;
pub use translate::TranslateTextTool;
pub use transliterate::TransliterateTextTool;

use crate::catalog::Catalog;
use crate::error::ToolError;
use async_trait::async_trait;
use serde::Serialize;
use serde_json::{json, Map, Value};

pub const TRANSLATE_TEXT: &str = "translate_text";
pub const IDENTIFY_LANGUAGE: &str = "identify_language";
pub const TRANSLITERATE_TEXT: &str = "transliterate_text";

/// A tool that can be invoked by an MCP host
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Tool name (matches `tools/call` name)
    fn name(&self) -> &'static str;

    /// Human-readable description
    fn description(&self) -> &'static str;

    /// JSON Schema for input parameters
    fn input_schema(&self) -> Value;

    /// Validate `args` and execute the tool
    async fn run(&self, args: &Map<String, Value>) -> Result<String, ToolError>;

    fn descriptor(&self) -> ToolDescriptor {
        ToolDescriptor {
            name: self.name().to_string(),
            description: self.description().to_string(),
            input_schema: self.input_schema(),
        }
    }
}

/// Tool advertisement returned by `tools/list`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Schema property for a catalog-typed field, listing the accepted names
fn catalog_property<C: Catalog>(description: &str) -> Value {
    json!({
        "type": "string",
        "enum": C::names(),
        "description": description,
    })
}
