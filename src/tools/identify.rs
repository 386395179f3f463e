use super::{Arguments, ToolHandler, IDENTIFY_LANGUAGE};
use crate::error::ToolError;
use crate::provider::SarvamClient;
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

/// `identify_language`: detect language and script of a text
pub struct IdentifyLanguageTool {
    client: Arc<SarvamClient>,
}

impl IdentifyLanguageTool {
    pub fn new(client: Arc<SarvamClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ToolHandler for IdentifyLanguageTool {
    fn name(&self) -> &'static str {
        IDENTIFY_LANGUAGE
    }

    fn description(&self) -> &'static str {
        "Identifies the language and script of the given text. The detected language will be \
         either English or one of the supported Indic languages."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text for which the language should be identified"
                }
            },
            "required": ["text"]
        })
    }

    async fn run(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
        debug!("Identifying language for the given args: {:?}", args);

        let args = Arguments::new(args);
        let text = args
            .require(&["text"])
            .and_then(|_| args.string("text"))
            .map_err(|e| {
                error!("Invalid arguments for {}: {}", IDENTIFY_LANGUAGE, e);
                e
            })?;

        let identification = self.client.identify_language(text).await?;
        info!(
            "Identified language {} ({})",
            identification.language, identification.script
        );

        serde_json::to_string_pretty(&identification).map_err(|e| ToolError::MalformedResponse {
            detail: format!("failed to encode identification: {}", e),
        })
    }
}
