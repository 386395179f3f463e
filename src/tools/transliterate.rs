use super::{catalog_property, Arguments, ToolHandler, TRANSLITERATE_TEXT};
use crate::catalog::{Language, NumeralsFormat, SpokenFormNumeralsLanguage};
use crate::error::ToolError;
use crate::provider::{SarvamClient, TransliterateParams};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

/// `transliterate_text`: change script while preserving pronunciation
pub struct TransliterateTextTool {
    client: Arc<SarvamClient>,
}

impl TransliterateTextTool {
    pub fn new(client: Arc<SarvamClient>) -> Self {
        Self { client }
    }

    /// Validate arguments in declared order, stopping at the first failure.
    pub fn parse(args: &Map<String, Value>) -> Result<TransliterateParams, ToolError> {
        let args = Arguments::new(args);
        args.require(&["text", "target_language", "source_language"])?;

        Ok(TransliterateParams {
            text: args.string("text")?.to_string(),
            target_language: args.catalog::<Language>("target_language")?,
            source_language: args.catalog::<Language>("source_language")?,
            numerals_format: args.optional_catalog::<NumeralsFormat>("numerals_format")?,
            spoken_form: args.optional_bool("spoken_form")?,
            spoken_form_numerals_language: args
                .optional_catalog::<SpokenFormNumeralsLanguage>("spoken_form_numerals_language")?,
        })
    }
}

#[async_trait]
impl ToolHandler for TransliterateTextTool {
    fn name(&self) -> &'static str {
        TRANSLITERATE_TEXT
    }

    fn description(&self) -> &'static str {
        "Transliterates the given text from English or any Indic language to any Indic language \
         or English while preserving its pronunciation."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text to transliterate"
                },
                "target_language": catalog_property::<Language>(
                    "Language whose script the output uses"
                ),
                "source_language": catalog_property::<Language>("Language of the input text"),
                "numerals_format": catalog_property::<NumeralsFormat>(
                    "[OPTIONAL] Digits used for numbers. Defaults to INTERNATIONAL"
                ),
                "spoken_form": {
                    "type": "boolean",
                    "description":
                        "[OPTIONAL] Convert the text into its spoken form. Defaults to false"
                },
                "spoken_form_numerals_language": catalog_property::<SpokenFormNumeralsLanguage>(
                    "[OPTIONAL] Language numbers are spoken in when spoken_form is set. \
                     Defaults to NATIVE"
                )
            },
            "required": ["text", "target_language", "source_language"]
        })
    }

    async fn run(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
        debug!("Transliterating text for the given args: {:?}", args);

        let params = Self::parse(args).map_err(|e| {
            error!("Invalid arguments for {}: {}", TRANSLITERATE_TEXT, e);
            e
        })?;

        info!(
            "Transliterating {} chars from {} to {}",
            params.text.chars().count(),
            params.source_language,
            params.target_language
        );

        self.client.transliterate(&params).await
    }
}
