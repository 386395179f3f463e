use super::{catalog_property, Arguments, ToolHandler, TRANSLATE_TEXT};
use crate::catalog::{Gender, Language, NumeralsFormat, OutputScript, TranslationMode};
use crate::error::ToolError;
use crate::provider::{SarvamClient, TranslateParams};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use std::sync::Arc;
use tracing::{debug, error, info};

/// `translate_text`: English or any Indic language to any Indic language or English
pub struct TranslateTextTool {
    client: Arc<SarvamClient>,
}

impl TranslateTextTool {
    pub fn new(client: Arc<SarvamClient>) -> Self {
        Self { client }
    }

    /// Validate arguments in declared order, stopping at the first failure.
    pub fn parse(args: &Map<String, Value>) -> Result<TranslateParams, ToolError> {
        let args = Arguments::new(args);
        args.require(&["text", "target_language"])?;

        Ok(TranslateParams {
            text: args.string("text")?.to_string(),
            target_language: args.catalog::<Language>("target_language")?,
            source_language: args.optional_catalog::<Language>("source_language")?,
            speaker_gender: args.optional_catalog::<Gender>("speaker_gender")?,
            mode: args.optional_catalog::<TranslationMode>("mode")?,
            output_script: args.optional_catalog::<OutputScript>("output_script")?,
            numerals_format: args.optional_catalog::<NumeralsFormat>("numerals_format")?,
            enable_preprocessing: args.optional_bool("enable_preprocessing")?,
        })
    }
}

#[async_trait]
impl ToolHandler for TranslateTextTool {
    fn name(&self) -> &'static str {
        TRANSLATE_TEXT
    }

    fn description(&self) -> &'static str {
        "Translates the given text from English or any Indic language to any Indic language \
         or English."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "text": {
                    "type": "string",
                    "description": "Text to translate"
                },
                "target_language": catalog_property::<Language>("Language to translate into"),
                "source_language": catalog_property::<Language>(
                    "[OPTIONAL] Language of the input text. Omit to detect it automatically"
                ),
                "speaker_gender": catalog_property::<Gender>(
                    "[OPTIONAL] Speaker gender. Defaults to FEMALE"
                ),
                "mode": catalog_property::<TranslationMode>(
                    "[OPTIONAL] Translation register. Defaults to FORMAL"
                ),
                "output_script": catalog_property::<OutputScript>(
                    "[OPTIONAL] Script style of the output. Defaults to FULLY_NATIVE"
                ),
                "numerals_format": catalog_property::<NumeralsFormat>(
                    "[OPTIONAL] Digits used for numbers. Defaults to INTERNATIONAL"
                ),
                "enable_preprocessing": {
                    "type": "boolean",
                    "description":
                        "[OPTIONAL] Let the provider normalize the input first. Defaults to false"
                }
            },
            "required": ["text", "target_language"]
        })
    }

    async fn run(&self, args: &Map<String, Value>) -> Result<String, ToolError> {
        debug!("Translating text for the given args: {:?}", args);

        let params = Self::parse(args).map_err(|e| {
            error!("Invalid arguments for {}: {}", TRANSLATE_TEXT, e);
            e
        })?;

        info!(
            "Translating {} chars to {}",
            params.text.chars().count(),
            params.target_language
        );

        self.client.translate(&params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::{
        matchers::{body_partial_json, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn args(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("test arguments must be an object"),
        }
    }

    fn create_tool(server: &MockServer) -> TranslateTextTool {
        let client = SarvamClient::new(server.uri(), "test-key", Duration::from_secs(5))
            .expect("client should build");
        TranslateTextTool::new(Arc::new(client))
    }

    // ==================== Validation Tests ====================

    #[test]
    fn test_parse_minimal_leaves_options_unset() {
        let params = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "HINDI"
        })))
        .unwrap();

        assert_eq!(params, TranslateParams::new("Hello", Language::Hindi));
    }

    #[test]
    fn test_parse_all_options() {
        let params = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "BENGALI",
            "source_language": "ENGLISH",
            "speaker_gender": "MALE",
            "mode": "COLLOQUIAL_CLASSIC",
            "output_script": "SPOKEN_FORM_IN_NATIVE",
            "numerals_format": "NATIVE",
            "enable_preprocessing": true
        })))
        .unwrap();

        assert_eq!(params.target_language, Language::Bengali);
        assert_eq!(params.source_language, Some(Language::English));
        assert_eq!(params.speaker_gender, Some(Gender::Male));
        assert_eq!(params.mode, Some(TranslationMode::ColloquialClassic));
        assert_eq!(params.output_script, Some(OutputScript::SpokenFormInNative));
        assert_eq!(params.numerals_format, Some(NumeralsFormat::Native));
        assert_eq!(params.enable_preprocessing, Some(true));
    }

    #[test]
    fn test_parse_null_optionals_are_unset() {
        let params = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "HINDI",
            "source_language": null,
            "mode": null
        })))
        .unwrap();

        assert_eq!(params.source_language, None);
        assert_eq!(params.mode, None);
    }

    #[test]
    fn test_parse_missing_text() {
        let err = TranslateTextTool::parse(&args(json!({"target_language": "HINDI"}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument { field: "text" }));
    }

    #[test]
    fn test_parse_missing_target_language() {
        let err = TranslateTextTool::parse(&args(json!({"text": "Hello"}))).unwrap_err();
        assert!(matches!(err, ToolError::MissingArgument { field: "target_language" }));
    }

    #[test]
    fn test_presence_checked_before_enum_validation() {
        // Invalid gender must not be reported while target_language is missing
        let err = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "speaker_gender": "ROBOT"
        })))
        .unwrap_err();

        assert!(matches!(err, ToolError::MissingArgument { field: "target_language" }));
    }

    #[test]
    fn test_invalid_output_script_names_field_and_allowed() {
        let err = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "HINDI",
            "output_script": "fully-native"
        })))
        .unwrap_err();

        match err {
            ToolError::InvalidArgument { field, value, allowed } => {
                assert_eq!(field, "output_script");
                assert_eq!(value, "fully-native");
                assert_eq!(
                    allowed,
                    vec!["NULL", "ROMAN", "FULLY_NATIVE", "SPOKEN_FORM_IN_NATIVE"]
                );
            }
            other => panic!("Expected InvalidArgument, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_numerals_format_names_field_and_allowed() {
        let err = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "HINDI",
            "numerals_format": "ROMAN"
        })))
        .unwrap_err();

        assert_eq!(err.field(), Some("numerals_format"));
        assert!(err
            .to_string()
            .contains("numerals_format='ROMAN'. Allowed any one of these: INTERNATIONAL, NATIVE"));
    }

    #[test]
    fn test_first_invalid_field_is_reported() {
        let err = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "HINDI",
            "source_language": "KLINGON",
            "speaker_gender": "ROBOT",
            "mode": "SHOUTING"
        })))
        .unwrap_err();

        assert_eq!(err.field(), Some("source_language"));
    }

    #[test]
    fn test_gender_reported_before_mode() {
        let err = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "HINDI",
            "mode": "SHOUTING",
            "speaker_gender": "ROBOT"
        })))
        .unwrap_err();

        assert_eq!(err.field(), Some("speaker_gender"));
    }

    #[test]
    fn test_invalid_target_language_message() {
        let err = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "FRENCH"
        })))
        .unwrap_err();

        let message = err.to_string();
        assert!(message.contains("target_language='FRENCH'"));
        assert!(message.contains("ENGLISH, HINDI, BENGALI"));
    }

    #[test]
    fn test_enable_preprocessing_must_be_bool() {
        let err = TranslateTextTool::parse(&args(json!({
            "text": "Hello",
            "target_language": "HINDI",
            "enable_preprocessing": "yes"
        })))
        .unwrap_err();

        assert_eq!(err.field(), Some("enable_preprocessing"));
    }

    // ==================== Schema Tests ====================

    #[test]
    fn test_schema_required_fields() {
        let tool = TranslateTextTool::new(Arc::new(
            SarvamClient::new("http://localhost/", "k", Duration::from_secs(1)).unwrap(),
        ));
        let schema = tool.input_schema();

        assert_eq!(schema["required"], json!(["text", "target_language"]));
        assert_eq!(schema["properties"]["mode"]["enum"].as_array().unwrap().len(), 4);
        assert_eq!(schema["properties"]["target_language"]["enum"][1], "HINDI");
    }

    // ==================== run Tests ====================

    #[tokio::test]
    async fn test_run_returns_translated_text() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/translate"))
            .and(body_partial_json(json!({
                "target_language_code": "hi-IN",
                "speaker_gender": "Male"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "translated_text": "नमस्ते"
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server);
        let result = tool
            .run(&args(json!({
                "text": "Hello",
                "target_language": "HINDI",
                "speaker_gender": "MALE"
            })))
            .await
            .unwrap();

        assert_eq!(result, "नमस्ते");
    }

    #[tokio::test]
    async fn test_run_invalid_args_never_calls_provider() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let tool = create_tool(&mock_server);
        let result = tool.run(&args(json!({"target_language": "HINDI"}))).await;

        assert!(matches!(result, Err(ToolError::MissingArgument { field: "text" })));
    }
}
