//! HTTP client for the Sarvam text APIs.
//!
//! One POST per operation. Each call resolves omitted options to their
//! designed defaults before the request is built, so the body always carries
//! every field the provider documents.

use crate::catalog::{
    self, Catalog, Gender, Language, NumeralsFormat, OutputScript, Script,
    SpokenFormNumeralsLanguage, Task, TranslationMode, AUTO_SOURCE_LANGUAGE,
};
use crate::config::Config;
use crate::error::ToolError;
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, info};

/// Header carrying the process-wide credential
pub const API_KEY_HEADER: &str = "api-subscription-key";

/// Translation model pinned for every translate call
pub const TRANSLATION_MODEL: &str = "mayura:v1";

/// Arguments for a translate call. `None` means "use the default".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslateParams {
    pub text: String,
    pub target_language: Language,
    /// `None` lets the provider autodetect the source
    pub source_language: Option<Language>,
    pub speaker_gender: Option<Gender>,
    pub mode: Option<TranslationMode>,
    pub output_script: Option<OutputScript>,
    pub numerals_format: Option<NumeralsFormat>,
    pub enable_preprocessing: Option<bool>,
}

impl TranslateParams {
    pub fn new(text: impl Into<String>, target_language: Language) -> Self {
        Self {
            text: text.into(),
            target_language,
            source_language: None,
            speaker_gender: None,
            mode: None,
            output_script: None,
            numerals_format: None,
            enable_preprocessing: None,
        }
    }
}

/// Arguments for a transliterate call. `None` means "use the default".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransliterateParams {
    pub text: String,
    pub target_language: Language,
    pub source_language: Language,
    pub numerals_format: Option<NumeralsFormat>,
    pub spoken_form: Option<bool>,
    pub spoken_form_numerals_language: Option<SpokenFormNumeralsLanguage>,
}

impl TransliterateParams {
    pub fn new(
        text: impl Into<String>,
        target_language: Language,
        source_language: Language,
    ) -> Self {
        Self {
            text: text.into(),
            target_language,
            source_language,
            numerals_format: None,
            spoken_form: None,
            spoken_form_numerals_language: None,
        }
    }
}

/// Result of language identification, as human-readable catalog names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageIdentification {
    #[serde(rename = "Language")]
    pub language: String,
    #[serde(rename = "Script")]
    pub script: String,
}

impl LanguageIdentification {
    /// Reverse-map provider codes; anything unrecognized becomes `UNKNOWN`.
    pub fn from_codes(language_code: Option<&str>, script_code: Option<&str>) -> Self {
        Self {
            language: catalog::name_for_code::<Language>(language_code).to_string(),
            script: catalog::name_for_code::<Script>(script_code).to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
struct TranslateBody<'a> {
    input: &'a str,
    source_language_code: &'static str,
    target_language_code: &'static str,
    speaker_gender: &'static str,
    mode: &'static str,
    model: &'static str,
    enable_preprocessing: bool,
    output_script: &'static str,
    numerals_format: &'static str,
}

impl<'a> TranslateBody<'a> {
    fn from_params(params: &'a TranslateParams) -> Self {
        Self {
            input: &params.text,
            source_language_code: params
                .source_language
                .map(Language::code)
                .unwrap_or(AUTO_SOURCE_LANGUAGE),
            target_language_code: params.target_language.code(),
            speaker_gender: params.speaker_gender.unwrap_or_default().code(),
            mode: params.mode.unwrap_or_default().code(),
            model: TRANSLATION_MODEL,
            enable_preprocessing: params.enable_preprocessing.unwrap_or(false),
            output_script: params.output_script.unwrap_or_default().code(),
            numerals_format: params.numerals_format.unwrap_or_default().code(),
        }
    }
}

#[derive(Debug, Serialize)]
struct IdentifyBody<'a> {
    input: &'a str,
}

#[derive(Debug, Serialize)]
struct TransliterateBody<'a> {
    input: &'a str,
    source_language_code: &'static str,
    target_language_code: &'static str,
    numerals_format: &'static str,
    spoken_form: bool,
    spoken_form_numerals_language: &'static str,
}

impl<'a> TransliterateBody<'a> {
    fn from_params(params: &'a TransliterateParams) -> Self {
        Self {
            input: &params.text,
            source_language_code: params.source_language.code(),
            target_language_code: params.target_language.code(),
            numerals_format: params.numerals_format.unwrap_or_default().code(),
            spoken_form: params.spoken_form.unwrap_or(false),
            spoken_form_numerals_language: params
                .spoken_form_numerals_language
                .unwrap_or_default()
                .code(),
        }
    }
}

/// Client for the Sarvam API. Cheap to share behind an `Arc`.
#[derive(Debug, Clone)]
pub struct SarvamClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl SarvamClient {
    /// Task paths are appended to `base_url`; a missing trailing `/` is added.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        let mut base_url: String = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }

        Ok(Self {
            http,
            base_url,
            api_key: api_key.into(),
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        Self::new(
            config.sarvam_api_url.clone(),
            config.sarvam_api_key.clone(),
            config.request_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, task: Task) -> String {
        format!("{}{}", self.base_url, task.path())
    }

    /// Translate `params.text` into the target language.
    pub async fn translate(&self, params: &TranslateParams) -> Result<String, ToolError> {
        let body = TranslateBody::from_params(params);
        let mut response = self.post(Task::Translate, &body).await?;
        take_string(&mut response, "translated_text")
    }

    /// Detect the language and script of `text`.
    pub async fn identify_language(&self, text: &str) -> Result<LanguageIdentification, ToolError> {
        let response = self
            .post(Task::LanguageIdentification, &IdentifyBody { input: text })
            .await?;

        let language_code = code_field(&response, "language_code")?;
        let script_code = code_field(&response, "script_code")?;

        Ok(LanguageIdentification::from_codes(language_code, script_code))
    }

    /// Transliterate `params.text` while preserving pronunciation.
    pub async fn transliterate(&self, params: &TransliterateParams) -> Result<String, ToolError> {
        let body = TransliterateBody::from_params(params);
        let mut response = self.post(Task::Transliterate, &body).await?;
        take_string(&mut response, "transliterated_text")
    }

    async fn post<B: Serialize>(&self, task: Task, body: &B) -> Result<Value, ToolError> {
        let endpoint = self.endpoint(task);
        info!("Calling Sarvam API: {}", task.path());

        let response = self
            .http
            .post(&endpoint)
            .header(CONTENT_TYPE, "application/json")
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if status != StatusCode::OK {
            error!("Sarvam API call to {} failed ({}): {}", task.path(), status, text);
            return Err(ToolError::Provider {
                status: status.as_u16(),
                body: text,
            });
        }

        debug!("Sarvam API response from {}: {}", task.path(), text);

        serde_json::from_str(&text).map_err(|e| ToolError::MalformedResponse {
            detail: format!("response from '{}' is not valid JSON: {}", task.path(), e),
        })
    }
}

/// Extract a required string field from a success response
fn take_string(response: &mut Value, field: &'static str) -> Result<String, ToolError> {
    match response.get_mut(field).map(Value::take) {
        Some(Value::String(text)) => Ok(text),
        Some(_) => Err(ToolError::MalformedResponse {
            detail: format!("field '{}' is not a string", field),
        }),
        None => Err(ToolError::MalformedResponse {
            detail: format!("missing field '{}'", field),
        }),
    }
}

/// A code field must be present; `null` is tolerated and reads as unknown.
fn code_field<'a>(response: &'a Value, field: &'static str) -> Result<Option<&'a str>, ToolError> {
    match response.get(field) {
        Some(Value::String(code)) => Ok(Some(code.as_str())),
        Some(Value::Null) => Ok(None),
        Some(_) => Err(ToolError::MalformedResponse {
            detail: format!("field '{}' is not a string", field),
        }),
        None => Err(ToolError::MalformedResponse {
            detail: format!("missing field '{}'", field),
        }),
    }
}
