use thiserror::Error;
use url::Url;

pub const DEFAULT_ADVICE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_ADVICE_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_SYSTEM_INSTRUCTION: &str = "You are an expert JAMB (Joint Admissions and \
Matriculation Board) consultant for Nigerian students. You provide detailed steps, deadline \
warnings, and clarify requirements for NIN, profile codes, and CBT centers. Provide a helpful, \
encouraging, and accurate answer regarding JAMB 2026 registration procedures in Nigeria. Do not \
mention specific prices as they vary. Always emphasize using the correct NIN and active mobile \
numbers. Keep the tone professional and supportive.";

/// Validated settings for the advice service.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdviceSettings {
    api_key: Option<String>,
    model: String,
    base_url: String,
    system_instruction: String,
}

#[derive(Clone, Debug, Default)]
pub struct AdviceSettingsDraft {
    pub api_key: Option<String>,
    pub model: Option<String>,
    pub base_url: Option<String>,
    pub system_instruction: Option<String>,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum AdviceSettingsError {
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

impl AdviceSettingsDraft {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate and normalize the draft, filling in defaults for missing values.
    ///
    /// # Errors
    ///
    /// Returns `AdviceSettingsError` if the base URL is present but not an http(s) URL.
    pub fn validate(self) -> Result<AdviceSettings, AdviceSettingsError> {
        let api_key = normalize_optional(self.api_key);
        let model = normalize_optional(self.model).unwrap_or_else(|| DEFAULT_ADVICE_MODEL.into());
        let base_url = normalize_optional(self.base_url)
            .unwrap_or_else(|| DEFAULT_ADVICE_BASE_URL.into());
        let system_instruction = normalize_optional(self.system_instruction)
            .unwrap_or_else(|| DEFAULT_SYSTEM_INSTRUCTION.into());

        match Url::parse(&base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            _ => return Err(AdviceSettingsError::InvalidBaseUrl(base_url)),
        }

        Ok(AdviceSettings {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
            system_instruction,
        })
    }
}

impl AdviceSettings {
    /// True when an API key is configured.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    #[must_use]
    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    #[must_use]
    pub fn model(&self) -> &str {
        &self.model
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[must_use]
    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }
}

impl Default for AdviceSettings {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_ADVICE_MODEL.into(),
            base_url: DEFAULT_ADVICE_BASE_URL.into(),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.into(),
        }
    }
}

fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|val| val.trim().to_string())
        .filter(|val| !val.is_empty())
}
