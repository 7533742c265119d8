use secrecy::SecretString;
use serde::Deserialize;

use crate::error::{AiError, AiResult};

/// Default text model for note summarization and translation.
const DEFAULT_TEXT_MODEL: &str = "meta-llama/Meta-Llama-3.1-8B-Instruct-Turbo";

/// Default vision model for document/image analysis.
const DEFAULT_VISION_MODEL: &str = "meta-llama/Llama-3.2-90B-Vision-Instruct-Turbo";

/// AI gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Base URL of the chat-completion API
    pub base_url: String,
    /// API key for the inference provider
    #[serde(skip, default = "empty_secret")]
    pub api_key: SecretString,
    /// Model used for summarization and plain-language translation
    pub text_model: String,
    /// Vision-capable model used for document analysis
    pub vision_model: String,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

fn empty_secret() -> SecretString {
    SecretString::new(String::new())
}

impl AiConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> AiResult<Self> {
        let api_key = std::env::var("AI_API_KEY")
            .map_err(|_| AiError::Config("AI_API_KEY is not set".to_string()))?;

        let base_url = std::env::var("AI_BASE_URL")
            .unwrap_or_else(|_| "https://api.together.xyz/v1".to_string());

        let text_model = std::env::var("AI_TEXT_MODEL")
            .unwrap_or_else(|_| DEFAULT_TEXT_MODEL.to_string());

        let vision_model = std::env::var("AI_VISION_MODEL")
            .unwrap_or_else(|_| DEFAULT_VISION_MODEL.to_string());

        let request_timeout_secs = std::env::var("AI_REQUEST_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(30);

        Ok(Self {
            base_url,
            api_key: SecretString::new(api_key),
            text_model,
            vision_model,
            request_timeout_secs,
        })
    }
}
