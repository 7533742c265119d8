use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use crate::cleanup::clean_markdown;
use crate::config::AiConfig;
use crate::error::{AiError, AiResult};

/// System instruction for note summarization.
const SUMMARIZE_INSTRUCTION: &str = "You are a medical assistant that creates clear summaries of medical notes. \
Provide a simple explanation of the summary in everyday language. \
Format the response in clear paragraphs without bullet points or markdown. \
Do not include phrases like \"Here's a simple explanation of the patient's situation:\".";

/// System instruction for plain-language translation of medical terms.
const TRANSLATE_INSTRUCTION: &str = "You are a medical assistant that rewrites clinical text in plain, everyday \
language a patient can understand. Keep the meaning intact, expand medical \
terminology, and answer in plain paragraphs without bullet points or markdown.";

/// Instruction sent alongside an uploaded document or image.
const ANALYZE_INSTRUCTION: &str = "Analyze this medical document/image in detail. Please follow these guidelines:
- Identify and describe any medical terminology, diagnoses, or findings present
- Note any measurements, test results, or numerical values
- Describe any visible symptoms, conditions, or anatomical features
- Point out any dates, patient information (if visible), or medical provider details
- Highlight any recommendations, treatments, or follow-up instructions
- If it's an image (like an X-ray, MRI, etc.), describe the anatomical structures and any abnormalities
Please provide this information in clear, detailed medical terms.";

/// Chat-completion request body
#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: MessageContent,
}

/// Message content: plain text or multimodal parts
#[derive(Debug, Serialize)]
#[serde(untagged)]
enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Client for the hosted chat-completion API
pub struct AiGatewayClient {
    http: reqwest::Client,
    config: AiConfig,
}

impl AiGatewayClient {
    /// Create a new gateway client from configuration
    ///
    /// # Errors
    /// Returns [`AiError::Network`] if the HTTP client cannot be built.
    pub fn new(config: AiConfig) -> AiResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { http, config })
    }

    /// Summarize a free-text medical note into a brief plain-paragraph
    /// clinical summary.
    ///
    /// # Errors
    /// Returns [`AiError::Generation`] on an upstream error response and
    /// [`AiError::EmptyCompletion`] when the model returns no content.
    /// Callers choose their own fallback text; no placeholder is
    /// substituted here.
    pub async fn summarize(&self, text: &str) -> AiResult<String> {
        debug!(chars = text.len(), "Requesting note summary");

        let request = ChatRequest {
            model: self.config.text_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(SUMMARIZE_INSTRUCTION.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(text.to_string()),
                },
            ],
            temperature: 0.4,
            max_tokens: 100,
        };

        let completion = self.chat_completion(&request).await?;
        Ok(clean_markdown(&completion))
    }

    /// Rewrite clinical text in plain, patient-friendly language.
    ///
    /// # Errors
    /// Same failure modes as [`AiGatewayClient::summarize`].
    pub async fn translate_plain_language(&self, text: &str) -> AiResult<String> {
        debug!(chars = text.len(), "Requesting plain-language translation");

        let request = ChatRequest {
            model: self.config.text_model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MessageContent::Text(TRANSLATE_INSTRUCTION.to_string()),
                },
                ChatMessage {
                    role: "user",
                    content: MessageContent::Text(text.to_string()),
                },
            ],
            temperature: 0.4,
            max_tokens: 300,
        };

        let completion = self.chat_completion(&request).await?;
        Ok(clean_markdown(&completion))
    }

    /// Describe an uploaded medical document or image, referenced by its
    /// short-lived signed URL.
    ///
    /// # Errors
    /// Same failure modes as [`AiGatewayClient::summarize`].
    pub async fn analyze_image(&self, signed_url: &str) -> AiResult<String> {
        debug!("Requesting document analysis");

        let request = ChatRequest {
            model: self.config.vision_model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: MessageContent::Parts(vec![
                    ContentPart::Text {
                        text: ANALYZE_INSTRUCTION.to_string(),
                    },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: signed_url.to_string(),
                        },
                    },
                ]),
            }],
            temperature: 0.2,
            max_tokens: 200,
        };

        let completion = self.chat_completion(&request).await?;
        Ok(clean_markdown(&completion))
    }

    /// Send a chat-completion request and extract the first choice's text.
    async fn chat_completion(&self, request: &ChatRequest) -> AiResult<String> {
        let url = format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .bearer_auth(self.config.api_key.expose_secret())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, "Chat completion request failed");
            return Err(AiError::Generation(format!(
                "upstream returned {status}: {body}"
            )));
        }

        let completion: ChatResponse = response.json().await?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .filter(|content| !content.is_empty())
            .ok_or(AiError::EmptyCompletion)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn multimodal_content_serializes_as_typed_parts() {
        let content = MessageContent::Parts(vec![
            ContentPart::Text {
                text: "describe this".to_string(),
            },
            ContentPart::ImageUrl {
                image_url: ImageUrl {
                    url: "https://example.test/signed".to_string(),
                },
            },
        ]);

        let json = serde_json::to_value(&content).unwrap();
        assert_eq!(json[0]["type"], "text");
        assert_eq!(json[0]["text"], "describe this");
        assert_eq!(json[1]["type"], "image_url");
        assert_eq!(json[1]["image_url"]["url"], "https://example.test/signed");
    }

    #[test]
    fn text_content_serializes_as_plain_string() {
        let message = ChatMessage {
            role: "user",
            content: MessageContent::Text("patient note".to_string()),
        };

        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "patient note");
    }

    #[test]
    fn empty_choices_yield_empty_completion_error() {
        let response: ChatResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content);
        assert!(content.is_none());
    }
}
