//! AI endpoints: note summarization, plain-language translation and
//! document analysis.

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use note_capture::SelectedFile;

use crate::auth::AuthContext;
use crate::error::{ApiError, ApiResult};
use crate::server::VerbomedServer;

/// Request body for text endpoints
#[derive(Debug, Deserialize, ToSchema)]
pub struct TextRequest {
    /// The note text to process
    #[serde(default)]
    pub text: String,
}

/// Summarization response
#[derive(Debug, Serialize, ToSchema)]
pub struct ProcessResponse {
    /// Cleaned plain-paragraph summary
    pub summary: String,
}

/// Plain-language translation response
#[derive(Debug, Serialize, ToSchema)]
pub struct TranslateResponse {
    /// The rewritten text
    pub translation: String,
}

/// Document analysis response
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    /// Description of the stored document
    pub explanation: String,
}

fn require_text(text: &str) -> ApiResult<&str> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Text is required"));
    }
    Ok(trimmed)
}

/// Summarize a journal note
#[utoipa::path(
    post,
    path = "/api/v1/ai/process",
    tag = "ai",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Summary generated", body = ProcessResponse),
        (status = 400, description = "Text is missing or empty"),
        (status = 500, description = "Upstream generation failed")
    )
)]
pub async fn process_text(
    State(server): State<VerbomedServer>,
    Json(request): Json<TextRequest>,
) -> ApiResult<Json<ProcessResponse>> {
    let text = require_text(&request.text)?;

    let summary = server
        .ai
        .summarize(text)
        .await
        .map_err(|e| ApiError::upstream("Failed to process text", e))?;

    Ok(Json(ProcessResponse { summary }))
}

/// Rewrite clinical text in plain language
#[utoipa::path(
    post,
    path = "/api/v1/ai/translate",
    tag = "ai",
    request_body = TextRequest,
    responses(
        (status = 200, description = "Translation generated", body = TranslateResponse),
        (status = 400, description = "Text is missing or empty"),
        (status = 500, description = "Upstream generation failed")
    )
)]
pub async fn translate_text(
    State(server): State<VerbomedServer>,
    Json(request): Json<TextRequest>,
) -> ApiResult<Json<TranslateResponse>> {
    let text = require_text(&request.text)?;

    let translation = server
        .ai
        .translate_plain_language(text)
        .await
        .map_err(|e| ApiError::upstream("Failed to translate text", e))?;

    Ok(Json(TranslateResponse { translation }))
}

/// Store an uploaded document and describe it
///
/// The file lands in the caller's folder of the document bucket; the
/// vision model is given a one-hour signed URL to it.
#[utoipa::path(
    post,
    path = "/api/v1/ai/analyze",
    tag = "ai",
    responses(
        (status = 200, description = "Document analyzed", body = AnalyzeResponse),
        (status = 400, description = "No file was provided"),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Storage or analysis failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn analyze_document(
    auth: AuthContext,
    State(server): State<VerbomedServer>,
    mut multipart: Multipart,
) -> ApiResult<Json<AnalyzeResponse>> {
    let mut selected: Option<SelectedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field
            .file_name()
            .unwrap_or("upload")
            .to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::validation(format!("Invalid multipart body: {e}")))?
            .to_vec();

        debug!(filename, size = data.len(), "Received file for analysis");
        selected = Some(SelectedFile {
            filename,
            data,
            content_type,
        });
        break;
    }

    let Some(file) = selected else {
        return Err(ApiError::validation("File is required"));
    };

    let flow = server.capture_flow(auth.user_id);
    flow.select_file(file).await;
    let explanation = flow.analyze().await?;

    Ok(Json(AnalyzeResponse { explanation }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[test]
    fn empty_text_is_rejected() {
        let err = require_text("").unwrap_err();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Text is required");
    }

    #[test]
    fn whitespace_only_text_is_rejected() {
        assert!(require_text("   \n\t ").is_err());
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        assert_eq!(require_text("  note text  ").unwrap(), "note text");
    }

    #[test]
    fn missing_text_field_deserializes_to_empty() {
        let request: TextRequest = serde_json::from_str("{}").unwrap();
        assert!(request.text.is_empty());
    }
}
