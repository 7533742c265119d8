//! Speech synthesis endpoint
//!
//! Synthesis is only mounted as a capability: when the host carries no
//! speech credentials the endpoint answers 503 instead of failing at
//! startup.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use speech_bridge::SpeechProvider;
use utoipa::ToSchema;

use crate::error::{ApiError, ApiResult};
use crate::server::VerbomedServer;

/// Request body for synthesis
#[derive(Debug, Deserialize, ToSchema)]
pub struct SynthesizeRequest {
    /// Text to render as speech
    #[serde(default)]
    pub text: String,
}

/// Synthesize text to MP3 audio
#[utoipa::path(
    post,
    path = "/api/v1/speech/synthesize",
    tag = "speech",
    request_body = SynthesizeRequest,
    responses(
        (status = 200, description = "Audio synthesized", content_type = "audio/mpeg"),
        (status = 400, description = "Text is missing or empty"),
        (status = 503, description = "Speech synthesis is not configured"),
        (status = 500, description = "Synthesis failed upstream")
    )
)]
pub async fn synthesize(
    State(server): State<VerbomedServer>,
    Json(request): Json<SynthesizeRequest>,
) -> ApiResult<impl IntoResponse> {
    let text = request.text.trim();
    if text.is_empty() {
        return Err(ApiError::validation("Text is required"));
    }

    let Some(provider) = &server.speech else {
        return Err(ApiError::service_unavailable(
            "Speech synthesis is not configured",
        ));
    };

    let audio = provider
        .synthesize(text)
        .await
        .map_err(|e| ApiError::upstream("Failed to synthesize speech", e))?;

    Ok((
        StatusCode::OK,
        [(header::CONTENT_TYPE, "audio/mpeg")],
        audio,
    ))
}
