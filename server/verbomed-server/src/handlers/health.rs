use axum::{extract::State, Json};
use serde::Serialize;
use std::collections::HashMap;
use utoipa::ToSchema;

use crate::error::ApiResult;
use crate::server::VerbomedServer;

/// Health check response
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Overall system health status
    #[schema(example = "healthy")]
    pub status: String,
    /// Current timestamp in RFC3339 format
    #[schema(example = "2026-01-15T10:30:00Z")]
    pub timestamp: String,
    /// API version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Individual collaborator health checks
    pub checks: HashMap<String, String>,
}

/// Version information response
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Application name
    #[schema(example = "Verbomed Engine")]
    pub name: String,
    /// Application version
    #[schema(example = "0.1.0")]
    pub version: String,
    /// Enabled capabilities
    pub features: Vec<String>,
}

/// Health check handler
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses(
        (status = 200, description = "System is healthy", body = HealthResponse)
    )
)]
pub async fn health_check(
    State(server): State<VerbomedServer>,
) -> ApiResult<Json<HealthResponse>> {
    let mut checks = HashMap::new();

    let database = if server.is_database_healthy().await {
        "healthy"
    } else {
        "unhealthy"
    };
    checks.insert("database".to_string(), database.to_string());

    let speech = if server.speech.is_some() {
        "enabled"
    } else {
        "disabled"
    };
    checks.insert("speech".to_string(), speech.to_string());

    let status = if database == "healthy" {
        "healthy"
    } else {
        "degraded"
    };

    let response = HealthResponse {
        status: status.to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    Ok(Json(response))
}

/// Version information handler
#[utoipa::path(
    get,
    path = "/version",
    tag = "health",
    responses(
        (status = 200, description = "Version information retrieved successfully", body = VersionResponse)
    )
)]
pub async fn version_info(
    State(server): State<VerbomedServer>,
) -> ApiResult<Json<VersionResponse>> {
    let mut features = vec![
        "note-summarization".to_string(),
        "plain-language-translation".to_string(),
        "document-analysis".to_string(),
        "journal-storage".to_string(),
    ];
    if server.speech.is_some() {
        features.push("speech-synthesis".to_string());
    }

    let response = VersionResponse {
        name: server.config.name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        features,
    };

    Ok(Json(response))
}
