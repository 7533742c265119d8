use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

use note_capture::CaptureError;

/// Error body returned to clients: `{"error": "..."}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: String,
}

/// Main API error enum
///
/// Upstream provider failures carry a generic client-facing message plus
/// the provider detail, which is logged server-side and never serialized.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String },

    #[error("{message}")]
    Authentication { message: String },

    #[error("{resource_type} not found")]
    NotFound { resource_type: String },

    #[error("{message}")]
    Conflict { message: String },

    #[error("{message}")]
    Upstream { message: String, detail: String },

    #[error("{message}")]
    ServiceUnavailable { message: String },

    #[error("Database error")]
    Database(#[from] journal_store::JournalError),

    #[error("Internal server error")]
    Internal { message: String },
}

impl ApiError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    pub fn not_found(resource_type: impl Into<String>) -> Self {
        Self::NotFound {
            resource_type: resource_type.into(),
        }
    }

    /// An upstream provider failure: `message` is what the client sees,
    /// `detail` is logged server-side only.
    pub fn upstream(message: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::Upstream {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Authentication { .. } => StatusCode::UNAUTHORIZED,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Upstream { .. } | ApiError::Internal { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Database(db_err) => match db_err {
                journal_store::JournalError::NotFound => StatusCode::NOT_FOUND,
                journal_store::JournalError::ConnectionFailed(_) => StatusCode::SERVICE_UNAVAILABLE,
                _ => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    /// Get the error type string
    pub fn error_type(&self) -> &'static str {
        match self {
            ApiError::Validation { .. } => "validation_error",
            ApiError::Authentication { .. } => "authentication_error",
            ApiError::NotFound { .. } => "not_found",
            ApiError::Conflict { .. } => "conflict",
            ApiError::Upstream { .. } => "upstream_error",
            ApiError::ServiceUnavailable { .. } => "service_unavailable",
            ApiError::Database(_) => "database_error",
            ApiError::Internal { .. } => "internal_error",
        }
    }

    fn client_message(&self) -> String {
        match self {
            ApiError::Database(db_err) => match db_err {
                journal_store::JournalError::NotFound => "Entry not found".to_string(),
                journal_store::JournalError::ConnectionFailed(_) => {
                    "Database is unavailable".to_string()
                }
                _ => "Database operation failed".to_string(),
            },
            _ => self.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status_code = self.status_code();

        match &self {
            ApiError::Upstream { message, detail } => {
                error!(
                    error_type = %self.error_type(),
                    status_code = %status_code.as_u16(),
                    detail = %detail,
                    "{message}"
                );
            }
            _ => {
                error!(
                    error_type = %self.error_type(),
                    status_code = %status_code.as_u16(),
                    error = %self,
                    "API error occurred"
                );
            }
        }

        let body = ApiErrorBody {
            error: self.client_message(),
        };

        (status_code, Json(body)).into_response()
    }
}

impl From<CaptureError> for ApiError {
    fn from(error: CaptureError) -> Self {
        match error {
            CaptureError::Busy => ApiError::Conflict {
                message: error.to_string(),
            },
            CaptureError::NoFileSelected => ApiError::Validation {
                message: error.to_string(),
            },
            CaptureError::Summarize(detail) | CaptureError::Save(detail) => {
                ApiError::upstream("Failed to save note", detail)
            }
            CaptureError::Analyze(detail) => ApiError::upstream("Failed to analyze image", detail),
            CaptureError::Load(detail) => ApiError::upstream("Failed to load entries", detail),
        }
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_maps_to_bad_request() {
        let err = ApiError::validation("Text is required");
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "Text is required");
    }

    #[test]
    fn authentication_maps_to_unauthorized() {
        let err = ApiError::authentication("Authentication required");
        assert_eq!(err.status_code(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn upstream_hides_detail_from_the_client() {
        let err = ApiError::upstream("Failed to process text", "provider returned 503");
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.client_message(), "Failed to process text");
        assert!(!err.client_message().contains("503"));
    }

    #[test]
    fn missing_entry_maps_to_not_found() {
        let err = ApiError::from(journal_store::JournalError::NotFound);
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn capture_refusal_maps_to_validation() {
        let err = ApiError::from(CaptureError::NoFileSelected);
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.client_message(), "Please select a file to upload");
    }

    #[test]
    fn capture_busy_maps_to_conflict() {
        let err = ApiError::from(CaptureError::Busy);
        assert_eq!(err.status_code(), StatusCode::CONFLICT);
    }

    #[test]
    fn error_body_serializes_as_single_error_field() {
        let body = ApiErrorBody {
            error: "Text is required".to_string(),
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json, serde_json::json!({"error": "Text is required"}));
    }
}
