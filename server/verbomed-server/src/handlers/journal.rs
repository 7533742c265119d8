//! Authenticated journal CRUD
//!
//! Creation runs through the capture flow so a note posted without a
//! summary gets one attached exactly as a dictated save would.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use journal_store::JournalEntry;
use note_capture::SaveOutcome;

use crate::auth::AuthContext;
use crate::error::{ApiError, ApiResult};
use crate::server::VerbomedServer;

/// Request body for creating an entry
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateEntryRequest {
    /// The note text
    #[serde(default)]
    pub content: String,
}

/// List the caller's entries, newest first
#[utoipa::path(
    get,
    path = "/api/v1/journal/entries",
    tag = "journal",
    responses(
        (status = 200, description = "Entries retrieved"),
        (status = 401, description = "Authentication required")
    ),
    security(("bearer_auth" = []))
)]
pub async fn list_entries(
    auth: AuthContext,
    State(server): State<VerbomedServer>,
) -> ApiResult<Json<Vec<JournalEntry>>> {
    let entries = server.journal.list(auth.user_id).await?;
    Ok(Json(entries))
}

/// Create an entry from note text
#[utoipa::path(
    post,
    path = "/api/v1/journal/entries",
    tag = "journal",
    request_body = CreateEntryRequest,
    responses(
        (status = 201, description = "Entry created"),
        (status = 400, description = "Content is missing or empty"),
        (status = 401, description = "Authentication required"),
        (status = 500, description = "Summarization or persistence failed")
    ),
    security(("bearer_auth" = []))
)]
pub async fn create_entry(
    auth: AuthContext,
    State(server): State<VerbomedServer>,
    Json(request): Json<CreateEntryRequest>,
) -> ApiResult<(StatusCode, Json<JournalEntry>)> {
    let flow = server.capture_flow(auth.user_id);
    flow.edit(&request.content).await;

    match flow.save().await? {
        SaveOutcome::EmptyNote => Err(ApiError::validation("Text is required")),
        SaveOutcome::Saved(entry) => Ok((StatusCode::CREATED, Json(entry))),
    }
}

/// Delete one of the caller's entries
#[utoipa::path(
    delete,
    path = "/api/v1/journal/entries/{id}",
    tag = "journal",
    params(
        ("id" = Uuid, Path, description = "Entry id")
    ),
    responses(
        (status = 204, description = "Entry deleted"),
        (status = 401, description = "Authentication required"),
        (status = 404, description = "Entry does not exist or belongs to another user")
    ),
    security(("bearer_auth" = []))
)]
pub async fn delete_entry(
    auth: AuthContext,
    State(server): State<VerbomedServer>,
    Path(id): Path<Uuid>,
) -> ApiResult<StatusCode> {
    server.journal.remove(id, auth.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
