use axum::{
    routing::{delete, get, post},
    Router,
};

use crate::{
    handlers::{ai, health, journal, speech},
    server::VerbomedServer,
};

/// Create health check routes
pub fn health_routes() -> Router<VerbomedServer> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/version", get(health::version_info))
}

/// Create AI routes
pub fn ai_routes() -> Router<VerbomedServer> {
    Router::new()
        .route("/process", post(ai::process_text))
        .route("/translate", post(ai::translate_text))
        .route("/analyze", post(ai::analyze_document))
}

/// Create speech routes
pub fn speech_routes() -> Router<VerbomedServer> {
    Router::new().route("/synthesize", post(speech::synthesize))
}

/// Create journal routes
pub fn journal_routes() -> Router<VerbomedServer> {
    Router::new()
        .route(
            "/entries",
            get(journal::list_entries).post(journal::create_entry),
        )
        .route("/entries/:id", delete(journal::delete_entry))
}

/// Assemble every route group under the API prefix
pub fn create_routes() -> Router<VerbomedServer> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1/ai", ai_routes())
        .nest("/api/v1/speech", speech_routes())
        .nest("/api/v1/journal", journal_routes())
}
