//! Verbomed HTTP server
//!
//! Wires the AI gateway, document store, journal repository and speech
//! provider behind the REST API: note summarization and translation,
//! authenticated document analysis, speech synthesis and journal CRUD.

pub mod auth;
pub mod capture;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;

// Re-export commonly used types
pub use error::{ApiError, ApiResult};
pub use server::{ServerConfig, VerbomedServer};

use axum::{middleware::from_fn, routing::get, Json, Router};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

/// Create the main application router with all routes and middleware
pub fn create_app(server: VerbomedServer) -> Router {
    routes::create_routes()
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(openapi::ApiDoc::openapi()) }),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::create_cors_layer())
                .layer(from_fn(middleware::request_timing_middleware)),
        )
        .with_state(server)
}
