use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// Main OpenAPI documentation structure
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::handlers::health::health_check,
        crate::handlers::health::version_info,

        // AI endpoints
        crate::handlers::ai::process_text,
        crate::handlers::ai::translate_text,
        crate::handlers::ai::analyze_document,

        // Speech endpoints
        crate::handlers::speech::synthesize,

        // Journal endpoints
        crate::handlers::journal::list_entries,
        crate::handlers::journal::create_entry,
        crate::handlers::journal::delete_entry,
    ),
    components(
        schemas(
            crate::handlers::health::HealthResponse,
            crate::handlers::health::VersionResponse,
            crate::handlers::ai::TextRequest,
            crate::handlers::ai::ProcessResponse,
            crate::handlers::ai::TranslateResponse,
            crate::handlers::ai::AnalyzeResponse,
            crate::handlers::speech::SynthesizeRequest,
            crate::handlers::journal::CreateEntryRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "System health and version endpoints"),
        (name = "ai", description = "Note summarization, translation and document analysis"),
        (name = "speech", description = "Speech synthesis"),
        (name = "journal", description = "Journal entry storage"),
    ),
    info(
        title = "Verbomed Engine API",
        version = "0.1.0",
        description = "Voice journal backend: dictated note capture, AI summarization, medical document analysis and journal storage.",
        contact(
            name = "Verbomed Team",
            email = "team@verbomed.dev",
            url = "https://verbomed.dev"
        ),
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server"),
        (url = "https://api.verbomed.dev", description = "Production server"),
    ),
)]
pub struct ApiDoc;

/// Registers the bearer-token security scheme referenced by the
/// authenticated paths.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_includes_every_route_group() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/health"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/ai/process"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/v1/ai/analyze"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/v1/speech/synthesize"));
        assert!(paths
            .iter()
            .any(|p| p.as_str() == "/api/v1/journal/entries"));
    }
}
