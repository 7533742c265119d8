//! Session verification against the hosted auth service
//!
//! Requests carry a bearer token issued by the external auth service; the
//! server never stores sessions itself. [`AuthContext`] is the extractor
//! handlers take to require an authenticated caller.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{header, request::Parts, HeaderMap},
};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;
use uuid::Uuid;

use crate::error::ApiError;
use crate::server::VerbomedServer;

/// Authenticated user resolved from a session token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
}

#[derive(Debug, Deserialize)]
struct UserResponse {
    id: Uuid,
}

/// Client for the auth service's current-user endpoint
pub struct SessionVerifier {
    http: reqwest::Client,
    auth_url: String,
    anon_key: Option<SecretString>,
}

impl SessionVerifier {
    /// Build a verifier from environment configuration.
    ///
    /// # Errors
    /// Returns [`ApiError::Internal`] if the HTTP client cannot be built.
    pub fn from_env() -> Result<Self, ApiError> {
        let auth_url =
            std::env::var("AUTH_URL").unwrap_or_else(|_| "http://localhost:54321".to_string());
        let anon_key = std::env::var("AUTH_ANON_KEY").ok().map(SecretString::new);

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .map_err(|e| ApiError::internal(format!("Failed to build auth client: {e}")))?;

        Ok(Self {
            http,
            auth_url,
            anon_key,
        })
    }

    /// Resolve a bearer token to the user it belongs to.
    ///
    /// # Errors
    /// Returns [`ApiError::Authentication`] when the token is rejected and
    /// [`ApiError::Upstream`] when the auth service cannot be reached.
    pub async fn verify(&self, token: &str) -> Result<AuthUser, ApiError> {
        let url = format!("{}/auth/v1/user", self.auth_url.trim_end_matches('/'));

        let mut request = self.http.get(&url).bearer_auth(token);
        if let Some(key) = &self.anon_key {
            request = request.header("apikey", key.expose_secret());
        }

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::upstream("Authentication service unavailable", e))?;

        if !response.status().is_success() {
            return Err(ApiError::authentication("Invalid or expired session"));
        }

        let user: UserResponse = response
            .json()
            .await
            .map_err(|e| ApiError::upstream("Authentication service unavailable", e))?;

        debug!(user_id = %user.id, "Session verified");
        Ok(AuthUser { id: user.id })
    }
}

/// Extract the bearer token from an Authorization header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .filter(|token| !token.is_empty())
}

/// Authenticated request context
///
/// Rejects with 401 when the Authorization header is absent or the token
/// does not resolve to a user.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
}

#[async_trait]
impl FromRequestParts<VerbomedServer> for AuthContext {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &VerbomedServer,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)
            .ok_or_else(|| ApiError::authentication("Authentication required"))?;

        let user = state.sessions.verify(token).await?;
        Ok(AuthContext { user_id: user.id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn bearer_token_is_extracted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer abc123"),
        );
        assert_eq!(bearer_token(&headers), Some("abc123"));
    }

    #[test]
    fn missing_header_yields_no_token() {
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic dXNlcjpwYXNz"),
        );
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn empty_bearer_token_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static("Bearer "));
        assert_eq!(bearer_token(&headers), None);
    }
}
