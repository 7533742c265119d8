// Database connection management
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use std::time::Duration;
use tracing::{info, warn};

use crate::error::{JournalError, JournalResult};

/// Create a connection pool from a connection string.
///
/// # Errors
/// Returns [`JournalError::ConnectionFailed`] when the pool cannot be
/// established.
pub async fn connect(connection_string: &str) -> JournalResult<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(20)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(30))
        .idle_timeout(Duration::from_secs(600))
        .connect(connection_string)
        .await
        .map_err(|e| JournalError::ConnectionFailed(e.to_string()))?;

    info!("Database connection pool created");
    Ok(pool)
}

/// Check that the pool answers a trivial query.
pub async fn is_healthy(pool: &PgPool) -> bool {
    match sqlx::query("SELECT 1").fetch_one(pool).await {
        Ok(_) => true,
        Err(e) => {
            warn!("Database health check failed: {}", e);
            false
        }
    }
}
