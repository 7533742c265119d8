use thiserror::Error;

#[derive(Error, Debug)]
pub enum JournalError {
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    #[error("Entry not found")]
    NotFound,

    #[error("Database error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    InternalError(#[from] anyhow::Error),
}

pub type JournalResult<T> = Result<T, JournalError>;
