use thiserror::Error;

#[derive(Error, Debug)]
pub enum CaptureError {
    #[error("Another operation is already in progress")]
    Busy,

    #[error("Please select a file to upload")]
    NoFileSelected,

    #[error("Failed to generate summary")]
    Summarize(#[source] anyhow::Error),

    #[error("Failed to save note")]
    Save(#[source] anyhow::Error),

    #[error("Failed to analyze file")]
    Analyze(#[source] anyhow::Error),

    #[error("Failed to load entries")]
    Load(#[source] anyhow::Error),
}

pub type CaptureResult<T> = Result<T, CaptureError>;
