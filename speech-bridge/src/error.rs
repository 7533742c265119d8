use thiserror::Error;

#[derive(Error, Debug)]
pub enum SpeechError {
    #[error("Speech capability unavailable: {0}")]
    Unsupported(String),

    #[error("Recognition error: {0}")]
    Recognition(String),

    #[error("Synthesis error: {0}")]
    Synthesis(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type SpeechResult<T> = Result<T, SpeechError>;
