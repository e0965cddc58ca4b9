use desk_detox_common::{AnalysisError, CaptureError, StatusError};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DetoxError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Gemini API key is not set. Export GEMINI_API_KEY or run `desk-detox config --set-api-key YOUR_KEY`")]
    MissingApiKey,

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Image error: {0}")]
    ImageLoad(String),

    #[error(transparent)]
    Capture(#[from] CaptureError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Status(#[from] StatusError),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, DetoxError>;
