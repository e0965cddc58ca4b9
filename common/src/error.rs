//! Error types

use thiserror::Error;

/// Fallback text when a failure carries no message of its own
pub const GENERIC_ANALYSIS_ERROR: &str = "Something went wrong while analysing the image. Please try again.";

/// Analysis Client failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("Gemini API key is not configured. Set GEMINI_API_KEY or enter a key in the settings")]
    MissingApiKey,

    #[error("Network error: {0}")]
    Transport(String),

    #[error("API error {status}: {body}")]
    Http { status: u16, body: String },

    #[error("The model returned no text response")]
    EmptyResponse,

    #[error("Response does not match the schema: {0}")]
    Parse(String),
}

impl AnalysisError {
    /// Message for the error banner: verbatim when available, generic otherwise
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::Transport(m) | AnalysisError::Parse(m) if m.trim().is_empty() => {
                GENERIC_ANALYSIS_ERROR.to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<serde_json::Error> for AnalysisError {
    fn from(e: serde_json::Error) -> Self {
        AnalysisError::Parse(e.to_string())
    }
}

/// Image Capture/Upload failures
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    #[error("Cannot access the camera. Check the permissions")]
    PermissionDenied,

    #[error("No camera available")]
    Unavailable,

    #[error("Not an image: {0}")]
    NotAnImage(String),

    #[error("Could not read the image: {0}")]
    Read(String),
}

/// Root Controller transition failures
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusError {
    #[error("An analysis is already in progress")]
    Busy,

    #[error("Cannot go from {from} to {to}")]
    InvalidTransition { from: &'static str, to: &'static str },
}
