//! Root Controller status machine
//!
//! idle -> analyzing -> complete | error, and back to idle on reset.
//! Only one analysis can be in flight: `begin` is refused outside idle.

use crate::capture::CapturedImage;
use crate::error::{AnalysisError, StatusError, GENERIC_ANALYSIS_ERROR};
use crate::store::DocumentStore;
use crate::types::DetoxResponse;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ProcessingStatus {
    #[default]
    Idle,
    Analyzing,
    Complete,
    Error,
}

impl ProcessingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Idle => "idle",
            ProcessingStatus::Analyzing => "analyzing",
            ProcessingStatus::Complete => "complete",
            ProcessingStatus::Error => "error",
        }
    }
}

/// Owns the status, the submitted image and the working copy
#[derive(Debug, Clone, Default)]
pub struct Controller {
    status: ProcessingStatus,
    image: Option<CapturedImage>,
    store: Option<DocumentStore>,
    error: Option<String>,
}

impl Controller {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> ProcessingStatus {
        self.status
    }

    /// Capture and upload are only enabled while idle
    pub fn can_capture(&self) -> bool {
        self.status == ProcessingStatus::Idle
    }

    pub fn image(&self) -> Option<&CapturedImage> {
        self.image.as_ref()
    }

    /// Working copy; only present in `Complete`
    pub fn store(&self) -> Option<&DocumentStore> {
        self.store.as_ref()
    }

    pub fn store_mut(&mut self) -> Option<&mut DocumentStore> {
        self.store.as_mut()
    }

    /// Last error message; only present in `Error`
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit an image: idle -> analyzing
    pub fn begin(&mut self, image: CapturedImage) -> Result<(), StatusError> {
        match self.status {
            ProcessingStatus::Idle => {
                self.status = ProcessingStatus::Analyzing;
                self.image = Some(image);
                self.store = None;
                self.error = None;
                Ok(())
            }
            ProcessingStatus::Analyzing => Err(StatusError::Busy),
            other => Err(StatusError::InvalidTransition {
                from: other.as_str(),
                to: ProcessingStatus::Analyzing.as_str(),
            }),
        }
    }

    /// Record the analysis outcome: analyzing -> complete | error
    pub fn finish(&mut self, result: Result<DetoxResponse, AnalysisError>) -> Result<(), StatusError> {
        if self.status != ProcessingStatus::Analyzing {
            return Err(StatusError::InvalidTransition {
                from: self.status.as_str(),
                to: match result {
                    Ok(_) => ProcessingStatus::Complete.as_str(),
                    Err(_) => ProcessingStatus::Error.as_str(),
                },
            });
        }

        match result {
            Ok(response) => {
                self.store = Some(DocumentStore::load(&response));
                self.status = ProcessingStatus::Complete;
            }
            Err(e) => {
                let message = e.user_message();
                self.error = Some(if message.trim().is_empty() {
                    GENERIC_ANALYSIS_ERROR.to_string()
                } else {
                    message
                });
                self.store = None;
                self.status = ProcessingStatus::Error;
            }
        }
        Ok(())
    }

    /// Back to idle, dropping image, working copy and error
    ///
    /// Refused while analyzing: the request cannot be cancelled.
    pub fn reset(&mut self) -> Result<(), StatusError> {
        if self.status == ProcessingStatus::Analyzing {
            return Err(StatusError::Busy);
        }
        *self = Self::default();
        Ok(())
    }
}
