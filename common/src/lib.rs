//! Desk Detox Common Library
//!
//! Types, derivations and wire formats shared by the CLI and the Web (WASM) app

pub mod types;
pub mod error;
pub mod prompts;
pub mod parser;
pub mod gemini;
pub mod capture;
pub mod store;
pub mod dashboard;
pub mod status;

pub use types::{Category, DetoxItem, DetoxResponse, Filter, Visibility, MAX_URGENCY, MIN_URGENCY, NO_DATE};
pub use error::{AnalysisError, CaptureError, StatusError, GENERIC_ANALYSIS_ERROR};
pub use parser::{extract_json, parse_detox_response};
pub use gemini::{build_detox_request, endpoint_url, response_text, DEFAULT_MODEL};
pub use capture::{CapturedImage, MediaRelease, StreamGuard};
pub use store::DocumentStore;
pub use dashboard::{DashboardView, CardView, PlanEntry, CategoryCount, ViewOptions};
pub use status::{Controller, ProcessingStatus};
