//! Analysis Client
//!
//! `Analyzer` is the narrow boundary to the remote model. `GeminiClient`
//! talks to the real API, `CachedAnalyzer` wraps any analyzer with the
//! on-disk result cache, and tests plug in their own stubs.

pub mod cache;
mod gemini;

pub use cache::{CacheFile, CachedAnalyzer};
pub use gemini::GeminiClient;

use crate::error::Result;
use async_trait::async_trait;
use desk_detox_common::{AnalysisError, CapturedImage, Controller, DetoxResponse};

#[async_trait]
pub trait Analyzer: Send + Sync {
    async fn analyze(&self, image: &CapturedImage) -> std::result::Result<DetoxResponse, AnalysisError>;
}

/// Drive one analysis through the controller
///
/// The controller ends in `Complete` or `Error`; only an illegal transition
/// (e.g. a second submission) is returned as an error here.
pub async fn run_analysis(
    controller: &mut Controller,
    analyzer: &dyn Analyzer,
    image: CapturedImage,
) -> Result<()> {
    controller.begin(image.clone())?;

    let result = analyzer.analyze(&image).await;
    match &result {
        Ok(response) => tracing::info!(items = response.items.len(), "analysis complete"),
        Err(e) => tracing::warn!(error = %e, "analysis failed"),
    }

    controller.finish(result)?;
    Ok(())
}
