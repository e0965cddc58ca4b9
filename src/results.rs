//! Saved analysis results
//!
//! A saved file goes through the same checks as a fresh model reply,
//! except that payment state is kept.

use crate::error::{DetoxError, Result};
use desk_detox_common::DetoxResponse;
use std::path::Path;

pub fn load_result(path: &Path) -> Result<DetoxResponse> {
    let content = std::fs::read_to_string(path)
        .map_err(|_| DetoxError::FileNotFound(path.display().to_string()))?;
    let mut response: DetoxResponse = serde_json::from_str(&content)?;
    response.validate()?;
    tracing::debug!(items = response.items.len(), path = %path.display(), "saved result loaded");
    Ok(response)
}

pub fn save_result(response: &DetoxResponse, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(response)?;
    std::fs::write(path, json)?;
    Ok(())
}
