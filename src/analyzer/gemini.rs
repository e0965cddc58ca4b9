//! Gemini REST client

use super::Analyzer;
use crate::config::Config;
use crate::error::{DetoxError, Result};
use async_trait::async_trait;
use desk_detox_common::{
    build_detox_request, endpoint_url, parse_detox_response, response_text, AnalysisError,
    CapturedImage, DetoxResponse,
};
use std::time::Duration;

pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: &str, config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(|e| DetoxError::Config(format!("HTTP client: {}", e)))?;

        Ok(Self {
            http,
            api_key: api_key.to_string(),
            model: config.model.clone(),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn call(&self, image: &CapturedImage) -> std::result::Result<String, AnalysisError> {
        let request = build_detox_request(&image.mime_type, &image.to_base64());

        tracing::debug!(model = %self.model, bytes = image.bytes.len(), mime = %image.mime_type, "sending generateContent");

        let response = self
            .http
            .post(endpoint_url(&self.model, &self.api_key))
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                // reqwest errors carry the URL, which carries the key
                AnalysisError::Transport(e.without_url().to_string())
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| AnalysisError::Transport(e.without_url().to_string()))?;

        if !status.is_success() {
            return Err(AnalysisError::Http { status: status.as_u16(), body });
        }

        tracing::debug!(len = body.len(), "response received");
        response_text(&body)
    }
}

#[async_trait]
impl Analyzer for GeminiClient {
    async fn analyze(&self, image: &CapturedImage) -> std::result::Result<DetoxResponse, AnalysisError> {
        let text = self.call(image).await?;
        parse_detox_response(&text).inspect_err(|e| {
            let preview: String = text.chars().take(300).collect();
            tracing::debug!(error = %e, preview = %preview, "response rejected");
        })
    }
}
