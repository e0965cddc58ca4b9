//! Gemini `generateContent` wire types
//!
//! The request/response bodies are the same for the native client and the
//! browser fetch client; only the transport differs.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::AnalysisError;
use crate::prompts::{response_schema, SYSTEM_INSTRUCTION, USER_PROMPT};

pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// Low temperature: factual extraction over creative variation
pub const TEMPERATURE: f32 = 0.1;

/// Gemini API request
#[derive(Debug, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<Content>,
    #[serde(rename = "systemInstruction")]
    pub system_instruction: Content,
    #[serde(rename = "generationConfig")]
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content {
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part {
    Text { text: String },
    InlineData { inline_data: InlineData },
}

#[derive(Debug, Serialize)]
pub struct InlineData {
    pub mime_type: String,
    /// Base64 of the encoded image
    pub data: String,
}

#[derive(Debug, Serialize)]
pub struct GenerationConfig {
    pub temperature: f32,
    #[serde(rename = "responseMimeType")]
    pub response_mime_type: String,
    #[serde(rename = "responseSchema")]
    pub response_schema: Value,
}

/// Gemini API response
#[derive(Debug, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseContent {
    #[serde(default)]
    pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
    #[serde(default)]
    pub text: Option<String>,
}

/// Endpoint URL for a model, key passed as query parameter
pub fn endpoint_url(model: &str, api_key: &str) -> String {
    format!("{}/{}:generateContent?key={}", GEMINI_API_BASE, model, api_key)
}

/// Build the one request sent per analysis
///
/// # Arguments
/// * `mime_type` - MIME type of the image (e.g. "image/jpeg")
/// * `base64_data` - the encoded image as Base64
pub fn build_detox_request(mime_type: &str, base64_data: &str) -> GeminiRequest {
    GeminiRequest {
        contents: vec![Content {
            parts: vec![
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: mime_type.to_string(),
                        data: base64_data.to_string(),
                    },
                },
                Part::Text { text: USER_PROMPT.to_string() },
            ],
        }],
        system_instruction: Content {
            parts: vec![Part::Text { text: SYSTEM_INSTRUCTION.to_string() }],
        },
        generation_config: GenerationConfig {
            temperature: TEMPERATURE,
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

impl GeminiResponse {
    /// Concatenated text of the first candidate
    pub fn into_text(self) -> Result<String, AnalysisError> {
        let text: String = self
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        if text.trim().is_empty() {
            Err(AnalysisError::EmptyResponse)
        } else {
            Ok(text)
        }
    }
}

/// Parse a raw `generateContent` body and return its text
pub fn response_text(body: &str) -> Result<String, AnalysisError> {
    let response: GeminiResponse = serde_json::from_str(body)?;
    response.into_text()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialize() {
        let request = build_detox_request("image/png", "iVBORw0KGgo=");
        let json = serde_json::to_string(&request).expect("serialize failed");
        assert!(json.contains("\"contents\""));
        assert!(json.contains("\"systemInstruction\""));
        assert!(json.contains("\"generationConfig\""));
        assert!(json.contains("\"temperature\":0.1"));
        assert!(json.contains("\"responseMimeType\":\"application/json\""));
        assert!(json.contains("\"responseSchema\""));
        assert!(json.contains("\"mime_type\":\"image/png\""));
        assert!(json.contains("\"data\":\"iVBORw0KGgo=\""));
    }

    #[test]
    fn test_part_text_serialize() {
        let part = Part::Text { text: "Hello".to_string() };
        let json = serde_json::to_string(&part).expect("serialize failed");
        assert_eq!(json, r#"{"text":"Hello"}"#);
    }

    #[test]
    fn test_endpoint_url() {
        let url = endpoint_url("gemini-2.5-flash", "k123");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-2.5-flash:generateContent?key=k123"
        );
    }

    #[test]
    fn test_response_text() {
        let body = r#"{"candidates": [{"content": {"parts": [{"text": "{\"summary\":"}, {"text": "\"x\"}"}]}}]}"#;
        assert_eq!(response_text(body).unwrap(), r#"{"summary":"x"}"#);
    }

    #[test]
    fn test_response_text_empty() {
        assert_eq!(response_text(r#"{"candidates": []}"#), Err(AnalysisError::EmptyResponse));
        assert_eq!(response_text(r#"{}"#), Err(AnalysisError::EmptyResponse));
        assert_eq!(
            response_text(r#"{"candidates": [{"finishReason": "SAFETY"}]}"#),
            Err(AnalysisError::EmptyResponse)
        );
    }

    #[test]
    fn test_response_text_malformed() {
        assert!(matches!(response_text("not json"), Err(AnalysisError::Parse(_))));
    }
}
