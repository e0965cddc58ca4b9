//! Gemini API call through `fetch`
//!
//! Request building and response parsing live in the common crate; this
//! module only moves bytes over the wire and maps browser failures onto
//! `AnalysisError`.

use desk_detox_common::gemini::GeminiResponse;
use desk_detox_common::{
    build_detox_request, endpoint_url, parse_detox_response, AnalysisError, CapturedImage,
    DetoxResponse,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// One analysis: image in, validated response out
pub async fn analyze_image(
    api_key: &str,
    model: &str,
    image: &CapturedImage,
) -> Result<DetoxResponse, AnalysisError> {
    let api_key = api_key.trim();
    if api_key.is_empty() {
        return Err(AnalysisError::MissingApiKey);
    }

    let request = build_detox_request(&image.mime_type, &image.to_base64());
    let body = serde_json::to_string(&request)?;
    let text = call_gemini_api(&endpoint_url(model, api_key), &body).await?;
    parse_detox_response(&text)
}

async fn call_gemini_api(url: &str, body: &str) -> Result<String, AnalysisError> {
    let opts = RequestInit::new();
    opts.set_method("POST");
    opts.set_mode(RequestMode::Cors);
    opts.set_body(&JsValue::from_str(body));

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
    request
        .headers()
        .set("Content-Type", "application/json")
        .map_err(transport)?;

    let window = web_sys::window()
        .ok_or_else(|| AnalysisError::Transport("no window".to_string()))?;
    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?;
    let resp: Response = resp_value.dyn_into().map_err(transport)?;

    if !resp.ok() {
        let text = JsFuture::from(resp.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        return Err(AnalysisError::Http {
            status: resp.status(),
            body: text.as_string().unwrap_or_default(),
        });
    }

    let json = JsFuture::from(resp.json().map_err(transport)?)
        .await
        .map_err(transport)?;
    let response: GeminiResponse = serde_wasm_bindgen::from_value(json)
        .map_err(|e| AnalysisError::Parse(e.to_string()))?;
    response.into_text()
}

/// `fetch` rejects with a `TypeError`; its `message` is the useful part
fn transport(err: JsValue) -> AnalysisError {
    let message = err
        .as_string()
        .or_else(|| {
            js_sys::Reflect::get(&err, &JsValue::from_str("message"))
                .ok()
                .and_then(|m| m.as_string())
        })
        .unwrap_or_default();
    AnalysisError::Transport(message)
}
