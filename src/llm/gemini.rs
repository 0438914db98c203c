//! Gemini `generateContent` client, one non-streaming request per reading.
//!
//! Request shape:
//! - API key in the `x-goog-api-key` header; the URL never carries it
//! - image as `inlineData { mimeType, data }`, then the instruction text part
//! - persona in `systemInstruction`
//!
//! The narrative is every text part of `candidates[0].content.parts`, joined.

use super::provider::FortuneBackend;
use super::types::FortuneRequest;
use crate::config::FortuneConfig;
use crate::error::{FortuneError, Result};
use crate::settings_commands::resolve_api_key;

pub const API_KEY_HEADER: &str = "x-goog-api-key";

/// Longest slice of an error body kept in `FortuneError::Backend`.
const ERROR_BODY_LIMIT: usize = 500;

pub struct GeminiBackend {
    client: reqwest::Client,
}

impl GeminiBackend {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// The POST for one reading. The key travels only in a header.
    pub fn build_request(
        &self,
        request: &FortuneRequest,
        config: &FortuneConfig,
        api_key: &str,
    ) -> Result<reqwest::Request> {
        let req = self
            .client
            .post(endpoint(config))
            .header(API_KEY_HEADER, api_key)
            .header("content-type", "application/json")
            .json(&request_body(request, config))
            .build()?;
        Ok(req)
    }
}

impl Default for GeminiBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl FortuneBackend for GeminiBackend {
    async fn generate(&self, request: &FortuneRequest) -> Result<String> {
        let config = FortuneConfig::from_env();
        let api_key = resolve_api_key().ok_or(FortuneError::MissingApiKey)?;

        log::info!("[LLM] Provider: gemini");
        log::info!("[LLM] Model: {}", config.model);
        log::info!(
            "[LLM] Image: {} ({} base64 chars), instruction: {} chars",
            request.image.mime_type,
            request.image.data.len(),
            request.instruction.len()
        );

        let start = std::time::Instant::now();
        let response = self
            .client
            .execute(self.build_request(request, &config, &api_key)?)
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(backend_error(status.as_u16(), &body));
        }

        let json: serde_json::Value = response.json().await?;
        log::info!("[LLM] Response in {}ms", start.elapsed().as_millis());

        if let Some(usage) = json.get("usageMetadata") {
            log::info!(
                "[LLM] Tokens: input={}, output={}",
                usage["promptTokenCount"].as_u64().unwrap_or(0),
                usage["candidatesTokenCount"].as_u64().unwrap_or(0)
            );
        }

        extract_text(&json)
    }
}

/// `generateContent` URL for the configured model. Carries no credentials.
pub fn endpoint(config: &FortuneConfig) -> String {
    format!("{}/models/{}:generateContent", config.api_base, config.model)
}

/// Map a non-2xx answer to `Backend`, keeping only the head of the body.
pub fn backend_error(status: u16, body: &str) -> FortuneError {
    FortuneError::Backend {
        status,
        body: body.chars().take(ERROR_BODY_LIMIT).collect(),
    }
}

/// JSON body for `generateContent`.
pub fn request_body(request: &FortuneRequest, config: &FortuneConfig) -> serde_json::Value {
    serde_json::json!({
        "contents": [
            {
                "role": "user",
                "parts": [
                    { "inlineData": request.image },
                    { "text": request.instruction }
                ]
            }
        ],
        "systemInstruction": {
            "parts": [
                { "text": request.system_instruction }
            ]
        },
        "generationConfig": {
            "maxOutputTokens": config.max_tokens,
            "temperature": config.temperature
        }
    })
}

/// Pull the narrative out of a `generateContent` response.
///
/// A blocked prompt or a candidate with no text parts is `EmptyResponse`.
pub fn extract_text(json: &serde_json::Value) -> Result<String> {
    if let Some(reason) = json
        .get("promptFeedback")
        .and_then(|f| f.get("blockReason"))
        .and_then(|r| r.as_str())
    {
        log::warn!("[LLM] Prompt blocked: {}", reason);
        return Err(FortuneError::EmptyResponse);
    }

    let text: String = json
        .get("candidates")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("content"))
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(|t| t.as_str()))
                .collect()
        })
        .unwrap_or_default();

    if text.trim().is_empty() {
        return Err(FortuneError::EmptyResponse);
    }
    Ok(text)
}
