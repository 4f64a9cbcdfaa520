// AI query gateway
//
// Wraps the external search-augmented text-generation capability behind a
// trait so tests can substitute a fake. One outbound call per query, no
// retry, no session reuse; every failure is converted into a
// `ResearchResult::Failure` at this boundary.

use crate::config::AiConfig;
use crate::models::ResearchResult;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::sync::Arc;

/// An externally supplied capability that turns a prompt into result text
#[async_trait]
pub trait SearchModel: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, String>;
}

/// Gemini generateContent client with the Google Search tool enabled
pub struct GeminiSearchClient {
    client: reqwest::Client,
    config: AiConfig,
}

impl GeminiSearchClient {
    pub fn new(config: AiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait]
impl SearchModel for GeminiSearchClient {
    async fn generate(&self, prompt: &str) -> Result<String, String> {
        // A missing key is a configuration failure surfaced here, at call
        // time, not at startup
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            "AI API key is not configured (set VERTICAL_STUDY_API_KEY or GEMINI_API_KEY)"
                .to_string()
        })?;

        let url = format!(
            "{}/models/{}:generateContent",
            self.config.endpoint, self.config.model
        );

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "tools": [{ "google_search": {} }]
        });

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| format!("Failed to reach AI service: {}", e))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(format!("AI service error ({}): {}", status, text));
        }

        let data: Value = response
            .json()
            .await
            .map_err(|e| format!("Failed to parse AI response: {}", e))?;

        let text = extract_text_segments(&data);
        if text.trim().is_empty() {
            return Err("AI response contained no text".to_string());
        }
        Ok(text)
    }
}

/// Concatenate every text segment of a generateContent response.
///
/// Responses carry their content split across
/// `candidates[*].content.parts[*].text`; non-text parts (search grounding
/// metadata, citations) are skipped.
pub fn extract_text_segments(data: &Value) -> String {
    let mut text = String::new();

    if let Some(candidates) = data.get("candidates").and_then(|c| c.as_array()) {
        for candidate in candidates {
            if let Some(parts) = candidate
                .get("content")
                .and_then(|c| c.get("parts"))
                .and_then(|p| p.as_array())
            {
                for part in parts {
                    if let Some(segment) = part.get("text").and_then(|t| t.as_str()) {
                        text.push_str(segment);
                    }
                }
            }
        }
    }

    text
}

/// The single query surface used by the research orchestrator.
///
/// Callers never see a raw error: a failed call becomes a
/// [`ResearchResult::Failure`] so partial page rendering always succeeds.
pub struct QueryGateway {
    model: Arc<dyn SearchModel>,
}

impl QueryGateway {
    pub fn new(model: Arc<dyn SearchModel>) -> Self {
        Self { model }
    }

    pub async fn query(&self, prompt: &str) -> ResearchResult {
        match self.model.generate(prompt).await {
            Ok(text) => ResearchResult::Success(text),
            Err(message) => {
                log::warn!("AI query failed: {}", message);
                ResearchResult::Failure(message)
            }
        }
    }
}
