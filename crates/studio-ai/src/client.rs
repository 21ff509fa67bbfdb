//! Gemini `generateContent` client.
//!
//! One request per operator action, no retries. Each generation mode maps
//! to a model plus a capability payload; the structured-output schema and
//! the search tool are mutually exclusive in the underlying API, so the
//! payload builder never emits both.

use crate::prompt::{generation_prompt, refinement_prompt};
use crate::{parse_draft, AiError};
use async_trait::async_trait;
use studio_core::{GeneratedDraft, GenerationMode, GenerationRequest, RefinementRequest};
use url::Url;

#[derive(Debug, Clone)]
pub struct EngineSettings {
    pub api_key: Option<String>,
    pub api_base: Url,
    pub flash_model: String,
    pub pro_model: String,
    pub thinking_budget: i32,
}

#[async_trait]
pub trait DraftEngine: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedDraft, AiError>;
    async fn refine(&self, request: &RefinementRequest) -> Result<GeneratedDraft, AiError>;
}

pub struct GeminiEngine {
    http: reqwest::Client,
    settings: EngineSettings,
}

impl GeminiEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self {
            http: reqwest::Client::new(),
            settings,
        }
    }

    fn model_for(&self, mode: GenerationMode) -> &str {
        match mode {
            GenerationMode::Standard | GenerationMode::Search => &self.settings.flash_model,
            GenerationMode::Thinking => &self.settings.pro_model,
        }
    }

    async fn invoke(&self, model: &str, payload: serde_json::Value) -> Result<String, AiError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .ok_or(AiError::NotConfigured)?;

        let endpoint = format!(
            "{}/models/{model}:generateContent",
            self.settings.api_base.as_str().trim_end_matches('/')
        );

        let response = self
            .http
            .post(&endpoint)
            .query(&[("key", api_key)])
            .json(&payload)
            .send()
            .await?
            .error_for_status()?;

        let json: serde_json::Value = response.json().await?;
        let parts = json
            .pointer("/candidates/0/content/parts")
            .and_then(|value| value.as_array())
            .ok_or(AiError::EmptyResponse)?;

        let text = parts
            .iter()
            .filter_map(|part| part.pointer("/text").and_then(|value| value.as_str()))
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }

        Ok(text)
    }
}

#[async_trait]
impl DraftEngine for GeminiEngine {
    async fn generate(&self, request: &GenerationRequest) -> Result<GeneratedDraft, AiError> {
        let structured = request.mode != GenerationMode::Search;
        let prompt = generation_prompt(&request.source_text, structured, &request.instructions);
        let payload = payload_for(request.mode, &prompt, self.settings.thinking_budget);
        let model = self.model_for(request.mode);

        tracing::debug!(model, mode = ?request.mode, "requesting draft");
        let text = self.invoke(model, payload).await?;
        parse_draft(&text)
    }

    async fn refine(&self, request: &RefinementRequest) -> Result<GeneratedDraft, AiError> {
        let prompt = refinement_prompt(
            &request.source_text,
            &request.current_subject,
            &request.current_body,
            &request.instruction,
        );
        // Refinement always runs on the fast model with structured output.
        let payload = payload_for(GenerationMode::Standard, &prompt, self.settings.thinking_budget);

        tracing::debug!(model = %self.settings.flash_model, "requesting refinement");
        let text = self.invoke(&self.settings.flash_model, payload).await?;
        parse_draft(&text)
    }
}

/// Output schema for structured-JSON calls: exactly a subject and a
/// complete HTML body, nothing else.
fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "subject": {
                "type": "STRING",
                "description": "A concise and relevant subject line for the reply email."
            },
            "body": {
                "type": "STRING",
                "description": "The full body of the email reply, formatted as a complete, branded HTML string based on the provided template."
            }
        },
        "required": ["subject", "body"]
    })
}

pub(crate) fn payload_for(
    mode: GenerationMode,
    prompt: &str,
    thinking_budget: i32,
) -> serde_json::Value {
    let mut payload = serde_json::json!({
        "contents": [{ "parts": [{ "text": prompt }] }]
    });

    match mode {
        GenerationMode::Standard => {
            payload["generationConfig"] = serde_json::json!({
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            });
        }
        GenerationMode::Search => {
            payload["tools"] = serde_json::json!([{ "google_search": {} }]);
        }
        GenerationMode::Thinking => {
            payload["generationConfig"] = serde_json::json!({
                "thinkingConfig": { "thinkingBudget": thinking_budget },
                "responseMimeType": "application/json",
                "responseSchema": response_schema(),
            });
        }
    }

    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_payload_never_mixes_tools_and_schema() {
        let payload = payload_for(GenerationMode::Search, "p", 1024);
        assert!(payload.get("tools").is_some());
        assert!(payload.get("generationConfig").is_none());
    }

    #[test]
    fn standard_payload_requests_structured_json() {
        let payload = payload_for(GenerationMode::Standard, "p", 1024);
        assert!(payload.get("tools").is_none());
        assert_eq!(
            payload.pointer("/generationConfig/responseMimeType"),
            Some(&serde_json::json!("application/json"))
        );
        assert_eq!(
            payload.pointer("/generationConfig/responseSchema/required"),
            Some(&serde_json::json!(["subject", "body"]))
        );
        assert!(payload
            .pointer("/generationConfig/thinkingConfig")
            .is_none());
    }

    #[test]
    fn thinking_payload_adds_reasoning_budget() {
        let payload = payload_for(GenerationMode::Thinking, "p", 32_768);
        assert_eq!(
            payload.pointer("/generationConfig/thinkingConfig/thinkingBudget"),
            Some(&serde_json::json!(32_768))
        );
        assert!(payload.get("tools").is_none());
    }
}
