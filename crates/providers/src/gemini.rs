//! Google Generative Language (Gemini) backend.

use crate::http::{build_client, send_json};
use crate::{LlmProvider, ProviderError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash";

#[derive(Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone)]
pub struct GeminiProvider {
    client: Client,
    cfg: Arc<GeminiConfig>,
}

impl GeminiProvider {
    pub fn new(cfg: GeminiConfig) -> Result<Self, ProviderError> {
        if cfg.api_key.trim().is_empty() {
            return Err(ProviderError::MissingCredentials("gemini".into()));
        }
        Ok(Self {
            client: build_client(cfg.timeout_secs)?,
            cfg: Arc::new(cfg),
        })
    }
}

#[derive(Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Serialize)]
struct SystemInstruction<'a> {
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
struct TextPart<'a> {
    text: &'a str,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'static str,
    parts: Vec<TextPart<'a>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: SystemInstruction<'a>,
    contents: Vec<Content<'a>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

fn candidate_text(parsed: GenerateResponse) -> Result<String, ProviderError> {
    let content = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| ProviderError::MalformedResponse("no candidates in response".into()))?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    if text.is_empty() {
        return Err(ProviderError::MalformedResponse(
            "candidate has no text parts".into(),
        ));
    }
    Ok(text)
}

#[async_trait::async_trait]
impl LlmProvider for GeminiProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            system_instruction: SystemInstruction {
                parts: vec![TextPart { text: system }],
            },
            contents: vec![Content {
                role: "user",
                parts: vec![TextPart { text: user }],
            }],
        };

        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.cfg.base_url.trim_end_matches('/'),
            self.cfg.model
        );
        let builder = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.cfg.api_key)
            .json(&body);

        let parsed: GenerateResponse = send_json(builder).await?;
        candidate_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_text_parts_of_first_candidate() {
        let parsed: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"Relatórios "},{"text":"Financeiros"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(candidate_text(parsed).unwrap(), "Relatórios Financeiros");
    }

    #[test]
    fn blocked_prompt_is_malformed() {
        let parsed: GenerateResponse =
            serde_json::from_str(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).unwrap();
        assert!(matches!(
            candidate_text(parsed),
            Err(ProviderError::MalformedResponse(_))
        ));
    }

    #[test]
    fn empty_key_is_rejected() {
        let err = GeminiProvider::new(GeminiConfig {
            api_key: "  ".into(),
            base_url: DEFAULT_BASE_URL.into(),
            model: DEFAULT_MODEL.into(),
            timeout_secs: None,
        })
        .err();
        assert!(matches!(err, Some(ProviderError::MissingCredentials(_))));
    }
}
