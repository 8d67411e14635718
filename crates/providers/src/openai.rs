use crate::http::{build_client, send_json};
use crate::{LlmProvider, ProviderError};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Settings for any server speaking the OpenAI chat-completions dialect
/// (OpenAI itself, LM Studio, llama.cpp server, ...).
#[derive(Clone)]
pub struct OpenAiConfig {
    pub api_key: Option<String>,
    pub base_url: String,
    pub chat_model: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Clone)]
pub struct OpenAiProvider {
    client: Client,
    cfg: Arc<OpenAiConfig>,
}

impl OpenAiProvider {
    pub fn new(cfg: OpenAiConfig) -> Result<Self, ProviderError> {
        Ok(Self {
            client: build_client(cfg.timeout_secs)?,
            cfg: Arc::new(cfg),
        })
    }
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChatMessageResp,
}

#[derive(Deserialize)]
struct ChatMessageResp {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatApiResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

fn first_choice_text(parsed: ChatApiResponse) -> Result<String, ProviderError> {
    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message.content)
        .ok_or_else(|| ProviderError::MalformedResponse("no choices in chat response".into()))
}

#[async_trait::async_trait]
impl LlmProvider for OpenAiProvider {
    async fn complete(&self, system: &str, user: &str) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.cfg.chat_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
        };

        let mut builder = self
            .client
            .post(format!(
                "{}/v1/chat/completions",
                self.cfg.base_url.trim_end_matches('/')
            ))
            .json(&body);
        if let Some(key) = &self.cfg.api_key {
            builder = builder.bearer_auth(key);
        }

        let parsed: ChatApiResponse = send_json(builder).await?;
        first_choice_text(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_first_choice() {
        let parsed: ChatApiResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Finance"}},{"message":{"content":"x"}}]}"#,
        )
        .unwrap();
        assert_eq!(first_choice_text(parsed).unwrap(), "Finance");
    }

    #[test]
    fn empty_choices_is_malformed() {
        let parsed: ChatApiResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(matches!(
            first_choice_text(parsed),
            Err(ProviderError::MalformedResponse(_))
        ));
        let parsed: ChatApiResponse = serde_json::from_str(r#"{"error":"x"}"#).unwrap();
        assert!(first_choice_text(parsed).is_err());
    }
}
