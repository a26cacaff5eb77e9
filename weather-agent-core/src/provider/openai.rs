use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use crate::config::LlmConfig;

use super::{LanguageModel, truncate_body};

const SYSTEM_PROMPT: &str = "You are a friendly weather assistant. \
Answer the user's question using only the weather data provided. \
Keep the reply short and practical, and include the advice when it is given.";

const REQUEST_TIMEOUT_SECS: u64 = 60;

/// OpenAI-compatible Chat Completions client.
pub struct OpenAiChat {
    api_key: String,
    api_base: String,
    model: String,
    temperature: f32,
    http: Client,
}

impl std::fmt::Debug for OpenAiChat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiChat")
            .field("api_key", &"[REDACTED]")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

impl OpenAiChat {
    pub fn new(api_key: String, config: &LlmConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to create HTTP client for language model")?;

        Ok(Self {
            api_key,
            api_base: config.api_base.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            temperature: config.temperature,
            http,
        })
    }

    fn build_request<'a>(&'a self, context: &'a str) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage { role: "system", content: SYSTEM_PROMPT },
                ChatMessage { role: "user", content: context },
            ],
            temperature: self.temperature,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    content: Option<String>,
}

#[async_trait]
impl LanguageModel for OpenAiChat {
    async fn generate_response(&self, context: &str) -> Result<String> {
        let url = format!("{}/chat/completions", self.api_base);
        debug!(model = %self.model, "Sending chat completion request");

        let res = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.build_request(context))
            .send()
            .await
            .context("Failed to send request to language model")?;

        let status = res.status();
        let body = res
            .text()
            .await
            .context("Failed to read language model response body")?;

        if !status.is_success() {
            return Err(anyhow!(
                "Language model request failed with status {}: {}",
                status,
                truncate_body(&body),
            ));
        }

        let parsed: ChatResponse =
            serde_json::from_str(&body).context("Failed to parse language model JSON")?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or_else(|| anyhow!("Language model returned no content"))
    }
}
