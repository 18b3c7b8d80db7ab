//! Chat completions against any OpenAI-compatible endpoint.

use crate::error::{QuizError, Result};
use crate::llm::{ChatMessage, ChatModel};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub struct OpenAiChat {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    temperature: f32,
}

impl OpenAiChat {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key,
            temperature: 0.3,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }
}

#[derive(Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    temperature: f32,
}

#[derive(Deserialize, Debug)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize, Debug)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize, Debug)]
struct ResponseMessage {
    content: Option<String>,
}

#[async_trait]
impl ChatModel for OpenAiChat {
    async fn complete(&self, model: &str, messages: &[ChatMessage]) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        debug!("Requesting completion from {} via {}", model, url);

        let request = CompletionRequest {
            model,
            messages,
            temperature: self.temperature,
        };

        let mut builder = self.client.post(&url).json(&request);
        if let Some(ref key) = self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| QuizError::ModelCompletion(format!("{}: request failed: {}", model, e)))?;

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(QuizError::ModelCompletion(format!(
                "{}: API returned {}: {}",
                model,
                status,
                body.chars().take(500).collect::<String>()
            )));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body)?;
        extract_content(parsed)
            .ok_or_else(|| QuizError::ModelCompletion(format!("{}: empty completion", model)))
    }

    fn name(&self) -> &'static str {
        "openai-compatible"
    }
}

fn extract_content(response: CompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .and_then(|c| c.message)
        .and_then(|m| m.content)
        .filter(|c| !c.trim().is_empty())
}
