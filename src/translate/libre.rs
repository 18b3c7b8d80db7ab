//! Translation through a LibreTranslate-compatible HTTP API.

use crate::error::{QuizError, Result};
use crate::translate::Translator;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Request timeout for a single translation call.
const TRANSLATE_TIMEOUT: Duration = Duration::from_secs(30);

/// Translator backed by a LibreTranslate `/translate` endpoint.
pub struct LibreTranslator {
    client: Client,
    url: String,
    api_key: Option<String>,
}

impl LibreTranslator {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            client: build_client(TRANSLATE_TIMEOUT),
            url: url.into(),
            api_key: None,
        }
    }

    /// Replace the per-request time limit.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = build_client(timeout);
        self
    }

    /// Some public instances require a key.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

fn build_client(timeout: Duration) -> Client {
    Client::builder().timeout(timeout).build().unwrap_or_else(|e| {
        warn!(
            "Failed to build translation client ({}), requests will have no {}s time limit",
            e,
            timeout.as_secs()
        );
        Client::new()
    })
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    api_key: Option<&'a str>,
}

#[derive(Deserialize, Debug)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

#[async_trait]
impl Translator for LibreTranslator {
    async fn translate(&self, text: &str, source_lang: &str, target_lang: &str) -> Result<String> {
        debug!(
            "Translating {} chars {} -> {}",
            text.chars().count(),
            source_lang,
            target_lang
        );

        let request = TranslateRequest {
            q: text,
            source: source_lang,
            target: target_lang,
            format: "text",
            api_key: self.api_key.as_deref(),
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await
            .map_err(|e| QuizError::Translation(format!("request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| QuizError::Translation(format!("failed to read response: {}", e)))?;

        if status != reqwest::StatusCode::OK {
            return Err(QuizError::Translation(format!(
                "API error ({}): {}",
                status, body
            )));
        }

        let parsed: TranslateResponse = serde_json::from_str(&body)
            .map_err(|e| QuizError::Translation(format!("malformed response: {}", e)))?;

        Ok(parsed.translated_text)
    }

    fn name(&self) -> &'static str {
        "libretranslate"
    }
}
