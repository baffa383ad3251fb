// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Client for a vision-capable chat completion model.
//!
//! Handles:
//! - Building the multimodal request (instruction text + image URL)
//! - Extracting the first choice's text content
//! - Mapping transport and HTTP failures to `AppError::UpstreamModel`

use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";

/// Upper bound on completion length.
pub const MAX_COMPLETION_TOKENS: u32 = 1000;

/// A model that answers a text instruction about one image.
#[async_trait]
pub trait VisionModel: Send + Sync {
    /// Returns the model's text reply, or `None` when it produced no content.
    async fn describe_image(
        &self,
        instruction: &str,
        image_url: &str,
    ) -> Result<Option<String>, AppError>;
}

/// OpenAI chat completions client.
#[derive(Clone)]
pub struct OpenAiVisionClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl OpenAiVisionClient {
    pub fn new(api_key: String, model: String, timeout: Duration) -> Result<Self, AppError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("HTTP client init failed: {}", e)))?;

        Ok(Self {
            http,
            base_url: OPENAI_API_BASE.to_string(),
            api_key,
            model,
        })
    }

    /// Point the client at a different API host (proxies, local gateways).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }
}

#[async_trait]
impl VisionModel for OpenAiVisionClient {
    async fn describe_image(
        &self,
        instruction: &str,
        image_url: &str,
    ) -> Result<Option<String>, AppError> {
        let request = build_request(&self.model, instruction, image_url);
        let url = format!("{}/chat/completions", self.base_url);

        tracing::debug!(model = %self.model, "Sending image to vision model");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::UpstreamModel("request timed out".to_string())
                } else {
                    AppError::UpstreamModel(e.to_string())
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if status.as_u16() == 429 {
                tracing::warn!("Vision model rate limit hit (429)");
            }
            return Err(AppError::UpstreamModel(format!("HTTP {}: {}", status, body)));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamModel(format!("JSON parse error: {}", e)))?;

        Ok(completion.first_text())
    }
}

// ─── Wire types ──────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl<'a> },
}

#[derive(Debug, Serialize)]
struct ImageUrl<'a> {
    url: &'a str,
}

fn build_request<'a>(
    model: &'a str,
    instruction: &'a str,
    image_url: &'a str,
) -> ChatCompletionRequest<'a> {
    ChatCompletionRequest {
        model,
        messages: vec![ChatMessage {
            role: "user",
            content: vec![
                ContentPart::Text { text: instruction },
                ContentPart::ImageUrl {
                    image_url: ImageUrl { url: image_url },
                },
            ],
        }],
        max_tokens: MAX_COMPLETION_TOKENS,
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    content: Option<String>,
}

impl ChatCompletionResponse {
    fn first_text(self) -> Option<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
    }
}
