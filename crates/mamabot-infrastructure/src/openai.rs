//! OpenAI-backed chat, search-augmented chat, and vision providers.
//!
//! All three speak the chat-completions wire format; they differ only
//! in model selection and in how message content is shaped (plain text
//! for chat, mixed text/image parts for vision).

use async_trait::async_trait;
use mamabot_core::config::AppConfig;
use mamabot_core::error::{MamabotError, Result};
use mamabot_core::provider::{ChatCompletion, VisionCompletion};
use mamabot_core::session::{ContentPart, ConversationMessage, MessageContent, MessageRole};
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use std::time::Duration;

const PROVIDER: &str = "openai";

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
}

#[derive(Serialize)]
struct WireMessage {
    role: &'static str,
    content: WireContent,
}

#[derive(Serialize)]
#[serde(untagged)]
enum WireContent {
    Text(String),
    Parts(Vec<WirePart>),
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum WirePart {
    Text { text: String },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

fn wire_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::System => "system",
        MessageRole::User => "user",
        MessageRole::Assistant => "assistant",
    }
}

/// Flattens a history message to plain text for text-only models.
fn text_message(message: &ConversationMessage) -> WireMessage {
    WireMessage {
        role: wire_role(message.role),
        content: WireContent::Text(message.content.as_text()),
    }
}

/// Preserves text/image parts for vision-capable models.
fn parts_message(message: &ConversationMessage) -> WireMessage {
    let content = match &message.content {
        MessageContent::Text(text) => WireContent::Text(text.clone()),
        MessageContent::Parts(parts) => WireContent::Parts(
            parts
                .iter()
                .map(|part| match part {
                    ContentPart::Text { text } => WirePart::Text { text: text.clone() },
                    ContentPart::Image { media_type, data } => WirePart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:{media_type};base64,{data}"),
                        },
                    },
                })
                .collect(),
        ),
    };
    WireMessage {
        role: wire_role(message.role),
        content,
    }
}

fn extract_reply(payload: &Value) -> Option<String> {
    payload
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?
        .as_str()
        .map(|s| s.to_string())
}

fn map_http_error(status: StatusCode, body: &str) -> MamabotError {
    let message = serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .and_then(|err| err.get("message"))
                .and_then(|msg| msg.as_str())
                .map(|msg| msg.to_string())
        })
        .unwrap_or_else(|| body.to_string());
    MamabotError::provider(PROVIDER, format!("{status}: {message}"))
}

/// Chat-completion client for one fixed model.
pub struct OpenAiChat {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl OpenAiChat {
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            model: model.into(),
            timeout,
        }
    }

    /// General-purpose chat completion from config.
    pub fn general(config: &AppConfig) -> Self {
        Self::new(
            &config.openai_api_key,
            &config.openai_base_url,
            &config.chat_model,
            config.request_timeout,
        )
    }

    /// Search-augmented completion from config (used for news turns).
    pub fn search(config: &AppConfig) -> Self {
        Self::new(
            &config.openai_api_key,
            &config.openai_base_url,
            &config.search_model,
            config.request_timeout,
        )
    }

    async fn dispatch(&self, request: &ChatRequest) -> Result<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .timeout(self.timeout)
            .json(request)
            .send()
            .await
            .map_err(|err| {
                MamabotError::provider(PROVIDER, format!("request failed: {err}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(map_http_error(status, &body));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|_| MamabotError::malformed_response(PROVIDER))?;

        extract_reply(&payload).ok_or_else(|| MamabotError::malformed_response(PROVIDER))
    }
}

#[async_trait]
impl ChatCompletion for OpenAiChat {
    async fn complete(&self, messages: &[ConversationMessage]) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: messages.iter().map(text_message).collect(),
        };
        tracing::debug!(model = %self.model, turns = messages.len(), "dispatching chat completion");
        self.dispatch(&request).await
    }
}

/// Vision client sending a system instruction plus one mixed-content
/// user message.
pub struct OpenAiVision {
    chat: OpenAiChat,
}

impl OpenAiVision {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            chat: OpenAiChat::new(
                &config.openai_api_key,
                &config.openai_base_url,
                &config.vision_model,
                config.request_timeout,
            ),
        }
    }
}

#[async_trait]
impl VisionCompletion for OpenAiVision {
    async fn analyze(&self, system: &str, message: &ConversationMessage) -> Result<String> {
        let request = ChatRequest {
            model: self.chat.model.clone(),
            messages: vec![
                WireMessage {
                    role: "system",
                    content: WireContent::Text(system.to_string()),
                },
                parts_message(message),
            ],
        };
        tracing::debug!(
            model = %self.chat.model,
            images = message.content.image_count(),
            "dispatching vision completion"
        );
        self.chat.dispatch(&request).await
    }
}
