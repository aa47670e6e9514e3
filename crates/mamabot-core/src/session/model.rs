//! Session domain model.
//!
//! A session is the per-user conversational state: the active topic,
//! the system prompt it selected, and the append-only message history.
//! `messages[0]` always carries the current system prompt text.

use super::message::{ConversationMessage, MessageContent};
use crate::prompt;
use crate::topic::Topic;
use serde::{Deserialize, Serialize};

/// Per-user conversational state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Unique user identifier (the session key).
    pub user_id: String,
    /// The (category, language) pair the active prompt was selected for.
    pub topic: Topic,
    /// Current active system prompt text.
    pub system_prompt: String,
    /// Ordered conversation history; first element is the system prompt.
    pub messages: Vec<ConversationMessage>,
    /// Timestamp when the session was created (ISO 8601 format).
    pub created_at: String,
    /// Timestamp when the session was last updated (ISO 8601 format).
    pub updated_at: String,
}

impl Session {
    /// Creates a session seeded with the prompt for `topic` as the sole
    /// system message.
    pub fn new(user_id: impl Into<String>, topic: Topic) -> Self {
        let now = chrono::Utc::now().to_rfc3339();
        let system_prompt = prompt::catalog::system_prompt_for(topic).to_string();
        Self {
            user_id: user_id.into(),
            topic,
            messages: vec![ConversationMessage::system(system_prompt.clone())],
            system_prompt,
            created_at: now.clone(),
            updated_at: now,
        }
    }

    /// Appends a message and bumps `updated_at`.
    pub fn append(&mut self, message: ConversationMessage) {
        self.messages.push(message);
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// Discards all history and re-seeds with the prompt for `topic`.
    pub fn reset(&mut self, topic: Topic) {
        let system_prompt = prompt::catalog::system_prompt_for(topic).to_string();
        self.topic = topic;
        self.messages = vec![ConversationMessage::system(system_prompt.clone())];
        self.system_prompt = system_prompt;
        self.updated_at = chrono::Utc::now().to_rfc3339();
    }

    /// Checks the `messages[0] == system_prompt` invariant.
    pub fn prompt_in_sync(&self) -> bool {
        match self.messages.first() {
            Some(first) => match &first.content {
                MessageContent::Text(text) => *text == self.system_prompt,
                MessageContent::Parts(_) => false,
            },
            None => false,
        }
    }
}
