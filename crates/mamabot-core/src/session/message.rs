//! Conversation message types.
//!
//! Messages are immutable once appended to a session; the only way
//! history ever shrinks is a full reset on a topic switch.

use serde::{Deserialize, Serialize};

/// Represents the role of a message in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System prompt defining the uncle's persona.
    System,
    /// Message from the user.
    User,
    /// Message from the AI assistant.
    Assistant,
}

/// One part of a mixed text/image message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentPart {
    Text { text: String },
    /// Base64-encoded image data tagged with its media type.
    Image { media_type: String, data: String },
}

/// Message content: plain text, or an ordered sequence of parts for
/// vision turns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    Text(String),
    Parts(Vec<ContentPart>),
}

impl MessageContent {
    /// Returns the textual portion of the content.
    ///
    /// Image parts contribute a placeholder so a text-only provider
    /// still sees that an attachment was present.
    pub fn as_text(&self) -> String {
        match self {
            MessageContent::Text(text) => text.clone(),
            MessageContent::Parts(parts) => {
                let mut pieces = Vec::new();
                for part in parts {
                    match part {
                        ContentPart::Text { text } => pieces.push(text.clone()),
                        ContentPart::Image { .. } => pieces.push("[image attached]".to_string()),
                    }
                }
                pieces.join("\n")
            }
        }
    }

    /// Number of image parts in the content.
    pub fn image_count(&self) -> usize {
        match self {
            MessageContent::Text(_) => 0,
            MessageContent::Parts(parts) => parts
                .iter()
                .filter(|p| matches!(p, ContentPart::Image { .. }))
                .count(),
        }
    }
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// The role of the message sender.
    pub role: MessageRole,
    /// The content of the message.
    pub content: MessageContent,
    /// Timestamp when the message was created (ISO 8601 format).
    pub timestamp: String,
}

impl ConversationMessage {
    fn now() -> String {
        chrono::Utc::now().to_rfc3339()
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: MessageContent::Text(text.into()),
            timestamp: Self::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Text(text.into()),
            timestamp: Self::now(),
        }
    }

    /// A user message carrying mixed text/image parts.
    pub fn user_parts(parts: Vec<ContentPart>) -> Self {
        Self {
            role: MessageRole::User,
            content: MessageContent::Parts(parts),
            timestamp: Self::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: MessageContent::Text(text.into()),
            timestamp: Self::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text_flattens_parts() {
        let content = MessageContent::Parts(vec![
            ContentPart::Text {
                text: "what is this?".to_string(),
            },
            ContentPart::Image {
                media_type: "image/png".to_string(),
                data: "aGVsbG8=".to_string(),
            },
        ]);
        assert_eq!(content.as_text(), "what is this?\n[image attached]");
        assert_eq!(content.image_count(), 1);
    }

    #[test]
    fn test_constructors_set_roles() {
        assert_eq!(ConversationMessage::system("s").role, MessageRole::System);
        assert_eq!(ConversationMessage::user("u").role, MessageRole::User);
        assert_eq!(
            ConversationMessage::assistant("a").role,
            MessageRole::Assistant
        );
    }
}
