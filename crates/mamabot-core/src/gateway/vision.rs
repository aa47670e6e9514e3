//! Vision gateway: text turns carrying images.

use super::chat::FALLBACK_REPLY;
use crate::error::{MamabotError, Result};
use crate::provider::VisionCompletion;
use crate::session::{ContentPart, ConversationMessage, SessionStore, ensure_prompt};
use crate::topic::{Category, ChatLanguage, Topic};
use base64::Engine;
use base64::prelude::BASE64_STANDARD;
use std::sync::Arc;

/// System instruction sent with every vision request.
///
/// Vision turns always use this fixed instruction rather than the
/// session's own category prompt: image analysis needs consistent
/// behaviour regardless of which persona is active, and the analysed
/// turn still lands in the session history under the active topic.
pub const VISION_SYSTEM_PROMPT: &str = "You are a warm Sylheti uncle (mama) helping family members understand images they share - documents, land papers, photos, homework, screenshots. Describe what you see clearly and answer the user's question about it, mixing English with natural Sylheti/Bengali phrases.";

/// A decoded image handed to the gateway by a capture collaborator.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    /// Media type such as `image/png` or `image/jpeg`.
    pub media_type: String,
}

/// Variant of the chat gateway for turns that carry images.
///
/// The user message content is an optional text part followed by one
/// base64 image part per input. Language is fixed to the default for
/// vision turns.
pub struct VisionGateway {
    store: Arc<SessionStore>,
    vision: Arc<dyn VisionCompletion>,
}

impl VisionGateway {
    pub fn new(store: Arc<SessionStore>, vision: Arc<dyn VisionCompletion>) -> Self {
        Self { store, vision }
    }

    /// Sends a user turn with images and returns the assistant's reply.
    ///
    /// Same lifecycle and failure contract as the chat gateway: the
    /// user turn survives a provider failure, and [`FALLBACK_REPLY`]
    /// is returned instead of the raw error.
    ///
    /// # Errors
    ///
    /// - [`MamabotError::InvalidInput`] when there is no text and no
    ///   image, before any session mutation or provider call.
    pub async fn send_with_images(
        &self,
        user_id: &str,
        images: Vec<ImageInput>,
        category: Category,
        text: Option<&str>,
    ) -> Result<String> {
        let text = text.map(str::trim).filter(|t| !t.is_empty());
        if text.is_none() && images.is_empty() {
            return Err(MamabotError::invalid_input("no text and no images"));
        }

        let mut parts = Vec::with_capacity(images.len() + 1);
        if let Some(text) = text {
            parts.push(ContentPart::Text {
                text: text.to_string(),
            });
        }
        for image in &images {
            parts.push(ContentPart::Image {
                media_type: image.media_type.clone(),
                data: BASE64_STANDARD.encode(&image.bytes),
            });
        }
        let user_message = ConversationMessage::user_parts(parts);

        let topic = Topic::new(category, ChatLanguage::default());
        let entry = self.store.get_or_create(user_id).await?;
        let mut session = entry.lock().await;

        ensure_prompt(&mut session, topic);
        session.append(user_message.clone());

        let reply = match self.vision.analyze(VISION_SYSTEM_PROMPT, &user_message).await {
            Ok(reply) if !reply.trim().is_empty() => {
                session.append(ConversationMessage::assistant(reply.clone()));
                reply
            }
            Ok(_) => {
                tracing::warn!(user_id, "vision provider returned no usable content");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "vision provider call failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.store.save(&session).await?;
        Ok(reply)
    }
}
