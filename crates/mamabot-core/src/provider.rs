//! Provider boundary traits.
//!
//! The gateways talk to external services only through these traits,
//! so tests substitute stubs and production wires HTTP clients from the
//! infrastructure crate.

use crate::error::Result;
use crate::session::ConversationMessage;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A chat-completion provider: full ordered history in, one assistant
/// reply out.
///
/// Two strategies exist behind this trait: general-purpose chat and
/// search-augmented chat. The gateway selects between them by category;
/// their contract is identical.
#[async_trait]
pub trait ChatCompletion: Send + Sync {
    async fn complete(&self, messages: &[ConversationMessage]) -> Result<String>;
}

/// A vision provider: a dedicated system instruction plus one user
/// message with mixed text/image parts.
#[async_trait]
pub trait VisionCompletion: Send + Sync {
    async fn analyze(&self, system: &str, message: &ConversationMessage) -> Result<String>;
}

/// Voice-shaping parameters for speech synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoiceSettings {
    pub stability: f32,
    pub similarity_boost: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            similarity_boost: 0.8,
        }
    }
}

/// A speech synthesis provider: text in, raw audio bytes out.
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        settings: VoiceSettings,
    ) -> Result<Vec<u8>>;
}
