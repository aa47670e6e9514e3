//! Provider and storage implementations for Mamabot.

pub mod elevenlabs;
pub mod memory;
pub mod openai;

pub use elevenlabs::ElevenLabsSpeech;
pub use memory::InMemorySessionRepository;
pub use openai::{OpenAiChat, OpenAiVision};
