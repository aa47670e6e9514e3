//! Gateways: the request/response paths between sessions and providers.

pub mod chat;
pub mod vision;

pub use chat::{ChatGateway, FALLBACK_REPLY};
pub use vision::{ImageInput, VISION_SYSTEM_PROMPT, VisionGateway};
