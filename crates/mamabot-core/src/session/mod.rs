//! Session management: models, storage, and prompt switching.

pub mod message;
pub mod model;
pub mod repository;
pub mod store;
pub mod switcher;

pub use message::{ContentPart, ConversationMessage, MessageContent, MessageRole};
pub use model::Session;
pub use repository::SessionRepository;
pub use store::SessionStore;
pub use switcher::{PromptOutcome, ensure_prompt};
