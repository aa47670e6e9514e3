//! Mamabot core: per-user conversation state for a "digital uncle"
//! chatbot that fronts LLM, vision, and text-to-speech providers.
//!
//! The heart of the crate is the session layer: an append-only message
//! history per user, a prompt catalog keyed on (category, language),
//! and a switcher that resets history when that pair changes. Gateways
//! wrap provider calls so upstream failures degrade to a polite
//! fallback reply instead of corrupting session state.

pub mod config;
pub mod error;
pub mod gateway;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod topic;

pub use config::AppConfig;
pub use error::{MamabotError, Result};
