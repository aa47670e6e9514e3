//! System prompt catalog.

pub mod catalog;

pub use catalog::system_prompt;
