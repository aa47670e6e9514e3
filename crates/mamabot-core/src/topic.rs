//! Topic axes: conversation category and reply language.
//!
//! A [`Topic`] is the (category, language) pair that selects the active
//! system prompt. Prompt resets are keyed on this pair, never on the
//! prompt text itself, so catalog wording changes do not invalidate
//! live sessions.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Conversation category selecting the uncle's persona.
///
/// Parsing is total: unknown category strings fall back to
/// [`Category::Culture`], the documented default.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Category {
    /// Sylheti culture, traditions, food, festivals, history. Default.
    Culture,
    /// Bangladesh government procedures, land laws, documentation.
    Government,
    /// Diaspora life: immigration, identity, remittances.
    Diaspora,
    /// Sylheti language learning: vocabulary, idioms, pronunciation.
    Language,
    /// School homework help for diaspora children.
    Homework,
    /// Current affairs; answered through the search-augmented provider.
    News,
}

impl Default for Category {
    fn default() -> Self {
        Category::Culture
    }
}

impl Category {
    /// Parses a category label, falling back to the default for
    /// unknown input.
    pub fn parse_or_default(label: &str) -> Self {
        label.trim().parse().unwrap_or_default()
    }
}

/// Language the uncle should lean towards when replying.
///
/// Unknown or unspecified input falls back to [`ChatLanguage::English`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ChatLanguage {
    /// English with natural Sylheti/Bengali phrases mixed in.
    English,
    /// Primarily Bengali/Sylheti replies.
    #[strum(to_string = "bangla", serialize = "bangladesh", serialize = "bn")]
    Bangla,
}

impl Default for ChatLanguage {
    fn default() -> Self {
        ChatLanguage::English
    }
}

impl ChatLanguage {
    /// Parses a language label, falling back to the default for
    /// unknown or absent input.
    pub fn parse_or_default(label: Option<&str>) -> Self {
        label
            .and_then(|l| l.trim().parse().ok())
            .unwrap_or_default()
    }
}

/// The (category, language) pair that identifies an active prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Topic {
    pub category: Category,
    pub language: ChatLanguage,
}

impl Topic {
    pub fn new(category: Category, language: ChatLanguage) -> Self {
        Self { category, language }
    }

    /// Builds a topic from raw request labels with default fallbacks.
    pub fn from_labels(category: &str, language: Option<&str>) -> Self {
        Self {
            category: Category::parse_or_default(category),
            language: ChatLanguage::parse_or_default(language),
        }
    }
}
