//! Prompt switcher: decides whether a topic change resets history.
//!
//! The reset decision is keyed on the explicit (category, language)
//! pair, not on prompt-string equality, so editing catalog wording
//! never invalidates live sessions.

use super::model::Session;
use crate::topic::Topic;

/// Outcome of [`ensure_prompt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptOutcome {
    /// The session already had this topic; history preserved.
    Preserved,
    /// The topic changed; history reset to the new system prompt.
    Reset,
}

/// Ensures `session` carries the system prompt for `topic`.
///
/// No-op when the session's topic already matches (idempotent after the
/// first switch). Otherwise the whole history is discarded and re-seeded
/// with the new prompt as the sole message. A fresh session created for
/// a topic is equivalent to having just been reset.
pub fn ensure_prompt(session: &mut Session, topic: Topic) -> PromptOutcome {
    if session.topic == topic {
        return PromptOutcome::Preserved;
    }

    tracing::debug!(
        user_id = %session.user_id,
        from = ?session.topic,
        to = ?topic,
        "topic changed, resetting history"
    );
    session.reset(topic);
    PromptOutcome::Reset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::message::ConversationMessage;
    use crate::topic::{Category, ChatLanguage};

    #[test]
    fn test_same_topic_preserves_history() {
        let topic = Topic::new(Category::Culture, ChatLanguage::English);
        let mut session = Session::new("u1", topic);
        session.append(ConversationMessage::user("hello"));
        session.append(ConversationMessage::assistant("hi"));

        let outcome = ensure_prompt(&mut session, topic);

        assert_eq!(outcome, PromptOutcome::Preserved);
        assert_eq!(session.messages.len(), 3);
    }

    #[test]
    fn test_repeated_calls_are_idempotent_after_reset() {
        let mut session = Session::new("u1", Topic::default());
        let topic = Topic::new(Category::Government, ChatLanguage::English);

        assert_eq!(ensure_prompt(&mut session, topic), PromptOutcome::Reset);
        session.append(ConversationMessage::user("land question"));

        assert_eq!(ensure_prompt(&mut session, topic), PromptOutcome::Preserved);
        assert_eq!(session.messages.len(), 2);
    }

    #[test]
    fn test_new_topic_resets_to_single_system_message() {
        let mut session = Session::new("u1", Topic::default());
        session.append(ConversationMessage::user("hello"));

        let topic = Topic::new(Category::Diaspora, ChatLanguage::Bangla);
        let outcome = ensure_prompt(&mut session, topic);

        assert_eq!(outcome, PromptOutcome::Reset);
        assert_eq!(session.messages.len(), 1);
        assert!(session.prompt_in_sync());
    }

    #[test]
    fn test_language_change_alone_resets() {
        let mut session = Session::new("u1", Topic::new(Category::Culture, ChatLanguage::English));
        session.append(ConversationMessage::user("hello"));

        let outcome = ensure_prompt(
            &mut session,
            Topic::new(Category::Culture, ChatLanguage::Bangla),
        );

        assert_eq!(outcome, PromptOutcome::Reset);
        assert_eq!(session.messages.len(), 1);
    }
}
