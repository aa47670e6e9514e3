//! Chat gateway: the request/response path for text turns.

use crate::error::{MamabotError, Result};
use crate::provider::ChatCompletion;
use crate::session::{ConversationMessage, SessionStore, ensure_prompt};
use crate::topic::{Category, ChatLanguage, Topic};
use std::sync::Arc;

/// The user-visible reply when a provider call fails.
pub const FALLBACK_REPLY: &str = "Sorry, there was an error processing your request.";

/// Forwards a user's text turn to the right chat provider and keeps
/// the session history consistent around the call.
///
/// Provider failures never corrupt the session: the user turn stays
/// appended, no phantom assistant turn is written, and the caller gets
/// [`FALLBACK_REPLY`] instead of the raw error.
pub struct ChatGateway {
    store: Arc<SessionStore>,
    /// General-purpose chat completion.
    chat: Arc<dyn ChatCompletion>,
    /// Search-augmented completion, used for [`Category::News`].
    search: Arc<dyn ChatCompletion>,
}

impl ChatGateway {
    pub fn new(
        store: Arc<SessionStore>,
        chat: Arc<dyn ChatCompletion>,
        search: Arc<dyn ChatCompletion>,
    ) -> Self {
        Self {
            store,
            chat,
            search,
        }
    }

    /// Sends a user turn and returns the assistant's reply text.
    ///
    /// On success the session history grows by exactly two messages
    /// (user + assistant); on provider failure by exactly one (the user
    /// turn), with [`FALLBACK_REPLY`] returned.
    ///
    /// # Errors
    ///
    /// - [`MamabotError::InvalidInput`] for blank text, before any
    ///   session mutation or provider call.
    pub async fn send(
        &self,
        user_id: &str,
        text: &str,
        category: Category,
        language: ChatLanguage,
    ) -> Result<String> {
        let text = text.trim();
        if text.is_empty() {
            return Err(MamabotError::invalid_input("message text is empty"));
        }

        let topic = Topic::new(category, language);
        let entry = self.store.get_or_create(user_id).await?;
        // Held for the whole read-modify-write so concurrent sends for
        // this user cannot interleave.
        let mut session = entry.lock().await;

        ensure_prompt(&mut session, topic);
        session.append(ConversationMessage::user(text));

        let provider = if category == Category::News {
            &self.search
        } else {
            &self.chat
        };

        let reply = match provider.complete(&session.messages).await {
            Ok(reply) if !reply.trim().is_empty() => {
                session.append(ConversationMessage::assistant(reply.clone()));
                reply
            }
            Ok(_) => {
                tracing::warn!(user_id, %category, "provider returned no usable content");
                FALLBACK_REPLY.to_string()
            }
            Err(e) => {
                tracing::warn!(user_id, %category, error = %e, "chat provider call failed");
                FALLBACK_REPLY.to_string()
            }
        };

        self.store.save(&session).await?;
        Ok(reply)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{Session, SessionRepository};
    use async_trait::async_trait;
    use std::collections::HashMap;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct MockRepository {
        sessions: Mutex<HashMap<String, Session>>,
    }

    impl MockRepository {
        fn new() -> Self {
            Self {
                sessions: Mutex::new(HashMap::new()),
            }
        }
    }

    #[async_trait]
    impl SessionRepository for MockRepository {
        async fn find_by_user(&self, user_id: &str) -> Result<Option<Session>> {
            Ok(self.sessions.lock().unwrap().get(user_id).cloned())
        }

        async fn save(&self, session: &Session) -> Result<()> {
            self.sessions
                .lock()
                .unwrap()
                .insert(session.user_id.clone(), session.clone());
            Ok(())
        }

        async fn delete(&self, user_id: &str) -> Result<()> {
            self.sessions.lock().unwrap().remove(user_id);
            Ok(())
        }

        async fn list_all(&self) -> Result<Vec<Session>> {
            Ok(self.sessions.lock().unwrap().values().cloned().collect())
        }
    }

    /// Stub provider returning a fixed reply and counting calls.
    struct StubProvider {
        reply: Result<String>,
        calls: AtomicUsize,
    }

    impl StubProvider {
        fn replying(reply: &str) -> Arc<Self> {
            Arc::new(Self {
                reply: Ok(reply.to_string()),
                calls: AtomicUsize::new(0),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                reply: Err(MamabotError::provider("stub", "connection refused")),
                calls: AtomicUsize::new(0),
            })
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl ChatCompletion for StubProvider {
        async fn complete(&self, _messages: &[ConversationMessage]) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.reply.clone()
        }
    }

    fn store() -> Arc<SessionStore> {
        Arc::new(SessionStore::new(
            Arc::new(MockRepository::new()),
            64,
            chrono::Duration::hours(1),
        ))
    }

    fn gateway(
        store: Arc<SessionStore>,
        chat: Arc<StubProvider>,
        search: Arc<StubProvider>,
    ) -> ChatGateway {
        ChatGateway::new(store, chat, search)
    }

    #[tokio::test]
    async fn test_send_appends_user_and_assistant_turns() {
        let store = store();
        let chat = StubProvider::replying("hi there");
        let gw = gateway(store.clone(), chat.clone(), StubProvider::replying("news"));

        let reply = gw
            .send("u1", "hello", Category::Culture, ChatLanguage::English)
            .await
            .unwrap();

        assert_eq!(reply, "hi there");
        let entry = store.find("u1").await.unwrap();
        let session = entry.lock().await;
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.messages[1].content.as_text(), "hello");
        assert_eq!(session.messages[2].content.as_text(), "hi there");
    }

    #[tokio::test]
    async fn test_category_switch_resets_history() {
        let store = store();
        let gw = gateway(
            store.clone(),
            StubProvider::replying("reply"),
            StubProvider::replying("news"),
        );

        gw.send("u1", "hello", Category::Culture, ChatLanguage::English)
            .await
            .unwrap();
        gw.send(
            "u1",
            "What about land law?",
            Category::Government,
            ChatLanguage::English,
        )
        .await
        .unwrap();

        let entry = store.find("u1").await.unwrap();
        let session = entry.lock().await;
        // New system prompt, user turn, assistant turn. Not 5.
        assert_eq!(session.messages.len(), 3);
        assert_eq!(session.topic.category, Category::Government);
        assert!(session.prompt_in_sync());
    }

    #[tokio::test]
    async fn test_provider_failure_keeps_user_turn_and_returns_fallback() {
        let store = store();
        let gw = gateway(
            store.clone(),
            StubProvider::failing(),
            StubProvider::replying("news"),
        );

        let reply = gw
            .send("u1", "hello", Category::Culture, ChatLanguage::English)
            .await
            .unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
        let entry = store.find("u1").await.unwrap();
        let session = entry.lock().await;
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[1].role, crate::session::MessageRole::User);
    }

    #[tokio::test]
    async fn test_empty_reply_is_treated_as_failure() {
        let store = store();
        let gw = gateway(
            store.clone(),
            StubProvider::replying("   "),
            StubProvider::replying("news"),
        );

        let reply = gw
            .send("u1", "hello", Category::Culture, ChatLanguage::English)
            .await
            .unwrap();

        assert_eq!(reply, FALLBACK_REPLY);
        let entry = store.find("u1").await.unwrap();
        assert_eq!(entry.lock().await.messages.len(), 2);
    }

    #[tokio::test]
    async fn test_blank_input_rejected_without_any_call() {
        let store = store();
        let chat = StubProvider::replying("reply");
        let gw = gateway(store.clone(), chat.clone(), StubProvider::replying("news"));

        let err = gw
            .send("u1", "   ", Category::Culture, ChatLanguage::English)
            .await
            .unwrap_err();

        assert!(err.is_invalid_input());
        assert_eq!(chat.call_count(), 0);
        // No session was created either.
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_news_category_uses_search_provider() {
        let store = store();
        let chat = StubProvider::replying("chat");
        let search = StubProvider::replying("search result");
        let gw = gateway(store, chat.clone(), search.clone());

        let reply = gw
            .send("u1", "any flooding today?", Category::News, ChatLanguage::English)
            .await
            .unwrap();

        assert_eq!(reply, "search result");
        assert_eq!(chat.call_count(), 0);
        assert_eq!(search.call_count(), 1);
    }

    #[tokio::test]
    async fn test_concurrent_users_do_not_interleave() {
        let store = store();
        let gw = Arc::new(gateway(
            store.clone(),
            StubProvider::replying("reply"),
            StubProvider::replying("news"),
        ));

        let mut handles = Vec::new();
        for (user, text) in [("a", "from a"), ("b", "from b")] {
            for i in 0..5 {
                let gw = gw.clone();
                let text = format!("{text} {i}");
                handles.push(tokio::spawn(async move {
                    gw.send(user, &text, Category::Culture, ChatLanguage::English)
                        .await
                        .unwrap();
                }));
            }
        }
        for handle in handles {
            handle.await.unwrap();
        }

        for user in ["a", "b"] {
            let entry = store.find(user).await.unwrap();
            let session = entry.lock().await;
            // 1 system + 5 * (user + assistant), nothing from the other user.
            assert_eq!(session.messages.len(), 11);
            for message in &session.messages[1..] {
                let text = message.content.as_text();
                assert!(
                    text == "reply" || text.starts_with(&format!("from {user}")),
                    "foreign turn in {user}'s history: {text}"
                );
            }
        }
    }
}
