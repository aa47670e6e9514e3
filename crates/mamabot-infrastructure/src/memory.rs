//! In-memory session repository.
//!
//! The default backend: history lives for the process lifetime only.
//! A durable implementation can replace this behind the same trait.

use async_trait::async_trait;
use mamabot_core::error::Result;
use mamabot_core::session::{Session, SessionRepository};
use std::collections::HashMap;
use tokio::sync::RwLock;

/// Process-memory implementation of [`SessionRepository`].
#[derive(Default)]
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, Session>>,
}

impl InMemorySessionRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.get(user_id).cloned())
    }

    async fn save(&self, session: &Session) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.insert(session.user_id.clone(), session.clone());
        Ok(())
    }

    async fn delete(&self, user_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(user_id);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Session>> {
        let sessions = self.sessions.read().await;
        Ok(sessions.values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mamabot_core::session::ConversationMessage;
    use mamabot_core::topic::Topic;

    #[tokio::test]
    async fn test_save_and_find_round_trip() {
        let repo = InMemorySessionRepository::new();
        let mut session = Session::new("u1", Topic::default());
        session.append(ConversationMessage::user("hello"));

        repo.save(&session).await.unwrap();
        let loaded = repo.find_by_user("u1").await.unwrap().unwrap();

        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.user_id, "u1");
    }

    #[tokio::test]
    async fn test_find_missing_is_none() {
        let repo = InMemorySessionRepository::new();
        assert!(repo.find_by_user("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let repo = InMemorySessionRepository::new();
        repo.save(&Session::new("u1", Topic::default())).await.unwrap();

        repo.delete("u1").await.unwrap();
        repo.delete("u1").await.unwrap();

        assert!(repo.find_by_user("u1").await.unwrap().is_none());
        assert!(repo.list_all().await.unwrap().is_empty());
    }
}
