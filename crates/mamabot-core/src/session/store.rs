//! Process-wide session store.
//!
//! Maps user IDs to live sessions and serialises read-modify-write per
//! user: each session sits behind its own `Mutex`, so two concurrent
//! requests for the same user queue up instead of interleaving appends,
//! while requests for different users proceed independently.
//!
//! Sessions are bounded in two ways so process lifetime no longer
//! equals session lifetime: a capacity cap enforced on insert, and an
//! idle TTL sweep ([`SessionStore::evict_idle`]).

use super::model::Session;
use super::repository::SessionRepository;
use crate::error::{MamabotError, Result};
use crate::session::message::ConversationMessage;
use crate::topic::Topic;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

/// Shared mutable session state behind per-user locks.
pub struct SessionStore {
    /// In-memory session map; one lock per session.
    sessions: RwLock<HashMap<String, Arc<Mutex<Session>>>>,
    /// Persistence backend.
    repository: Arc<dyn SessionRepository>,
    /// Maximum number of live sessions kept in memory.
    capacity: usize,
    /// Sessions idle longer than this are eligible for eviction.
    idle_ttl: chrono::Duration,
}

impl SessionStore {
    pub fn new(
        repository: Arc<dyn SessionRepository>,
        capacity: usize,
        idle_ttl: chrono::Duration,
    ) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            repository,
            capacity,
            idle_ttl,
        }
    }

    /// Returns the existing session for `user_id`, or creates one
    /// seeded with the default topic's system prompt.
    ///
    /// The returned handle is the per-user lock; callers hold it across
    /// their whole read-modify-write sequence.
    pub async fn get_or_create(&self, user_id: &str) -> Result<Arc<Mutex<Session>>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(entry) = sessions.get(user_id) {
                return Ok(entry.clone());
            }
        }

        let mut sessions = self.sessions.write().await;
        // Double-check after re-acquiring as writer.
        if let Some(entry) = sessions.get(user_id) {
            return Ok(entry.clone());
        }

        if sessions.len() >= self.capacity {
            self.evict_one(&mut sessions).await;
        }

        let session = match self.repository.find_by_user(user_id).await? {
            Some(session) => session,
            None => {
                let session = Session::new(user_id, Topic::default());
                self.repository.save(&session).await?;
                tracing::debug!(user_id, "created new session");
                session
            }
        };

        let entry = Arc::new(Mutex::new(session));
        sessions.insert(user_id.to_string(), entry.clone());
        Ok(entry)
    }

    /// Returns the session for `user_id`, or `SessionNotFound`.
    pub async fn find(&self, user_id: &str) -> Result<Arc<Mutex<Session>>> {
        {
            let sessions = self.sessions.read().await;
            if let Some(entry) = sessions.get(user_id) {
                return Ok(entry.clone());
            }
        }

        let session = self
            .repository
            .find_by_user(user_id)
            .await?
            .ok_or_else(|| MamabotError::session_not_found(user_id))?;

        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(session)))
            .clone();
        Ok(entry)
    }

    /// Overwrites the topic, system prompt, and message history of an
    /// existing session.
    ///
    /// An unknown user is an explicit
    /// [`MamabotError::SessionNotFound`], never a silent no-op.
    pub async fn replace(
        &self,
        user_id: &str,
        messages: Vec<ConversationMessage>,
        topic: Topic,
    ) -> Result<()> {
        let entry = self.find(user_id).await?;
        let mut session = entry.lock().await;
        session.topic = topic;
        session.system_prompt = crate::prompt::catalog::system_prompt_for(topic).to_string();
        session.messages = messages;
        session.updated_at = chrono::Utc::now().to_rfc3339();
        self.repository.save(&session).await
    }

    /// Persists a session snapshot to the repository.
    pub async fn save(&self, session: &Session) -> Result<()> {
        self.repository.save(session).await
    }

    /// Removes a session from memory and storage.
    pub async fn remove(&self, user_id: &str) -> Result<()> {
        let mut sessions = self.sessions.write().await;
        sessions.remove(user_id);
        drop(sessions);
        self.repository.delete(user_id).await
    }

    /// Evicts every session idle longer than the store's TTL.
    ///
    /// Returns the number of sessions evicted. Sessions currently in
    /// use (lock held) are skipped.
    pub async fn evict_idle(&self) -> usize {
        let cutoff = chrono::Utc::now() - self.idle_ttl;
        let mut evicted = Vec::new();

        {
            let sessions = self.sessions.read().await;
            for (user_id, entry) in sessions.iter() {
                let Ok(session) = entry.try_lock() else {
                    continue;
                };
                if let Ok(updated) = chrono::DateTime::parse_from_rfc3339(&session.updated_at) {
                    if updated.with_timezone(&chrono::Utc) < cutoff {
                        evicted.push(user_id.clone());
                    }
                }
            }
        }

        let mut sessions = self.sessions.write().await;
        for user_id in &evicted {
            sessions.remove(user_id);
            if let Err(e) = self.repository.delete(user_id).await {
                tracing::warn!(user_id, error = %e, "failed to delete evicted session");
            }
        }

        if !evicted.is_empty() {
            tracing::info!(count = evicted.len(), "evicted idle sessions");
        }
        evicted.len()
    }

    /// Number of sessions currently live in memory.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }

    /// Evicts the least recently updated idle entry to make room.
    async fn evict_one(&self, sessions: &mut HashMap<String, Arc<Mutex<Session>>>) {
        let mut oldest: Option<(String, chrono::DateTime<chrono::Utc>)> = None;
        for (user_id, entry) in sessions.iter() {
            let Ok(session) = entry.try_lock() else {
                continue;
            };
            let Ok(updated) = chrono::DateTime::parse_from_rfc3339(&session.updated_at) else {
                continue;
            };
            let updated = updated.with_timezone(&chrono::Utc);
            if oldest.as_ref().is_none_or(|(_, ts)| updated < *ts) {
                oldest = Some((user_id.clone(), updated));
            }
        }

        if let Some((user_id, _)) = oldest {
            sessions.remove(&user_id);
            if let Err(e) = self.repository.delete(&user_id).await {
                tracing::warn!(user_id, error = %e, "failed to delete evicted session");
            }
            tracing::debug!(user_id, "evicted session at capacity");
        }
    }
}
