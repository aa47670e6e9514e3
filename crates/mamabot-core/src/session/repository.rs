//! Session repository trait.
//!
//! Defines the interface for session persistence, decoupling the core
//! from the storage mechanism. The default backend is in-memory; a
//! durable store can be substituted without touching the gateways.

use super::model::Session;
use crate::error::Result;
use async_trait::async_trait;

/// An abstract repository for session persistence.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Finds a session by its user ID.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Session))`: Session found
    /// - `Ok(None)`: Session not found
    /// - `Err(_)`: Error occurred during retrieval
    async fn find_by_user(&self, user_id: &str) -> Result<Option<Session>>;

    /// Saves a session, overwriting any previous state for the user.
    async fn save(&self, session: &Session) -> Result<()>;

    /// Deletes a session. Deleting a missing session is not an error.
    async fn delete(&self, user_id: &str) -> Result<()>;

    /// Lists all stored sessions.
    async fn list_all(&self) -> Result<Vec<Session>>;
}
