//! Error types for the Mamabot application.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Mamabot application.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum MamabotError {
    /// No session exists for the given user.
    ///
    /// Update paths surface this explicitly instead of silently
    /// no-opping on an unknown user.
    #[error("Session not found for user '{user_id}'")]
    SessionNotFound { user_id: String },

    /// Upstream provider failure (network, timeout, 4xx/5xx).
    #[error("Provider error from {provider}: {message}")]
    Provider { provider: String, message: String },

    /// Provider responded but carried no usable content.
    #[error("Malformed response from {provider}")]
    MalformedResponse { provider: String },

    /// Input rejected before any session mutation or provider call.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error (missing keys, bad values at startup)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl MamabotError {
    /// Creates a SessionNotFound error
    pub fn session_not_found(user_id: impl Into<String>) -> Self {
        Self::SessionNotFound {
            user_id: user_id.into(),
        }
    }

    /// Creates a Provider error
    pub fn provider(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Provider {
            provider: provider.into(),
            message: message.into(),
        }
    }

    /// Creates a MalformedResponse error
    pub fn malformed_response(provider: impl Into<String>) -> Self {
        Self::MalformedResponse {
            provider: provider.into(),
        }
    }

    /// Creates an InvalidInput error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    /// Check if this is a SessionNotFound error
    pub fn is_session_not_found(&self) -> bool {
        matches!(self, Self::SessionNotFound { .. })
    }

    /// Check if this error originated at a provider boundary.
    ///
    /// Returns true for both transport failures and responses with
    /// no usable content, which the gateways recover identically.
    pub fn is_provider_failure(&self) -> bool {
        matches!(self, Self::Provider { .. } | Self::MalformedResponse { .. })
    }

    /// Check if this is an InvalidInput error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

impl From<serde_json::Error> for MamabotError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<anyhow::Error> for MamabotError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, MamabotError>`.
pub type Result<T> = std::result::Result<T, MamabotError>;
