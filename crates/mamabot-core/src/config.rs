//! Application configuration.
//!
//! Provider keys and tunables come from the environment. Missing
//! required values are a startup [`MamabotError::Config`] error; the
//! gateways never discover a missing key mid-conversation.

use crate::error::{MamabotError, Result};
use std::collections::HashMap;
use std::time::Duration;

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_ELEVENLABS_BASE_URL: &str = "https://api.elevenlabs.io/v1";
const DEFAULT_VOICE_ID: &str = "pNInz6obpgDQGcFmaJgB";
const DEFAULT_CHAT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_SEARCH_MODEL: &str = "gpt-4o-search-preview";
const DEFAULT_VISION_MODEL: &str = "gpt-4o";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;
const DEFAULT_SESSION_CAPACITY: usize = 1024;
const DEFAULT_SESSION_IDLE_TTL_SECS: i64 = 60 * 60 * 24;

/// Validated runtime configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: String,
    pub elevenlabs_api_key: String,
    pub openai_base_url: String,
    pub elevenlabs_base_url: String,
    pub voice_id: String,
    pub chat_model: String,
    pub search_model: String,
    pub vision_model: String,
    pub request_timeout: Duration,
    pub session_capacity: usize,
    pub session_idle_ttl: chrono::Duration,
}

impl AppConfig {
    /// Loads configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        Self::from_vars(&vars)
    }

    /// Loads configuration from an explicit variable map.
    pub fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let required = |key: &str| -> Result<String> {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| MamabotError::config(format!("{key} is not set")))
        };
        let optional = |key: &str, default: &str| -> String {
            vars.get(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let timeout_secs = match vars.get("MAMABOT_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                MamabotError::config("MAMABOT_REQUEST_TIMEOUT_SECS must be an integer")
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        let capacity = match vars.get("MAMABOT_SESSION_CAPACITY") {
            Some(raw) => raw.trim().parse::<usize>().map_err(|_| {
                MamabotError::config("MAMABOT_SESSION_CAPACITY must be an integer")
            })?,
            None => DEFAULT_SESSION_CAPACITY,
        };
        let idle_ttl_secs = match vars.get("MAMABOT_SESSION_IDLE_TTL_SECS") {
            Some(raw) => raw.trim().parse::<i64>().map_err(|_| {
                MamabotError::config("MAMABOT_SESSION_IDLE_TTL_SECS must be an integer")
            })?,
            None => DEFAULT_SESSION_IDLE_TTL_SECS,
        };

        Ok(Self {
            openai_api_key: required("OPENAI_API_KEY")?,
            elevenlabs_api_key: required("ELEVENLABS_API_KEY")?,
            openai_base_url: optional("MAMABOT_OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL),
            elevenlabs_base_url: optional(
                "MAMABOT_ELEVENLABS_BASE_URL",
                DEFAULT_ELEVENLABS_BASE_URL,
            ),
            voice_id: optional("MAMABOT_VOICE_ID", DEFAULT_VOICE_ID),
            chat_model: optional("MAMABOT_CHAT_MODEL", DEFAULT_CHAT_MODEL),
            search_model: optional("MAMABOT_SEARCH_MODEL", DEFAULT_SEARCH_MODEL),
            vision_model: optional("MAMABOT_VISION_MODEL", DEFAULT_VISION_MODEL),
            request_timeout: Duration::from_secs(timeout_secs),
            session_capacity: capacity,
            session_idle_ttl: chrono::Duration::seconds(idle_ttl_secs),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_vars() -> HashMap<String, String> {
        HashMap::from([
            ("OPENAI_API_KEY".to_string(), "sk-test".to_string()),
            ("ELEVENLABS_API_KEY".to_string(), "el-test".to_string()),
        ])
    }

    #[test]
    fn test_defaults_applied() {
        let config = AppConfig::from_vars(&base_vars()).unwrap();

        assert_eq!(config.openai_base_url, DEFAULT_OPENAI_BASE_URL);
        assert_eq!(config.voice_id, DEFAULT_VOICE_ID);
        assert_eq!(config.request_timeout, Duration::from_secs(60));
        assert_eq!(config.session_capacity, DEFAULT_SESSION_CAPACITY);
    }

    #[test]
    fn test_missing_key_is_config_error() {
        let mut vars = base_vars();
        vars.remove("OPENAI_API_KEY");

        let err = AppConfig::from_vars(&vars).unwrap_err();
        assert!(matches!(err, MamabotError::Config(_)));
    }

    #[test]
    fn test_blank_key_is_config_error() {
        let mut vars = base_vars();
        vars.insert("ELEVENLABS_API_KEY".to_string(), "   ".to_string());

        let err = AppConfig::from_vars(&vars).unwrap_err();
        assert!(matches!(err, MamabotError::Config(_)));
    }

    #[test]
    fn test_bad_timeout_is_config_error() {
        let mut vars = base_vars();
        vars.insert(
            "MAMABOT_REQUEST_TIMEOUT_SECS".to_string(),
            "soon".to_string(),
        );

        let err = AppConfig::from_vars(&vars).unwrap_err();
        assert!(matches!(err, MamabotError::Config(_)));
    }
}
