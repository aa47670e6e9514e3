//! ElevenLabs speech synthesis client.

use async_trait::async_trait;
use mamabot_core::config::AppConfig;
use mamabot_core::error::{MamabotError, Result};
use mamabot_core::provider::{SpeechSynthesizer, VoiceSettings};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;

const PROVIDER: &str = "elevenlabs";
const MODEL_ID: &str = "eleven_multilingual_v2";

/// Raw 16-bit PCM at 44.1kHz, playable without a decoder.
const OUTPUT_FORMAT: &str = "pcm_44100";

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: VoiceSettings,
}

/// Text-to-speech over the ElevenLabs HTTP API.
pub struct ElevenLabsSpeech {
    client: Client,
    api_key: String,
    base_url: String,
    timeout: Duration,
}

impl ElevenLabsSpeech {
    pub fn new(api_key: impl Into<String>, base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: base_url.into(),
            timeout,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            &config.elevenlabs_api_key,
            &config.elevenlabs_base_url,
            config.request_timeout,
        )
    }
}

#[async_trait]
impl SpeechSynthesizer for ElevenLabsSpeech {
    async fn synthesize(
        &self,
        text: &str,
        voice_id: &str,
        settings: VoiceSettings,
    ) -> Result<Vec<u8>> {
        let url = format!(
            "{}/text-to-speech/{voice_id}?output_format={OUTPUT_FORMAT}",
            self.base_url
        );
        let body = SpeechRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: settings,
        };

        tracing::debug!(voice_id, chars = text.len(), "dispatching speech synthesis");
        let response = self
            .client
            .post(&url)
            .header("xi-api-key", &self.api_key)
            .timeout(self.timeout)
            .json(&body)
            .send()
            .await
            .map_err(|err| MamabotError::provider(PROVIDER, format!("request failed: {err}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "failed to read error body".to_string());
            return Err(MamabotError::provider(PROVIDER, format!("{status}: {body}")));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|_| MamabotError::malformed_response(PROVIDER))?;
        if audio.is_empty() {
            return Err(MamabotError::malformed_response(PROVIDER));
        }
        Ok(audio.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_speech_request_wire_shape() {
        let body = SpeechRequest {
            text: "Assalamu Alaikum",
            model_id: MODEL_ID,
            voice_settings: VoiceSettings::default(),
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["text"], "Assalamu Alaikum");
        assert_eq!(value["model_id"], "eleven_multilingual_v2");
        let stability = value["voice_settings"]["stability"].as_f64().unwrap();
        let similarity = value["voice_settings"]["similarity_boost"].as_f64().unwrap();
        assert!((stability - 0.5).abs() < 1e-6);
        assert!((similarity - 0.8).abs() < 1e-6);
    }
}
