//! PCM audio playback for spoken replies.
//!
//! At most one playback is active at a time: starting a new one stops
//! and replaces whatever is currently playing.

use anyhow::{Context, Result};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{BufferSize, SampleRate, StreamConfig};

/// Plays raw 16-bit little-endian PCM at 44.1kHz, mono.
pub struct AudioPlayer {
    output_stream: Option<cpal::Stream>,
}

impl AudioPlayer {
    pub fn new() -> Self {
        Self {
            output_stream: None,
        }
    }

    /// Starts playback of `audio_bytes`, replacing any active playback.
    pub fn play(&mut self, audio_bytes: &[u8]) -> Result<()> {
        self.stop();

        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .context("no audio output device available")?;

        let config = StreamConfig {
            channels: 1,
            sample_rate: SampleRate(44100),
            buffer_size: BufferSize::Default,
        };

        let samples: Vec<f32> = audio_bytes
            .chunks_exact(2)
            .map(|chunk| {
                let sample = i16::from_le_bytes([chunk[0], chunk[1]]);
                sample as f32 / i16::MAX as f32
            })
            .collect();

        let mut sample_index = 0;
        let output_stream = device
            .build_output_stream(
                &config,
                move |data: &mut [f32], _| {
                    for sample in data {
                        *sample = samples.get(sample_index).copied().unwrap_or(0.0);
                        sample_index += 1;
                    }
                },
                move |err| {
                    tracing::warn!(error = %err, "audio output stream error");
                },
                None,
            )
            .context("failed to build audio output stream")?;

        output_stream
            .play()
            .context("failed to start audio playback")?;
        self.output_stream = Some(output_stream);

        Ok(())
    }

    /// Stops any active playback.
    pub fn stop(&mut self) {
        if let Some(stream) = self.output_stream.take() {
            if let Err(err) = stream.pause() {
                tracing::warn!(error = %err, "failed to pause audio stream");
            }
        }
    }
}
