//! Rodio-based audio cue adapter
//!
//! Generates and plays synthesized tones for audio feedback.

use std::time::Duration;

use async_trait::async_trait;
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};

use crate::application::ports::{AudioCue, AudioCueError, AudioCueType};

/// Audio cue implementation using rodio
pub struct RodioAudioCue;

impl RodioAudioCue {
    /// Create a new rodio-based audio cue
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioAudioCue {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCue for RodioAudioCue {
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError> {
        // Run audio playback in blocking thread to avoid blocking the async runtime
        tokio::task::spawn_blocking(move || play_cue_sync(cue_type))
            .await
            .map_err(|e| AudioCueError::PlaybackFailed(format!("Task join error: {}", e)))?
    }
}

/// Create a gentle tone with fade in/out for a smoother sound
fn gentle_tone(freq: f32, duration_ms: u64, amplitude: f32) -> impl Source<Item = f32> + Send {
    let fade_ms = (duration_ms / 5).min(30); // 20% fade or max 30ms
    SineWave::new(freq)
        .take_duration(Duration::from_millis(duration_ms))
        .fade_in(Duration::from_millis(fade_ms))
        .amplify(amplitude)
}

/// Play a cue synchronously (called from spawn_blocking)
fn play_cue_sync(cue_type: AudioCueType) -> Result<(), AudioCueError> {
    let (_stream, stream_handle) = OutputStream::try_default()
        .map_err(|e| AudioCueError::DeviceNotAvailable(e.to_string()))?;

    let sink =
        Sink::try_new(&stream_handle).map_err(|e| AudioCueError::PlaybackFailed(e.to_string()))?;

    // Softer amplitude for pleasant sound
    const AMP: f32 = 0.3;

    match cue_type {
        AudioCueType::BoundaryHit => {
            // Short flat blip: G4, the "nothing further" signal
            let tone = gentle_tone(392.0, 70, AMP * 0.8);
            sink.append(tone);
        }
        AudioCueType::Committed => {
            // Pleasant ascending chime: C5 -> E5 (major third)
            let tone1 = gentle_tone(523.0, 80, AMP);
            let tone2 = gentle_tone(659.0, 120, AMP);
            sink.append(tone1);
            sink.append(tone2);
        }
    }

    // Wait for playback to complete
    sink.sleep_until_end();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    // Note: These tests require audio hardware and may not work in CI
    // They are marked as ignored by default

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn can_play_boundary_cue() {
        let cue = RodioAudioCue::new();
        let result = cue.play(AudioCueType::BoundaryHit).await;
        assert!(result.is_ok());
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn can_play_commit_cue() {
        let cue = RodioAudioCue::new();
        let result = cue.play(AudioCueType::Committed).await;
        assert!(result.is_ok());
    }
}
