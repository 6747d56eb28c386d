//! Audio cue port for playing sound feedback
//!
//! Provides audible feedback while browsing the history.

use async_trait::async_trait;
use thiserror::Error;

/// Types of audio cues that can be played
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioCueType {
    /// Short beep when navigation is already at the first/last entry
    /// (boundary hit is a signal, not an error)
    BoundaryHit,
    /// Confirmation blip when a selection is committed back to the
    /// clipboard
    Committed,
}

/// Errors that can occur during audio cue playback
#[derive(Error, Debug)]
pub enum AudioCueError {
    /// Failed to play the audio cue
    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    /// No audio output device available
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),
}

/// Port trait for audio cue playback
#[async_trait]
pub trait AudioCue: Send + Sync {
    /// Play an audio cue
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError>;
}

/// Blanket implementation for boxed audio cue types
#[async_trait]
impl AudioCue for Box<dyn AudioCue> {
    async fn play(&self, cue_type: AudioCueType) -> Result<(), AudioCueError> {
        self.as_ref().play(cue_type).await
    }
}
