//! Session-owned audio resources.
//!
//! Each session owns at most one audio handle, injected at construction
//! and released exactly once on teardown. Handles are never shared between
//! sessions.

/// Error starting audio playback.
///
/// Playback failure never fails a state transition; the machine logs it
/// and continues. The music is best-effort.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Audio playback failed: {0}")]
pub struct AudioError(pub String);

/// A playable audio resource owned by a single session.
pub trait AudioHandle: Send + Sync {
    /// Rewind to time zero and start playback.
    fn play_from_start(&mut self) -> Result<(), AudioError>;

    /// Pause playback, keeping the current position.
    fn pause(&mut self);

    /// Whether the resource is currently playing.
    fn is_playing(&self) -> bool;
}

/// Standard handle for a theme's looping music track.
///
/// Bookkeeps play state for the session machine and for state snapshots;
/// actual audio output belongs to the embedding shell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeAudio {
    track_url: String,
    playing: bool,
}

impl ThemeAudio {
    pub fn new(track_url: impl Into<String>) -> Self {
        Self {
            track_url: track_url.into(),
            playing: false,
        }
    }

    pub fn track_url(&self) -> &str {
        &self.track_url
    }
}

impl AudioHandle for ThemeAudio {
    fn play_from_start(&mut self) -> Result<(), AudioError> {
        self.playing = true;
        Ok(())
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn is_playing(&self) -> bool {
        self.playing
    }
}
