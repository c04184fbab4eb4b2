//! Playback: a controller over a pluggable audio backend.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │               PlaybackController (UI thread)                    │
//! │    Owns at most one handle, tracks is_playing, auto-advance     │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ AudioBackend / PlaybackHandle
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                 AudioEngine decoder thread                      │
//! │   Decodes, remaps and resamples, seeks, reports Failed          │
//! └────────────────────────────┬────────────────────────────────────┘
//!                              │ audio chunks + end marker
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────────┐
//! │          cpal callback: device output, position, Finished       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

mod controller;
mod decoder;
mod engine;
mod resampler;
mod state;

pub use controller::{Completion, PlaybackController, PlaybackState};
pub use engine::AudioEngine;
pub use state::{EngineEvent, HandleId, Progress};

/// Something that can open a track location for playback.
pub trait AudioBackend {
    type Handle: PlaybackHandle;

    /// Open a location. Nothing is audible until [`PlaybackHandle::start`].
    fn open(&mut self, location: &str) -> Result<Self::Handle, PlayerError>;
}

/// An opened, exclusively owned playback resource.
pub trait PlaybackHandle {
    fn id(&self) -> HandleId;
    fn start(&mut self) -> Result<(), PlayerError>;
    fn pause(&mut self) -> Result<(), PlayerError>;
    fn resume(&mut self) -> Result<(), PlayerError>;
    /// Jump to `fraction` (0.0 - 1.0) of the track.
    fn seek(&mut self, fraction: f32) -> Result<(), PlayerError>;
    /// Elapsed and total time as last reported by the output.
    fn progress(&self) -> Progress;
    /// Release the resource. Never fails.
    fn stop(&mut self);
}

/// Player errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PlayerError {
    #[error("Cannot play {location}: {reason}")]
    Resource { location: String, reason: String },

    #[error("Audio output initialization failed: {0}")]
    AudioInit(String),

    #[error("Failed to decode audio: {0}")]
    Decode(String),

    #[error("Audio channel closed")]
    ChannelClosed,

    #[error("Unsupported audio format: {0}")]
    UnsupportedFormat(String),

    #[error("File not found: {0}")]
    FileNotFound(String),
}

impl PlayerError {
    /// Attach the failing track location, unless already attached.
    pub fn for_location(self, location: &str) -> Self {
        match self {
            e @ Self::Resource { .. } => e,
            other => Self::Resource {
                location: location.to_string(),
                reason: other.to_string(),
            },
        }
    }
}
