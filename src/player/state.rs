//! Engine state, command and event types.

use std::fmt;
use std::time::Duration;

use super::decoder::AudioDecoder;

/// Identifies one opened playback resource.
///
/// Ids are never reused, so a completion event for an old handle can be
/// told apart from one for the current handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Current output status of the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackStatus {
    #[default]
    Stopped,
    Playing,
    Paused,
}

/// State shared between the UI thread, the decoder thread and the output callback.
#[derive(Debug, Clone)]
pub struct EngineShared {
    pub status: PlaybackStatus,
    /// Handle whose samples the output callback should play
    pub active: Option<HandleId>,
    /// Bumped on every seek; chunks decoded before it are stale
    pub generation: u32,
    /// Timestamp of the chunk the device is playing
    pub position: Duration,
    /// Length of the active track, zero if unknown
    pub duration: Duration,
    /// Volume level (0.0 - 1.0)
    pub volume: f32,
    /// Buffer underrun count (for diagnostics)
    pub underruns: u32,
}

impl EngineShared {
    pub fn new(volume: f32) -> Self {
        Self {
            status: PlaybackStatus::Stopped,
            active: None,
            generation: 0,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            volume: volume.clamp(0.0, 1.0),
            underruns: 0,
        }
    }
}

/// Elapsed and total time of a loaded track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Progress {
    pub position: Duration,
    pub duration: Duration,
}

impl Progress {
    pub fn new(position: Duration, duration: Duration) -> Self {
        Self { position, duration }
    }

    /// Position as a fraction (0.0 - 1.0). Zero when the length is unknown.
    pub fn fraction(&self) -> f32 {
        if self.duration.is_zero() {
            0.0
        } else {
            (self.position.as_secs_f32() / self.duration.as_secs_f32()).clamp(0.0, 1.0)
        }
    }

    pub fn position_str(&self) -> String {
        format_duration(self.position)
    }

    pub fn duration_str(&self) -> String {
        format_duration(self.duration)
    }
}

/// Format a duration as M:SS or H:MM:SS.
pub fn format_duration(d: Duration) -> String {
    let secs = d.as_secs();
    let hours = secs / 3600;
    let mins = (secs % 3600) / 60;
    let secs = secs % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, mins, secs)
    } else {
        format!("{}:{:02}", mins, secs)
    }
}

/// Commands sent to the decoder thread.
pub enum EngineCommand {
    /// Begin playing an already opened decoder
    Start(HandleId, Box<AudioDecoder>),
    Pause(HandleId),
    Resume(HandleId),
    /// Jump to a fraction (0.0 - 1.0) of the track
    Seek(HandleId, f32),
    Stop(HandleId),
    /// Shutdown the decoder thread
    Shutdown,
}

impl fmt::Debug for EngineCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Start(id, _) => write!(f, "Start({})", id),
            Self::Pause(id) => write!(f, "Pause({})", id),
            Self::Resume(id) => write!(f, "Resume({})", id),
            Self::Seek(id, fraction) => write!(f, "Seek({}, {})", id, fraction),
            Self::Stop(id) => write!(f, "Stop({})", id),
            Self::Shutdown => write!(f, "Shutdown"),
        }
    }
}

/// Notifications from the decoder thread, drained on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// The device played the track's last sample
    Finished(HandleId),
    /// Decoding failed part way through
    Failed(HandleId, String),
}
