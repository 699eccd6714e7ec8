//! Per-frame reports and shared controller status.
//!
//! [`FrameReport`] is what the outside world sees for each processed frame:
//! the recognised gesture, the command it caused (if any) and the playback
//! state read just before dispatch.
//!
//! [`SharedStatus`] is a type alias for `Arc<Mutex<ControllerStatus>>`.

use std::sync::{Arc, Mutex};

use serde::Serialize;

use crate::dispatch::Command;
use crate::gesture::GestureLabel;
use crate::playback::PlaybackSnapshot;

// ---------------------------------------------------------------------------
// FrameReport
// ---------------------------------------------------------------------------

/// Playback status as shown in a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum PlaybackStatus {
    Playing,
    Paused,
    /// The playback state could not be read this frame.
    Error,
}

/// Result of processing one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrameReport {
    pub gesture: GestureLabel,
    /// Command that took effect this frame.
    pub command: Option<Command>,
    pub current_track: String,
    pub playback_status: PlaybackStatus,
    pub volume: u8,
}

impl FrameReport {
    /// Report built from a successfully read snapshot (`None` = nothing active).
    pub fn new(
        gesture: GestureLabel,
        command: Option<Command>,
        snapshot: Option<&PlaybackSnapshot>,
    ) -> Self {
        let track = snapshot.and_then(|s| s.track.as_ref());
        match (snapshot, track) {
            (Some(snap), Some(track)) => Self {
                gesture,
                command,
                current_track: track.display(),
                playback_status: if snap.is_playing {
                    PlaybackStatus::Playing
                } else {
                    PlaybackStatus::Paused
                },
                volume: snap.volume_percent(),
            },
            _ => Self {
                gesture,
                command,
                current_track: "No Active Track".into(),
                playback_status: PlaybackStatus::Paused,
                volume: 0,
            },
        }
    }

    /// Report for a frame whose snapshot read failed.
    pub fn read_failed(gesture: GestureLabel) -> Self {
        Self {
            gesture,
            command: None,
            current_track: "Error".into(),
            playback_status: PlaybackStatus::Error,
            volume: 0,
        }
    }
}

// ---------------------------------------------------------------------------
// ControllerStatus
// ---------------------------------------------------------------------------

/// Running totals and the most recent outcome.
#[derive(Debug, Clone, Default)]
pub struct ControllerStatus {
    pub frames_processed: u64,
    pub commands_issued: u64,
    pub last_gesture: GestureLabel,
    pub last_command: Option<Command>,
    /// Most recent playback read failure, cleared by the next good read.
    pub last_error: Option<String>,
}

/// Thread-safe handle to [`ControllerStatus`].
///
/// Lock for a short critical section; do **not** hold the lock across
/// `.await` points.
pub type SharedStatus = Arc<Mutex<ControllerStatus>>;

pub fn new_shared_status() -> SharedStatus {
    Arc::new(Mutex::new(ControllerStatus::default()))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
