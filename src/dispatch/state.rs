//! Cross-call dispatcher memory and the pure decision step.
//!
//! [`DispatcherState`] is a two-field "cooldown + last intent" machine.  There
//! is no terminal state; it lives as long as its owner.
//!
//! [`decide`] applies the dispatch rules in order, each a short-circuit:
//!
//! ```text
//! 1. inside debounce window          → Debounced
//! 2. NoHand / Unknown                → NotActionable
//! 3. non-volume label == last label  → Repeated
//! 4. no snapshot / no device         → NoActiveDevice
//! 5. label → command, skipping no-op remote calls
//!      OpenHandPlay    → Play        (AlreadyPlaying if playing)
//!      ClosedFistPause → Pause       (AlreadyPaused if paused)
//!      SkipTrack       → Next
//!      VolumeUp        → SetVolume(min(100, v + step))
//!      VolumeDown      → SetVolume(max(0, v - step))
//! ```

use std::time::{Duration, Instant};

use crate::config::DispatchConfig;
use crate::gesture::GestureLabel;
use crate::playback::PlaybackSnapshot;

use super::command::Command;

/// Minimum spacing between two issued commands.
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// Percentage points moved by one volume gesture.
pub const VOLUME_STEP: u8 = 10;

// ---------------------------------------------------------------------------
// DispatchSettings
// ---------------------------------------------------------------------------

/// Tunables for [`decide`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSettings {
    pub debounce: Duration,
    pub volume_step: u8,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            debounce: DEBOUNCE_DELAY,
            volume_step: VOLUME_STEP,
        }
    }
}

impl From<&DispatchConfig> for DispatchSettings {
    fn from(config: &DispatchConfig) -> Self {
        Self {
            debounce: config.debounce(),
            volume_step: config.volume_step,
        }
    }
}

// ---------------------------------------------------------------------------
// DispatcherState
// ---------------------------------------------------------------------------

/// Memory carried between dispatch calls.  Only a successful issue mutates it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherState {
    pub last_action: Instant,
    pub last_gesture: GestureLabel,
}

impl DispatcherState {
    /// Fresh state as of `now`: the debounce window starts running at startup.
    pub fn new(now: Instant) -> Self {
        Self {
            last_action: now,
            last_gesture: GestureLabel::NoHand,
        }
    }

    /// Remember a command that actually took effect.
    pub fn record(&mut self, label: GestureLabel, now: Instant) {
        self.last_action = now;
        self.last_gesture = label;
    }
}

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// Outcome of [`decide`].  Only `Issue` leads to a remote call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Debounced,
    NotActionable,
    Repeated,
    NoActiveDevice,
    AlreadyPlaying,
    AlreadyPaused,
    Issue { command: Command, device_id: String },
}

/// Pick at most one command for `label` given the current snapshot and state.
pub fn decide(
    label: GestureLabel,
    snapshot: Option<&PlaybackSnapshot>,
    state: &DispatcherState,
    now: Instant,
    settings: &DispatchSettings,
) -> Decision {
    if now.saturating_duration_since(state.last_action) < settings.debounce {
        return Decision::Debounced;
    }

    if !label.is_actionable() {
        return Decision::NotActionable;
    }

    if !label.is_volume() && label == state.last_gesture {
        return Decision::Repeated;
    }

    let Some((snapshot, device_id)) =
        snapshot.and_then(|s| s.device_id().map(|id| (s, id.to_string())))
    else {
        return Decision::NoActiveDevice;
    };

    let volume = snapshot.volume_percent();
    let command = match label {
        GestureLabel::OpenHandPlay if snapshot.is_playing => return Decision::AlreadyPlaying,
        GestureLabel::OpenHandPlay => Command::Play,
        GestureLabel::ClosedFistPause if !snapshot.is_playing => return Decision::AlreadyPaused,
        GestureLabel::ClosedFistPause => Command::Pause,
        GestureLabel::SkipTrack => Command::Next,
        GestureLabel::VolumeUp => {
            Command::SetVolume(volume.saturating_add(settings.volume_step).min(100))
        }
        GestureLabel::VolumeDown => Command::SetVolume(volume.saturating_sub(settings.volume_step)),
        GestureLabel::NoHand | GestureLabel::Unknown => return Decision::NotActionable,
    };

    Decision::Issue { command, device_id }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
