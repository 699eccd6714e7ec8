//! Command issuance on top of [`decide`].
//!
//! [`dispatch`] runs one decide → issue → record cycle against a
//! caller-owned [`DispatcherState`].  [`Dispatcher`] wraps that state in a
//! `tokio::sync::Mutex` so racing callers are serialised over the whole cycle.
//! The playback snapshot is read by the caller **before** locking, so the lock
//! only spans the command call itself.
//!
//! Playback failures never escape: they are logged, the state is left alone and
//! the call reports "no command".

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;

use crate::gesture::GestureLabel;
use crate::playback::{PlaybackClient, PlaybackError, PlaybackSnapshot};

use super::command::Command;
use super::state::{decide, Decision, DispatchSettings, DispatcherState};

/// Send `command` to the device.
async fn issue(
    client: &dyn PlaybackClient,
    command: Command,
    device_id: &str,
) -> Result<(), PlaybackError> {
    match command {
        Command::Play => client.play(device_id).await,
        Command::Pause => client.pause(device_id).await,
        Command::Next => client.next(device_id).await,
        Command::SetVolume(percent) => client.set_volume(percent, device_id).await,
    }
}

/// Run one dispatch cycle at time `now`.
///
/// Returns the command that took effect, or `None` for every kind of no-op
/// and for playback failures.  `state` is only updated when `Some` is returned.
pub async fn dispatch(
    client: &dyn PlaybackClient,
    label: GestureLabel,
    snapshot: Option<&PlaybackSnapshot>,
    state: &mut DispatcherState,
    settings: &DispatchSettings,
    now: Instant,
) -> Option<Command> {
    let (command, device_id) = match decide(label, snapshot, state, now, settings) {
        Decision::Issue { command, device_id } => (command, device_id),
        Decision::NoActiveDevice => {
            log::info!("dispatch: no active playback device; start playback on a device first");
            return None;
        }
        Decision::AlreadyPlaying => {
            log::info!("dispatch: ignored Play, already playing");
            return None;
        }
        Decision::AlreadyPaused => {
            log::info!("dispatch: ignored Pause, already paused");
            return None;
        }
        Decision::Repeated => {
            log::debug!("dispatch: {label} repeated, suppressed");
            return None;
        }
        Decision::Debounced | Decision::NotActionable => return None,
    };

    log::debug!(
        "dispatch: gesture {label} | playing: {}",
        snapshot.is_some_and(|s| s.is_playing)
    );

    match issue(client, command, &device_id).await {
        Ok(()) => {
            state.record(label, now);
            log::info!("dispatch: executed {command}");
            Some(command)
        }
        Err(e) => {
            log::warn!("dispatch: {command} failed: {e}");
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Dispatcher
// ---------------------------------------------------------------------------

/// Owns a [`DispatcherState`] and the client it issues commands through.
///
/// Safe to share behind an `Arc`; concurrent calls are serialised.
pub struct Dispatcher {
    client: Arc<dyn PlaybackClient>,
    settings: DispatchSettings,
    state: Mutex<DispatcherState>,
}

impl Dispatcher {
    /// Create a dispatcher whose debounce window starts now.
    pub fn new(client: Arc<dyn PlaybackClient>, settings: DispatchSettings) -> Self {
        Self::with_state(client, settings, DispatcherState::new(Instant::now()))
    }

    /// Create a dispatcher from an explicit starting state.
    pub fn with_state(
        client: Arc<dyn PlaybackClient>,
        settings: DispatchSettings,
        state: DispatcherState,
    ) -> Self {
        Self {
            client,
            settings,
            state: Mutex::new(state),
        }
    }

    /// Dispatch `label` at the current time.
    pub async fn dispatch(
        &self,
        label: GestureLabel,
        snapshot: Option<&PlaybackSnapshot>,
    ) -> Option<Command> {
        self.dispatch_at(label, snapshot, Instant::now()).await
    }

    /// Dispatch `label` as if the clock read `now`.
    pub async fn dispatch_at(
        &self,
        label: GestureLabel,
        snapshot: Option<&PlaybackSnapshot>,
        now: Instant,
    ) -> Option<Command> {
        let mut state = self.state.lock().await;
        dispatch(
            self.client.as_ref(),
            label,
            snapshot,
            &mut state,
            &self.settings,
            now,
        )
        .await
    }

    /// Copy of the current state.
    pub async fn state(&self) -> DispatcherState {
        *self.state.lock().await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
