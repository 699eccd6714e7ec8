//! Command dispatcher.
//!
//! Turns (gesture label, playback snapshot) into at most one [`Command`],
//! suppressing bursts with a debounce window and repeats of held poses.
//!
//! * [`decide`]: pure rule sequence over [`DispatcherState`].
//! * [`dispatch`]: decide, issue through a [`PlaybackClient`], record.
//! * [`Dispatcher`]: mutex-guarded owner of the state, shareable via `Arc`.
//!
//! [`PlaybackClient`]: crate::playback::PlaybackClient

pub mod command;
pub mod dispatcher;
pub mod state;

pub use command::Command;
pub use dispatcher::{dispatch, Dispatcher};
pub use state::{
    decide, Decision, DispatchSettings, DispatcherState, DEBOUNCE_DELAY, VOLUME_STEP,
};
