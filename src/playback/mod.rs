//! Playback backend.
//!
//! * [`PlaybackClient`]: async trait for the five remote operations.
//! * [`SpotifyClient`]: Spotify Web API implementation.
//! * [`PlaybackSnapshot`]: device state read before each dispatch.
//! * [`PlaybackError`]: error variants for backend calls.

pub mod client;
pub mod snapshot;
pub mod spotify;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use client::{PlaybackClient, PlaybackError};
pub use snapshot::{Device, PlaybackSnapshot, TrackInfo};
pub use spotify::SpotifyClient;

// test-only re-export so dispatcher and pipeline tests can share the double.
#[cfg(test)]
pub use client::{MockCall, MockPlaybackClient};
