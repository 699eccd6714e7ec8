//! Frame loop for the gesture remote.
//!
//! # Architecture
//!
//! ```text
//! ObservationReader (OS thread)
//!        │  HandObservation (mpsc)
//!        ▼
//! GestureController::run()  ← async tokio task
//!        │
//!        ├─ classify(observation)            → GestureLabel
//!        ├─ PlaybackClient::current_playback → PlaybackSnapshot
//!        ├─ Dispatcher::dispatch             → Option<Command>
//!        └─ FrameReport ──(mpsc)──▶ report printer
//!
//! SharedStatus (Arc<Mutex<ControllerStatus>>) ←── read at shutdown
//! ```
//!
//! Frames are handled strictly one at a time, in arrival order.

pub mod runner;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use runner::GestureController;
pub use state::{new_shared_status, ControllerStatus, FrameReport, PlaybackStatus, SharedStatus};
