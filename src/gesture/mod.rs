//! Gesture classification.
//!
//! * [`HandLandmarks`] / [`Landmark`]: the detector's per-frame output.
//! * [`classify`]: pure mapping from one [`HandObservation`] to one
//!   [`GestureLabel`].  No state, no I/O.

pub mod classifier;
pub mod label;
pub mod landmarks;

pub use classifier::{classify, classify_pose, FingerStates, Pose, Rule, RULES};
pub use label::GestureLabel;
pub use landmarks::{HandLandmarks, HandObservation, Landmark, LandmarkError, LANDMARK_COUNT};
