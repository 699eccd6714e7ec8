//! Hand-gesture remote control for a playback device.
//!
//! Each frame's hand landmarks are classified into a [`gesture::GestureLabel`];
//! the [`dispatch::Dispatcher`] then decides whether that label should become a
//! playback [`dispatch::Command`], suppressing bursts and held-pose repeats.

pub mod config;
pub mod dispatch;
pub mod gesture;
pub mod input;
pub mod pipeline;
pub mod playback;
