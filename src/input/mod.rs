//! Line-oriented hand observation input.
//!
//! The hand-pose detector lives outside this crate.  It hands us one JSON
//! value per frame, one frame per line:
//!
//! ```text
//! null                                   ← no hand in this frame
//! [{"x":0.51,"y":0.62,"z":-0.01}, …]     ← exactly 21 landmarks
//! ```
//!
//! `z` may be omitted.  Blank lines are skipped.
//!
//! [`ObservationReader::start`] drains any `BufRead` on a dedicated OS thread
//! and forwards parsed observations over a `tokio::sync::mpsc` channel.

pub mod reader;

pub use reader::ObservationReader;

use thiserror::Error;

use crate::gesture::{HandLandmarks, HandObservation, Landmark, LandmarkError};

// ---------------------------------------------------------------------------
// InputError
// ---------------------------------------------------------------------------

/// Reasons an input line could not become an observation.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("invalid observation JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Landmarks(#[from] LandmarkError),
}

// ---------------------------------------------------------------------------
// parse_observation
// ---------------------------------------------------------------------------

/// Parse one input line.
///
/// Returns `Ok(None)` for blank lines (nothing to process) and
/// `Ok(Some(observation))` for a frame, where the observation itself is
/// `None` when the detector found no hand.
///
/// ```
/// use gesture_remote::input::parse_observation;
///
/// assert!(parse_observation("   ").unwrap().is_none());
/// assert_eq!(parse_observation("null").unwrap(), Some(None));
/// assert!(parse_observation("[1, 2]").is_err());
/// ```
pub fn parse_observation(line: &str) -> Result<Option<HandObservation>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let points: Option<Vec<Landmark>> = serde_json::from_str(line)?;
    let observation = points.map(HandLandmarks::try_from).transpose()?;
    Ok(Some(observation))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture::LANDMARK_COUNT;

    fn hand_line(n: usize) -> String {
        let points: Vec<String> = (0..n)
            .map(|i| format!(r#"{{"x":{},"y":0.5}}"#, i as f32 / 100.0))
            .collect();
        format!("[{}]", points.join(","))
    }

    #[test]
    fn blank_line_is_skipped() {
        assert!(parse_observation("").unwrap().is_none());
        assert!(parse_observation(" \t").unwrap().is_none());
    }

    #[test]
    fn null_is_no_hand() {
        assert_eq!(parse_observation("null").unwrap(), Some(None));
    }

    #[test]
    fn twenty_one_landmarks_is_a_hand() {
        let obs = parse_observation(&hand_line(LANDMARK_COUNT))
            .unwrap()
            .expect("frame");
        let hand = obs.expect("hand present");
        assert_eq!(hand.get(20), Landmark::new(0.2, 0.5));
    }

    #[test]
    fn wrong_landmark_count_is_an_error() {
        let err = parse_observation(&hand_line(5)).unwrap_err();
        assert!(matches!(err, InputError::Landmarks(LandmarkError::WrongCount(5))));
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            parse_observation("{not json").unwrap_err(),
            InputError::Json(_)
        ));
        assert!(matches!(
            parse_observation(r#"[{"x":"a","y":1}]"#).unwrap_err(),
            InputError::Json(_)
        ));
    }
}
