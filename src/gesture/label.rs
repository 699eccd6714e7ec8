//! The closed set of gesture labels produced by the classifier.

use serde::Serialize;

/// One label per observation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GestureLabel {
    /// The detector found no hand in the frame.
    #[serde(rename = "No Hand Detected")]
    NoHand,
    /// A hand was found but no rule matched.
    #[serde(rename = "Unknown Gesture")]
    Unknown,
    #[serde(rename = "Volume Up")]
    VolumeUp,
    #[serde(rename = "Volume Down")]
    VolumeDown,
    #[serde(rename = "Skip Track")]
    SkipTrack,
    #[serde(rename = "Open Hand / Play")]
    OpenHandPlay,
    #[serde(rename = "Closed Fist / Pause")]
    ClosedFistPause,
}

impl GestureLabel {
    /// Volume gestures repeat while held; everything else fires once per pose.
    pub fn is_volume(&self) -> bool {
        matches!(self, GestureLabel::VolumeUp | GestureLabel::VolumeDown)
    }

    /// `false` for the two labels that never produce a command.
    pub fn is_actionable(&self) -> bool {
        !matches!(self, GestureLabel::NoHand | GestureLabel::Unknown)
    }

    /// Human-readable name.
    pub fn label(&self) -> &'static str {
        match self {
            GestureLabel::NoHand => "No Hand Detected",
            GestureLabel::Unknown => "Unknown Gesture",
            GestureLabel::VolumeUp => "Volume Up",
            GestureLabel::VolumeDown => "Volume Down",
            GestureLabel::SkipTrack => "Skip Track",
            GestureLabel::OpenHandPlay => "Open Hand / Play",
            GestureLabel::ClosedFistPause => "Closed Fist / Pause",
        }
    }
}

impl Default for GestureLabel {
    fn default() -> Self {
        GestureLabel::NoHand
    }
}

impl std::fmt::Display for GestureLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}
