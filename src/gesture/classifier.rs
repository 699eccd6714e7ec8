//! Rule-based hand-pose classifier.
//!
//! # Finger extension
//!
//! | Finger | Extended when | Compared against |
//! |--------|---------------|------------------|
//! | Thumb  | `tip.x < ip.x` | the joint just before the tip |
//! | Others | `tip.y < pip.y` | the joint two positions back |
//!
//! The thumb test is horizontal because the thumb swings sideways away from
//! the palm.  `tip.x < ip.x` assumes a mirrored (selfie) camera frame with the
//! right hand raised; it is a fixed sign convention of the input, not anatomy.
//! The other fingers use screen space where a smaller `y` is higher up.
//!
//! # Precedence
//!
//! [`RULES`] is evaluated top to bottom and the first match wins.  Later rules
//! are written knowing the earlier ones already failed, so they are **not**
//! independent conditions.  A lone extended thumb that is not pointing down
//! misses `VolumeDown` and is caught by the `<= 1` fist rule.

use super::label::GestureLabel;
use super::landmarks::{
    HandLandmarks, HandObservation, INDEX_PIP, INDEX_TIP, MIDDLE_PIP, MIDDLE_TIP, PINKY_PIP,
    PINKY_TIP, RING_PIP, RING_TIP, THUMB_IP, THUMB_TIP,
};

// ---------------------------------------------------------------------------
// FingerStates
// ---------------------------------------------------------------------------

/// Extended / retracted flag for each finger.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FingerStates {
    pub thumb: bool,
    pub index: bool,
    pub middle: bool,
    pub ring: bool,
    pub pinky: bool,
}

impl FingerStates {
    /// Compute the flags from landmark geometry.
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        let above = |tip: usize, pip: usize| hand.get(tip).y < hand.get(pip).y;

        Self {
            thumb: hand.get(THUMB_TIP).x < hand.get(THUMB_IP).x,
            index: above(INDEX_TIP, INDEX_PIP),
            middle: above(MIDDLE_TIP, MIDDLE_PIP),
            ring: above(RING_TIP, RING_PIP),
            pinky: above(PINKY_TIP, PINKY_PIP),
        }
    }

    /// Number of extended fingers, 0–5.
    pub fn count(&self) -> usize {
        [self.thumb, self.index, self.middle, self.ring, self.pinky]
            .iter()
            .filter(|&&up| up)
            .count()
    }
}

// ---------------------------------------------------------------------------
// Pose
// ---------------------------------------------------------------------------

/// Everything the rules look at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pose {
    pub fingers: FingerStates,
    /// Thumb tip lower on screen than the thumb IP joint.
    pub thumb_pointing_down: bool,
}

impl Pose {
    pub fn from_landmarks(hand: &HandLandmarks) -> Self {
        Self {
            fingers: FingerStates::from_landmarks(hand),
            thumb_pointing_down: hand.get(THUMB_TIP).y > hand.get(THUMB_IP).y,
        }
    }
}

// ---------------------------------------------------------------------------
// Rules
// ---------------------------------------------------------------------------

/// One entry of the ordered rule table.
#[derive(Clone, Copy)]
pub struct Rule {
    pub label: GestureLabel,
    pub matches: fn(&Pose) -> bool,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule").field("label", &self.label).finish()
    }
}

fn volume_up(p: &Pose) -> bool {
    p.fingers.count() == 1 && p.fingers.index
}

fn volume_down(p: &Pose) -> bool {
    p.fingers.count() == 1 && p.fingers.thumb && p.thumb_pointing_down
}

fn skip_track(p: &Pose) -> bool {
    p.fingers.count() == 2 && p.fingers.index && p.fingers.middle
}

fn open_hand(p: &Pose) -> bool {
    p.fingers.count() >= 4
}

// Catch-all for any 0- or 1-finger pose not claimed above.
fn closed_fist(p: &Pose) -> bool {
    p.fingers.count() <= 1
}

/// Ordered classification rules; first match wins, otherwise `Unknown`.
pub const RULES: [Rule; 5] = [
    Rule { label: GestureLabel::VolumeUp, matches: volume_up },
    Rule { label: GestureLabel::VolumeDown, matches: volume_down },
    Rule { label: GestureLabel::SkipTrack, matches: skip_track },
    Rule { label: GestureLabel::OpenHandPlay, matches: open_hand },
    Rule { label: GestureLabel::ClosedFistPause, matches: closed_fist },
];

/// Resolve a pose against [`RULES`].
pub fn classify_pose(pose: &Pose) -> GestureLabel {
    RULES
        .iter()
        .find(|rule| (rule.matches)(pose))
        .map(|rule| rule.label)
        .unwrap_or(GestureLabel::Unknown)
}

/// Map one observation to exactly one label.  Total: never fails.
pub fn classify(observation: &HandObservation) -> GestureLabel {
    match observation {
        None => GestureLabel::NoHand,
        Some(hand) => classify_pose(&Pose::from_landmarks(hand)),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::gesture::landmarks::{
        Landmark, INDEX_MCP, LANDMARK_COUNT, MIDDLE_MCP, PINKY_MCP, RING_MCP,
    };

    /// Thumb configuration for [`hand`].
    #[derive(Clone, Copy)]
    pub(crate) enum Thumb {
        Tucked,
        /// Extended sideways, tip level with or above the IP joint.
        Out,
        /// Extended sideways with the tip below the IP joint.
        OutDown,
    }

    /// Build a synthetic hand.  `fingers` is index, middle, ring, pinky.
    pub(crate) fn hand(thumb: Thumb, fingers: [bool; 4]) -> HandLandmarks {
        let mut points = [Landmark::new(0.5, 0.5); LANDMARK_COUNT];

        points[THUMB_IP] = Landmark::new(0.5, 0.5);
        points[THUMB_TIP] = match thumb {
            Thumb::Tucked => Landmark::new(0.6, 0.45),
            Thumb::Out => Landmark::new(0.4, 0.45),
            Thumb::OutDown => Landmark::new(0.4, 0.6),
        };

        for (base, extended) in [INDEX_MCP, MIDDLE_MCP, RING_MCP, PINKY_MCP]
            .into_iter()
            .zip(fingers)
        {
            let (pip, tip) = (base + 1, base + 3);
            points[pip] = Landmark::new(0.5, 0.5);
            points[tip] = Landmark::new(0.5, if extended { 0.3 } else { 0.7 });
        }

        HandLandmarks::new(points)
    }

    fn label(thumb: Thumb, fingers: [bool; 4]) -> GestureLabel {
        classify(&Some(hand(thumb, fingers)))
    }

    #[test]
    fn no_hand() {
        assert_eq!(classify(&None), GestureLabel::NoHand);
    }

    #[test]
    fn finger_states_follow_geometry() {
        let states = FingerStates::from_landmarks(&hand(Thumb::Out, [true, false, true, false]));
        assert_eq!(
            states,
            FingerStates {
                thumb: true,
                index: true,
                middle: false,
                ring: true,
                pinky: false,
            }
        );
        assert_eq!(states.count(), 3);
    }

    #[test]
    fn index_only_is_volume_up() {
        assert_eq!(label(Thumb::Tucked, [true, false, false, false]), GestureLabel::VolumeUp);
    }

    #[test]
    fn downward_thumb_only_is_volume_down() {
        assert_eq!(label(Thumb::OutDown, [false; 4]), GestureLabel::VolumeDown);
    }

    #[test]
    fn upright_thumb_only_falls_through_to_fist() {
        assert_eq!(label(Thumb::Out, [false; 4]), GestureLabel::ClosedFistPause);
    }

    #[test]
    fn zero_or_one_non_index_finger_is_fist() {
        assert_eq!(label(Thumb::Tucked, [false; 4]), GestureLabel::ClosedFistPause);
        assert_eq!(
            label(Thumb::Tucked, [false, true, false, false]),
            GestureLabel::ClosedFistPause
        );
        assert_eq!(
            label(Thumb::Tucked, [false, false, true, false]),
            GestureLabel::ClosedFistPause
        );
        assert_eq!(
            label(Thumb::Tucked, [false, false, false, true]),
            GestureLabel::ClosedFistPause
        );
        // A tucked thumb pointing down does not count as extended.
        let mut fist = hand(Thumb::Tucked, [false; 4]);
        let mut points = *fist.points();
        points[THUMB_TIP] = Landmark::new(0.6, 0.7);
        fist = HandLandmarks::new(points);
        assert_eq!(classify(&Some(fist)), GestureLabel::ClosedFistPause);
    }

    #[test]
    fn index_and_middle_is_skip_regardless_of_thumb_direction() {
        assert_eq!(
            label(Thumb::Tucked, [true, true, false, false]),
            GestureLabel::SkipTrack
        );
        let mut points = *hand(Thumb::Tucked, [true, true, false, false]).points();
        points[THUMB_TIP] = Landmark::new(0.6, 0.9);
        assert_eq!(
            classify(&Some(HandLandmarks::new(points))),
            GestureLabel::SkipTrack
        );
    }

    #[test]
    fn four_or_more_is_open_hand() {
        assert_eq!(label(Thumb::Tucked, [true; 4]), GestureLabel::OpenHandPlay);
        assert_eq!(label(Thumb::Out, [true; 4]), GestureLabel::OpenHandPlay);
        assert_eq!(label(Thumb::OutDown, [true; 4]), GestureLabel::OpenHandPlay);
        assert_eq!(
            label(Thumb::Out, [true, true, true, false]),
            GestureLabel::OpenHandPlay
        );
    }

    #[test]
    fn other_two_and_three_finger_poses_are_unknown() {
        // Thumb + index + middle: three fingers, no rule.
        assert_eq!(
            label(Thumb::Out, [true, true, false, false]),
            GestureLabel::Unknown
        );
        // Two fingers that are not index + middle.
        assert_eq!(
            label(Thumb::Tucked, [false, false, true, true]),
            GestureLabel::Unknown
        );
        assert_eq!(
            label(Thumb::Out, [true, false, false, false]),
            GestureLabel::Unknown
        );
        assert_eq!(
            label(Thumb::Tucked, [false, true, true, true]),
            GestureLabel::Unknown
        );
    }

    #[test]
    fn rule_order_is_fixed() {
        let order: Vec<GestureLabel> = RULES.iter().map(|r| r.label).collect();
        assert_eq!(
            order,
            vec![
                GestureLabel::VolumeUp,
                GestureLabel::VolumeDown,
                GestureLabel::SkipTrack,
                GestureLabel::OpenHandPlay,
                GestureLabel::ClosedFistPause,
            ]
        );
    }

    #[test]
    fn every_finger_combination_gets_exactly_one_label() {
        for thumb in [Thumb::Tucked, Thumb::Out, Thumb::OutDown] {
            for mask in 0u8..16 {
                let fingers = [mask & 1 != 0, mask & 2 != 0, mask & 4 != 0, mask & 8 != 0];
                let pose = Pose::from_landmarks(&hand(thumb, fingers));
                let first = RULES.iter().position(|r| (r.matches)(&pose));
                let expected = first.map(|i| RULES[i].label).unwrap_or(GestureLabel::Unknown);
                assert_eq!(classify_pose(&pose), expected);
                assert_ne!(classify_pose(&pose), GestureLabel::NoHand);
            }
        }
    }
}
