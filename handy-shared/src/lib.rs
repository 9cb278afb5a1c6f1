#![cfg_attr(not(feature = "std"), no_std)]

//! Value types shared between the fingertip detector and its front ends.
//! Everything here is plain data: points, finger names, the geometry handed
//! over by the image-processing stage and the per-frame hand state.

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;
use serde::{Deserialize, Serialize};

pub mod calibration;

pub use calibration::{CalibrationError, HsvCalibration, HsvRange};

/// A 2D point in full-resolution image coordinates (y grows downward)
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Names a fingertip can receive.
///
/// The five real names form a cycle in the order they appear around a left
/// hand: little, ring, middle, index, thumb and back to little. `Unknown` is
/// the placeholder for a tip that has not been identified and sits outside
/// that cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum FingerName {
    Little,
    Ring,
    Middle,
    Index,
    Thumb,
    Unknown,
}

impl FingerName {
    /// The real names in cyclic order
    pub const CYCLE: [FingerName; 5] = [
        FingerName::Little,
        FingerName::Ring,
        FingerName::Middle,
        FingerName::Index,
        FingerName::Thumb,
    ];

    pub fn is_known(self) -> bool {
        self != FingerName::Unknown
    }

    fn cycle_index(self) -> usize {
        match self {
            FingerName::Little => 0,
            FingerName::Ring => 1,
            FingerName::Middle => 2,
            FingerName::Index => 3,
            FingerName::Thumb => 4,
            FingerName::Unknown => panic!("FingerName::Unknown has no neighbours"),
        }
    }

    /// Next finger in the cycle (thumb wraps to little).
    ///
    /// # Panics
    /// When called on `Unknown`.
    pub fn next(self) -> Self {
        Self::CYCLE[(self.cycle_index() + 1) % Self::CYCLE.len()]
    }

    /// Previous finger in the cycle (little wraps to thumb).
    ///
    /// # Panics
    /// When called on `Unknown`.
    pub fn prev(self) -> Self {
        let len = Self::CYCLE.len();
        Self::CYCLE[(self.cycle_index() + len - 1) % len]
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FingerName::Little => "little",
            FingerName::Ring => "ring",
            FingerName::Middle => "middle",
            FingerName::Index => "index",
            FingerName::Thumb => "thumb",
            FingerName::Unknown => "unknown",
        }
    }
}

impl fmt::Display for FingerName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Image moments of the hand contour.
///
/// Spatial moments (`m00`, `m10`, `m01`) and central moments (`mu11`, `mu20`,
/// `mu02`) are in the coordinates of the image the contour was found in,
/// which may be downscaled from the camera frame.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
    pub mu11: f64,
    pub mu20: f64,
    pub mu02: f64,
}

/// One convexity defect of the hand contour, in full-resolution coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DefectCandidate {
    /// Hull point where the defect starts (a possible fingertip)
    pub tip: Point,
    /// Deepest point of the concavity (the skin fold between two fingers)
    pub fold: Point,
    /// Distance from the fold to the hull
    pub depth: f32,
}

impl DefectCandidate {
    pub fn new(tip: Point, fold: Point, depth: f32) -> Self {
        Self { tip, fold, depth }
    }
}

/// Everything the detector needs to know about one frame's hand contour.
/// Defects must be in hull traversal order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SilhouetteGeometry {
    pub moments: Moments,
    pub defects: Vec<DefectCandidate>,
}

impl SilhouetteGeometry {
    pub fn new(moments: Moments, defects: Vec<DefectCandidate>) -> Self {
        Self { moments, defects }
    }
}

/// Per-frame result of the detector.
///
/// `fingertips[i]` carries the name `names[i]`; the order is position around
/// the hand, not finger identity.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HandState {
    /// Center of gravity of the hand contour
    pub cog: Point,
    /// Main axis angle in degrees, relative to a y-axis pointing up the screen
    pub tilt: i32,
    pub fingertips: Vec<Point>,
    pub names: Vec<FingerName>,
}

impl HandState {
    pub fn is_empty(&self) -> bool {
        self.fingertips.is_empty()
    }

    /// Fingertips paired with their names
    pub fn fingers(&self) -> impl Iterator<Item = (Point, FingerName)> + '_ {
        self.fingertips
            .iter()
            .copied()
            .zip(self.names.iter().copied())
    }

    /// Position of the tip carrying `name`, if any
    pub fn tip_of(&self, name: FingerName) -> Option<Point> {
        self.fingers()
            .find(|&(_, n)| n == name && n.is_known())
            .map(|(p, _)| p)
    }

    pub fn named_count(&self) -> usize {
        self.names.iter().filter(|n| n.is_known()).count()
    }

    #[cfg(feature = "std")]
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(feature = "std"))]
    use alloc::vec;

    #[test]
    fn test_next_prev_round_trip() {
        for name in FingerName::CYCLE {
            assert_eq!(name.prev().next(), name);
            assert_eq!(name.next().prev(), name);
        }
    }

    #[test]
    fn test_cycle_wraps() {
        assert_eq!(FingerName::Thumb.next(), FingerName::Little);
        assert_eq!(FingerName::Little.prev(), FingerName::Thumb);
        assert_eq!(FingerName::Index.next(), FingerName::Thumb);
        assert_eq!(FingerName::Index.prev(), FingerName::Middle);
    }

    #[test]
    fn test_cycle_never_yields_unknown() {
        let mut name = FingerName::Little;
        for _ in 0..12 {
            name = name.next();
            assert!(name.is_known());
        }
    }

    #[test]
    #[should_panic]
    fn test_next_on_unknown_panics() {
        let _ = FingerName::Unknown.next();
    }

    #[test]
    #[should_panic]
    fn test_prev_on_unknown_panics() {
        let _ = FingerName::Unknown.prev();
    }

    #[test]
    fn test_hand_state_lookup() {
        let state = HandState {
            cog: Point::new(100, 100),
            tilt: 90,
            fingertips: vec![Point::new(10, 20), Point::new(30, 40), Point::new(50, 60)],
            names: vec![FingerName::Unknown, FingerName::Thumb, FingerName::Index],
        };

        assert_eq!(state.tip_of(FingerName::Thumb), Some(Point::new(30, 40)));
        assert_eq!(state.tip_of(FingerName::Little), None);
        assert_eq!(state.tip_of(FingerName::Unknown), None);
        assert_eq!(state.named_count(), 2);
        assert_eq!(state.fingers().count(), 3);
    }

    #[cfg(feature = "std")]
    #[test]
    fn test_hand_state_json_uses_lowercase_names() {
        let state = HandState {
            cog: Point::new(1, 2),
            tilt: 45,
            fingertips: vec![Point::new(3, 4)],
            names: vec![FingerName::Middle],
        };

        let json = state.to_json().unwrap();
        assert!(json.contains("\"middle\""));

        let back: HandState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
    }
}
