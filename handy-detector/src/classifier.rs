//! Thumb and index finger identification from tip angles.

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::{vec, vec::Vec};

use handy_shared::{FingerName, Point};

use crate::geometry::angle_to_cog;

/// Half-open angle band `(min, max]` in degrees
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AngleRange {
    pub min: i32,
    pub max: i32,
}

impl AngleRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, angle: i32) -> bool {
        angle > self.min && angle <= self.max
    }
}

/// Label the thumb and index finger among `tips`; everything else is
/// `Unknown`.
///
/// Tips are visited from the last to the first, and each label goes to the
/// first tip met whose angle around the COG falls in its band. The thumb is
/// tested before the index finger, so a tip inside both bands ends up as the
/// index finger.
pub fn label_thumb_index(
    tips: &[Point],
    cog: Point,
    tilt: i32,
    thumb: AngleRange,
    index: AngleRange,
) -> Vec<FingerName> {
    let mut names = vec![FingerName::Unknown; tips.len()];
    let mut found_thumb = false;
    let mut found_index = false;

    for (i, tip) in tips.iter().enumerate().rev() {
        let angle = angle_to_cog(*tip, cog, tilt);

        if !found_thumb && thumb.contains(angle) {
            names[i] = FingerName::Thumb;
            found_thumb = true;
        }

        if !found_index && index.contains(angle) {
            names[i] = FingerName::Index;
            found_index = true;
        }
    }

    names
}
