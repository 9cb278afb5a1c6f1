#![cfg_attr(not(feature = "std"), no_std)]

//! Fingertip detection and naming for a segmented hand contour.
//!
//! Each frame the detector takes the contour's moments and convexity defects,
//! works out the hand's center and tilt, keeps the defects that look like
//! fingertips, identifies the thumb and index finger by their angle around the
//! center and names the remaining tips by their position next to those two.
//! Works in `no_std` environments with `alloc`.

pub mod classifier;
pub mod defects;
pub mod geometry;
pub mod orientation;
pub mod propagate;

pub use classifier::AngleRange;
pub use handy_shared::{
    DefectCandidate, FingerName, HandState, Moments, Point, SilhouetteGeometry,
};
pub use orientation::Orientation;

#[cfg(feature = "std")]
extern crate std;

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
extern crate alloc;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Thresholds used by the detector
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DetectorConfig {
    /// Factor between the image the contour came from and the full frame
    pub image_scale: i32,
    /// Shallower defects are not fingertips
    pub min_finger_depth: f32,
    /// Defects at least this wide (degrees) are not fingertips
    pub max_finger_angle: i32,
    /// Thumb angle band around the COG for a left hand
    pub thumb_range: AngleRange,
    /// Index finger angle band around the COG for a left hand
    pub index_range: AngleRange,
}

impl DetectorConfig {
    pub fn new() -> Self {
        Self {
            image_scale: 2,
            min_finger_depth: 20.0,
            max_finger_angle: 60,
            thumb_range: AngleRange::new(120, 200),
            index_range: AngleRange::new(60, 120),
        }
    }

    pub fn with_image_scale(mut self, scale: i32) -> Self {
        self.image_scale = scale;
        self
    }

    pub fn with_min_finger_depth(mut self, depth: f32) -> Self {
        self.min_finger_depth = depth;
        self
    }

    pub fn with_max_finger_angle(mut self, angle: i32) -> Self {
        self.max_finger_angle = angle;
        self
    }

    pub fn with_thumb_range(mut self, min: i32, max: i32) -> Self {
        self.thumb_range = AngleRange::new(min, max);
        self
    }

    pub fn with_index_range(mut self, min: i32, max: i32) -> Self {
        self.index_range = AngleRange::new(min, max);
        self
    }
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Hand detector keeping the latest [`HandState`].
///
/// The previous frame's fingertips decide which end of the hand's main axis
/// holds the fingers, so frames must be fed in order. A frame without a usable
/// contour is reported with [`HandDetector::skip_frame`] and leaves the last
/// state in place.
pub struct HandDetector {
    config: DetectorConfig,
    state: HandState,
}

impl HandDetector {
    pub fn new() -> Self {
        Self::with_config(DetectorConfig::default())
    }

    pub fn with_config(config: DetectorConfig) -> Self {
        Self {
            config,
            state: HandState::default(),
        }
    }

    /// Latest complete hand state
    pub fn state(&self) -> &HandState {
        &self.state
    }

    /// Process one frame's contour geometry and return the new hand state
    pub fn update(&mut self, geometry: &SilhouetteGeometry) -> &HandState {
        let state = self.next_state(geometry);
        log::debug!(
            "cog=({}, {}) tilt={} tips={} named={}",
            state.cog.x,
            state.cog.y,
            state.tilt,
            state.fingertips.len(),
            state.named_count()
        );

        self.state = state;
        &self.state
    }

    /// No hand contour this frame; the previous state stays valid
    pub fn skip_frame(&self) -> &HandState {
        log::trace!("no hand contour, keeping previous state");
        &self.state
    }

    /// Forget the current state, including the fingertip history
    pub fn reset(&mut self) {
        self.state = HandState::default();
    }

    fn next_state(&self, geometry: &SilhouetteGeometry) -> HandState {
        let previous = &self.state;
        let Orientation { cog, tilt } = orientation::extract_orientation(
            &geometry.moments,
            previous.cog,
            &previous.fingertips,
            self.config.image_scale,
        );

        let defects = defects::truncate_defects(&geometry.defects);
        let fingertips: Vec<Point> = defects::reduce_tips(
            &defects,
            self.config.min_finger_depth,
            self.config.max_finger_angle,
        );

        let mut names = classifier::label_thumb_index(
            &fingertips,
            cog,
            tilt,
            self.config.thumb_range,
            self.config.index_range,
        );
        propagate::label_unknowns(&mut names);

        HandState {
            cog,
            tilt,
            fingertips,
            names,
        }
    }
}

impl Default for HandDetector {
    fn default() -> Self {
        Self::new()
    }
}
