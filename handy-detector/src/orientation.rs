//! Center of gravity and main-axis angle of the hand contour.

use handy_shared::{Moments, Point};

use crate::geometry::{degrees_atan2, round_half_up};

/// Where the hand is and which way it points
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Orientation {
    pub cog: Point,
    /// Degrees relative to a y-axis running up the screen
    pub tilt: i32,
}

/// Compute the hand's orientation for this frame.
///
/// `previous_cog` is kept when the contour has zero area. `previous_tips` are
/// the fingertips found on the previous frame: the contour's main axis alone
/// can't tell the fingers from the wrist, so when those tips were below the
/// center the axis is turned around by 180 degrees.
pub fn extract_orientation(
    moments: &Moments,
    previous_cog: Point,
    previous_tips: &[Point],
    scale: i32,
) -> Orientation {
    let cog = center_of_gravity(moments, scale).unwrap_or(previous_cog);

    let mut tilt = raw_tilt(moments.mu11, moments.mu20, moments.mu02);
    if fingers_below(previous_tips, cog) {
        tilt += 180;
    }

    Orientation {
        cog,
        tilt: 180 - tilt,
    }
}

/// Centroid scaled to full-resolution coordinates, `None` for a zero-area contour
pub fn center_of_gravity(moments: &Moments, scale: i32) -> Option<Point> {
    if moments.m00 == 0.0 {
        return None;
    }
    let x = round_half_up(moments.m10 / moments.m00) as i32 * scale;
    let y = round_half_up(moments.m01 / moments.m00) as i32 * scale;
    Some(Point::new(x, y))
}

/// Counter-clockwise angle of the contour's main axis from the central
/// moments, in degrees. The axis has no direction, so this is only known up
/// to 180 degrees.
pub fn raw_tilt(mu11: f64, mu20: f64, mu02: f64) -> i32 {
    let diff = mu20 - mu02;
    if diff == 0.0 {
        return if mu11 == 0.0 {
            0
        } else if mu11 > 0.0 {
            45
        } else {
            -45
        };
    }

    let theta = 0.5 * degrees_atan2(2.0 * mu11, diff);
    let tilt = round_half_up(theta) as i32;

    if mu11 == 0.0 {
        // axis-aligned: horizontal or vertical
        if diff > 0.0 {
            0
        } else {
            90
        }
    } else if mu11 > 0.0 {
        // 0..45 when diff > 0, 45..90 otherwise
        tilt
    } else {
        // atan2 lands in -90..0; move to the counter-clockwise range
        180 + tilt
    }
}

fn fingers_below(tips: &[Point], cog: Point) -> bool {
    if tips.is_empty() {
        return false;
    }
    let y_total: i64 = tips.iter().map(|p| p.y as i64).sum();
    let avg_y = y_total / tips.len() as i64;
    avg_y > cog.y as i64
}
