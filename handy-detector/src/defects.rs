//! Fingertip candidates from the contour's convexity defects.

#[cfg(feature = "std")]
use std::vec::Vec;

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use handy_shared::{DefectCandidate, Point};

use crate::geometry::angle_between;

/// Most defects examined per frame
pub const MAX_DEFECTS: usize = 20;

/// Keep at most [`MAX_DEFECTS`] defects, in their original order
pub fn truncate_defects(defects: &[DefectCandidate]) -> heapless::Vec<DefectCandidate, MAX_DEFECTS> {
    if defects.len() > MAX_DEFECTS {
        log::warn!(
            "{} convexity defects found, processing the first {}",
            defects.len(),
            MAX_DEFECTS
        );
    }

    defects.iter().take(MAX_DEFECTS).copied().collect()
}

/// Keep the tips of deep, narrow defects.
///
/// A tip survives when its defect is at least `min_depth` deep and the angle
/// between the folds on either side of it (taken from the neighbouring defects,
/// wrapping around the list) is below `max_angle` degrees. Order is preserved.
pub fn reduce_tips(defects: &[DefectCandidate], min_depth: f32, max_angle: i32) -> Vec<Point> {
    let n = defects.len();
    let mut tips = Vec::with_capacity(n);

    for (i, defect) in defects.iter().enumerate() {
        if defect.depth < min_depth {
            continue;
        }

        let pdx = if i == 0 { n - 1 } else { i - 1 };
        let sdx = if i == n - 1 { 0 } else { i + 1 };

        let angle = angle_between(defect.tip, defects[pdx].fold, defects[sdx].fold);
        if angle >= max_angle {
            continue;
        }

        tips.push(defect.tip);
    }

    tips
}
