use anyhow::{Context, Result};
use handy_shared::HsvCalibration;
use std::path::Path;

/// Segmentation and contour settings for [`crate::HandTracker`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrackerConfig {
    /// Camera frames are shrunk by this factor before processing
    pub image_scale: i32,
    /// Contours with a smaller area (in the shrunk image) are ignored
    pub smallest_area: f64,
    /// Douglas-Peucker tolerance used to simplify the hand contour
    pub approx_epsilon: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            image_scale: 2,
            smallest_area: 600.0,
            approx_epsilon: 3.0,
        }
    }
}

/// Read the glove colour thresholds.
///
/// The application can't segment anything without them, so callers treat an
/// error here as fatal.
pub fn load_calibration(path: impl AsRef<Path>) -> Result<HsvCalibration> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read HSV ranges from {}", path.display()))?;
    let calibration = HsvCalibration::parse(&text)
        .with_context(|| format!("Malformed HSV ranges in {}", path.display()))?;

    log::info!("Read HSV ranges from {}", path.display());
    Ok(calibration)
}
