//! Camera front end for the fingertip detector: glove segmentation, contour
//! geometry extraction and drawing of the results with OpenCV.

pub mod config;
pub mod hand_tracker;
pub mod render;

pub use config::{load_calibration, TrackerConfig};
pub use hand_tracker::HandTracker;
pub use render::{draw_hand, draw_stats, SnapStats};
