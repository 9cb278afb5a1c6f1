use anyhow::Result;
use handy_shared::{HandState, Point};
use opencv::{
    core::{self, Mat, Scalar},
    imgproc,
    prelude::*,
};
use std::time::Duration;

// BGR
const RED: (f64, f64, f64) = (0.0, 0.0, 255.0);
const GREEN: (f64, f64, f64) = (0.0, 255.0, 0.0);
const YELLOW: (f64, f64, f64) = (0.0, 255.0, 255.0);
const BLUE: (f64, f64, f64) = (255.0, 0.0, 0.0);

const TIP_RADIUS: i32 = 8;

fn color((b, g, r): (f64, f64, f64)) -> Scalar {
    Scalar::new(b, g, r, 0.0)
}

fn cv_point(p: Point) -> core::Point {
    core::Point::new(p.x, p.y)
}

fn label(img: &mut Mat, text: &str, at: core::Point, rgb: (f64, f64, f64)) -> Result<()> {
    imgproc::put_text(
        img,
        text,
        at,
        imgproc::FONT_HERSHEY_SIMPLEX,
        0.6,
        color(rgb),
        2,
        imgproc::LINE_AA,
        false,
    )?;
    Ok(())
}

/// Draw the fingertips and COG.
///
/// Unnamed tips get a red circle and their list position; named tips a green
/// circle, their name and a yellow line from the COG.
pub fn draw_hand(img: &mut Mat, state: &HandState) -> Result<()> {
    if state.is_empty() {
        return Ok(());
    }

    let cog = cv_point(state.cog);

    for (i, (tip, name)) in state.fingers().enumerate() {
        let pt = cv_point(tip);
        let text_at = core::Point::new(pt.x, pt.y - 10);

        if name.is_known() {
            imgproc::line(img, cog, pt, color(YELLOW), 4, imgproc::LINE_AA, 0)?;
            imgproc::circle(img, pt, TIP_RADIUS, color(GREEN), 4, imgproc::LINE_AA, 0)?;
            label(img, name.as_str(), text_at, GREEN)?;
        } else {
            imgproc::circle(img, pt, TIP_RADIUS, color(RED), 4, imgproc::LINE_AA, 0)?;
            label(img, &i.to_string(), text_at, RED)?;
        }
    }

    imgproc::circle(img, cog, TIP_RADIUS, color(GREEN), -1, imgproc::LINE_AA, 0)?;
    Ok(())
}

/// Average time spent grabbing and processing a frame
#[derive(Debug, Clone, Copy, Default)]
pub struct SnapStats {
    count: u32,
    total: Duration,
}

impl SnapStats {
    pub fn record(&mut self, elapsed: Duration) {
        self.count += 1;
        self.total += elapsed;
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn average_ms(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.total.as_secs_f64() * 1000.0 / self.count as f64)
    }

    pub fn message(&self) -> String {
        match self.average_ms() {
            Some(ms) => format!("Snap Avg. Time: {:.1} ms", ms),
            None => "Loading...".to_string(),
        }
    }
}

/// Write the snap statistics in the bottom-left corner
pub fn draw_stats(img: &mut Mat, stats: &SnapStats) -> Result<()> {
    let at = core::Point::new(5, img.rows() - 10);
    label(img, &stats.message(), at, BLUE)
}
