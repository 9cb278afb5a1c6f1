use anyhow::Result;
use handy_shared::{DefectCandidate, HsvCalibration, Moments, Point, SilhouetteGeometry};
use opencv::{
    core::{self, Mat, Scalar, Size, Vec4i, Vector, BORDER_CONSTANT},
    imgproc,
    prelude::*,
};

use crate::config::TrackerConfig;

type CvPoint = core::Point;

/// Turns camera frames into hand contour geometry for the detector
pub struct HandTracker {
    config: TrackerConfig,
    lower: Scalar,
    upper: Scalar,
    kernel: Mat,
}

impl HandTracker {
    pub fn new(calibration: &HsvCalibration, config: TrackerConfig) -> Result<Self> {
        let (h, s, v) = calibration.lower();
        let lower = Scalar::new(h as f64, s as f64, v as f64, 0.0);
        let (h, s, v) = calibration.upper();
        let upper = Scalar::new(h as f64, s as f64, v as f64, 0.0);

        let kernel = imgproc::get_structuring_element(
            imgproc::MORPH_RECT,
            Size::new(3, 3),
            CvPoint::new(-1, -1),
        )?;

        Ok(Self {
            config,
            lower,
            upper,
            kernel,
        })
    }

    /// Process a BGR frame.
    /// Returns `None` when no contour is large enough to be the hand or its
    /// hull is unusable.
    pub fn process_frame(&self, frame: &Mat) -> Result<Option<SilhouetteGeometry>> {
        let mask = self.threshold(frame)?;

        let Some(contour) = self.find_biggest_contour(&mask)? else {
            return Ok(None);
        };

        self.contour_geometry(&contour)
    }

    /// Moments and convexity defects of a hand contour.
    /// Returns `None` when the contour has no usable convex hull, so the frame
    /// is skipped instead of clearing the fingertip history.
    pub fn contour_geometry(&self, contour: &Vector<CvPoint>) -> Result<Option<SilhouetteGeometry>> {
        let Some(defects) = self.find_defects(contour)? else {
            return Ok(None);
        };

        let moments = imgproc::moments(contour, false)?;
        Ok(Some(SilhouetteGeometry::new(to_moments(&moments), defects)))
    }

    /// Shrink, convert to HSV and keep the pixels inside the glove's range
    fn threshold(&self, frame: &Mat) -> Result<Mat> {
        let scale = self.config.image_scale.max(1);
        let mut small = Mat::default();
        imgproc::resize(
            frame,
            &mut small,
            Size::new(frame.cols() / scale, frame.rows() / scale),
            0.0,
            0.0,
            imgproc::INTER_LINEAR,
        )?;

        let mut hsv = Mat::default();
        imgproc::cvt_color(&small, &mut hsv, imgproc::COLOR_BGR2HSV, 0)?;

        let mut thresholded = Mat::default();
        core::in_range(&hsv, &self.lower, &self.upper, &mut thresholded)?;

        // Erode then dilate to drop specks without shrinking the hand
        let mut mask = Mat::default();
        imgproc::morphology_ex(
            &thresholded,
            &mut mask,
            imgproc::MORPH_OPEN,
            &self.kernel,
            CvPoint::new(-1, -1),
            1,
            BORDER_CONSTANT,
            imgproc::morphology_default_border_value()?,
        )?;

        Ok(mask)
    }

    fn find_biggest_contour(&self, mask: &Mat) -> Result<Option<Vector<CvPoint>>> {
        let mut contours = Vector::<Vector<CvPoint>>::new();
        imgproc::find_contours(
            mask,
            &mut contours,
            imgproc::RETR_EXTERNAL,
            imgproc::CHAIN_APPROX_SIMPLE,
            CvPoint::new(0, 0),
        )?;

        let mut max_area = self.config.smallest_area;
        let mut biggest = None;

        for contour in contours.iter() {
            let area = imgproc::contour_area(&contour, false)?;
            if area > max_area {
                max_area = area;
                biggest = Some(contour);
            }
        }

        Ok(biggest)
    }

    /// Convexity defects of the simplified contour, in hull order
    fn find_defects(&self, contour: &Vector<CvPoint>) -> Result<Option<Vec<DefectCandidate>>> {
        let mut approx = Vector::<CvPoint>::new();
        imgproc::approx_poly_dp(contour, &mut approx, self.config.approx_epsilon, true)?;

        let mut hull = Vector::<i32>::new();
        imgproc::convex_hull(&approx, &mut hull, false, false)?;

        if hull.len() < 3 {
            log::debug!("degenerate hull with {} points", hull.len());
            return Ok(None);
        }

        let mut defects = Vector::<Vec4i>::new();
        if let Err(e) = imgproc::convexity_defects(&approx, &hull, &mut defects) {
            // Self-intersecting approximations make OpenCV reject the hull
            log::debug!("convexity defects unavailable: {}", e);
            return Ok(None);
        }

        defect_candidates(&approx, &defects, self.config.image_scale).map(Some)
    }
}

/// Convert OpenCV defects (start, end, farthest point indices plus
/// fixed-point depth) into full-resolution candidates
pub fn defect_candidates(
    contour: &Vector<CvPoint>,
    defects: &Vector<Vec4i>,
    scale: i32,
) -> Result<Vec<DefectCandidate>> {
    let mut candidates = Vec::with_capacity(defects.len());

    for defect in defects.iter() {
        let start = contour.get(defect[0] as usize)?;
        let far = contour.get(defect[2] as usize)?;
        let depth = defect[3] as f32 / 256.0;

        candidates.push(DefectCandidate::new(
            Point::new(start.x * scale, start.y * scale),
            Point::new(far.x * scale, far.y * scale),
            depth * scale as f32,
        ));
    }

    Ok(candidates)
}

pub fn to_moments(m: &core::Moments) -> Moments {
    Moments {
        m00: m.m00,
        m10: m.m10,
        m01: m.m01,
        mu11: m.mu11,
        mu20: m.mu20,
        mu02: m.mu02,
    }
}
