use anyhow::Result;
use handy_client::{hand_tracker, HandTracker, TrackerConfig};
use handy_detector::{FingerName, HandDetector};
use handy_shared::{HsvCalibration, HsvRange, Point};
use opencv::{
    core::{self, Mat, Scalar, Vec4i, Vector, CV_8UC3},
    imgproc,
    prelude::*,
};

type CvPoint = core::Point;

const WIDTH: i32 = 640;
const HEIGHT: i32 = 480;

/// Thresholds matching the blue glove drawn below
fn blue_glove() -> HsvCalibration {
    HsvCalibration {
        hue: HsvRange::new(100, 140),
        saturation: HsvRange::new(100, 255),
        brightness: HsvRange::new(100, 255),
    }
}

fn glove_color() -> Scalar {
    Scalar::new(255.0, 0.0, 0.0, 0.0) // pure blue (BGR)
}

fn blank_image() -> Result<Mat> {
    let img = Mat::new_rows_cols_with_default(
        HEIGHT,
        WIDTH,
        CV_8UC3,
        Scalar::new(255.0, 255.0, 255.0, 0.0), // White background
    )?;
    Ok(img)
}

/// Draws an upright gloved hand: a round palm and five spread fingers
fn create_hand_image() -> Result<Mat> {
    let mut img = blank_image()?;
    let palm = core::Point::new(320, 320);

    imgproc::circle(&mut img, palm, 70, glove_color(), -1, imgproc::LINE_8, 0)?;

    for angle in [150.0f64, 110.0, 90.0, 70.0, 30.0] {
        let rad = angle.to_radians();
        let tip = core::Point::new(
            palm.x + (190.0 * rad.cos()) as i32,
            palm.y - (190.0 * rad.sin()) as i32,
        );
        imgproc::line(&mut img, palm, tip, glove_color(), 24, imgproc::LINE_8, 0)?;
        imgproc::circle(&mut img, tip, 12, glove_color(), -1, imgproc::LINE_8, 0)?;
    }

    Ok(img)
}

fn tracker() -> Result<HandTracker> {
    HandTracker::new(&blue_glove(), TrackerConfig::default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_hand_in_empty_image() -> Result<()> {
        let img = blank_image()?;
        assert!(tracker()?.process_frame(&img)?.is_none());
        Ok(())
    }

    #[test]
    fn test_small_blob_is_ignored() -> Result<()> {
        let mut img = blank_image()?;
        imgproc::circle(
            &mut img,
            core::Point::new(100, 100),
            10,
            glove_color(),
            -1,
            imgproc::LINE_8,
            0,
        )?;

        assert!(tracker()?.process_frame(&img)?.is_none());
        Ok(())
    }

    #[test]
    fn test_hand_geometry_is_extracted() -> Result<()> {
        let img = create_hand_image()?;
        let geometry = tracker()?
            .process_frame(&img)?
            .expect("hand should be segmented");

        assert!(geometry.moments.m00 > 0.0);

        // deep folds between the five fingers
        let deep = geometry
            .defects
            .iter()
            .filter(|d| d.depth >= 20.0)
            .count();
        assert!(deep >= 4, "only {} deep defects", deep);

        // defect points are scaled back to the full frame
        for d in &geometry.defects {
            assert!(d.tip.x >= 0 && d.tip.x <= WIDTH);
            assert!(d.tip.y >= 0 && d.tip.y <= HEIGHT);
            assert_eq!(d.tip.x % 2, 0);
            assert_eq!(d.fold.y % 2, 0);
        }

        Ok(())
    }

    #[test]
    fn test_detector_on_synthetic_hand() -> Result<()> {
        let img = create_hand_image()?;
        let tracker = tracker()?;
        let mut detector = HandDetector::new();

        for _ in 0..3 {
            let geometry = tracker
                .process_frame(&img)?
                .expect("hand should be segmented");
            let state = detector.update(&geometry);

            // centroid lies between the palm and the fingers
            assert!((state.cog.x - 320).abs() < 40, "cog {:?}", state.cog);
            assert!(state.cog.y > 150 && state.cog.y < 340, "cog {:?}", state.cog);

            assert!(!state.fingertips.is_empty());
            assert_eq!(state.fingertips.len(), state.names.len());
            for name in FingerName::CYCLE {
                assert!(state.names.iter().filter(|&&n| n == name).count() <= 1);
            }
        }

        Ok(())
    }

    #[test]
    fn test_degenerate_contour_is_skipped() -> Result<()> {
        // a straight stroke has no convex hull to take defects from
        let contour = Vector::<CvPoint>::from_iter([
            CvPoint::new(10, 10),
            CvPoint::new(200, 10),
        ]);
        assert!(tracker()?.contour_geometry(&contour)?.is_none());
        Ok(())
    }

    #[test]
    fn test_skipped_contour_keeps_fingertip_history() -> Result<()> {
        let tracker = tracker()?;
        let mut detector = HandDetector::new();

        let geometry = tracker
            .process_frame(&create_hand_image()?)?
            .expect("hand should be segmented");
        let before = detector.update(&geometry).clone();
        assert!(!before.fingertips.is_empty());

        let line = Vector::<CvPoint>::from_iter([CvPoint::new(0, 0), CvPoint::new(100, 0)]);
        let state = match tracker.contour_geometry(&line)? {
            Some(geometry) => detector.update(&geometry),
            None => detector.skip_frame(),
        };
        assert_eq!(*state, before);
        Ok(())
    }

    #[test]
    fn test_defect_candidates_are_scaled() -> Result<()> {
        let contour = Vector::<core::Point>::from_iter([
            core::Point::new(0, 0),
            core::Point::new(10, 0),
            core::Point::new(5, 5),
        ]);
        let defects = Vector::<Vec4i>::from_iter([Vec4i::new(0, 1, 2, 512)]);

        let candidates = hand_tracker::defect_candidates(&contour, &defects, 2)?;

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].tip, Point::new(0, 0));
        assert_eq!(candidates[0].fold, Point::new(10, 10));
        assert_eq!(candidates[0].depth, 4.0);
        Ok(())
    }

    #[test]
    fn test_defect_with_bad_index_is_an_error() -> Result<()> {
        let contour = Vector::<core::Point>::from_iter([core::Point::new(0, 0)]);
        let defects = Vector::<Vec4i>::from_iter([Vec4i::new(0, 1, 5, 512)]);

        assert!(hand_tracker::defect_candidates(&contour, &defects, 2).is_err());
        Ok(())
    }
}
