//! Angle helpers shared by the pipeline stages.
//! Trigonometry goes through `libm` so the crate works without `std`.

use handy_shared::Point;

/// Round to the nearest integer, ties toward positive infinity
pub fn round_half_up(value: f64) -> i64 {
    libm::floor(value + 0.5) as i64
}

/// `atan2(y, x)` in degrees
pub fn degrees_atan2(y: f64, x: f64) -> f64 {
    libm::atan2(y, x).to_degrees()
}

/// Angle in whole degrees between the bearings from `tip` to `a` and from
/// `tip` to `b`.
///
/// Bearings are measured from the image's +y axis (`atan2(dx, dy)`) and the
/// difference is not folded back into 0-180.
pub fn angle_between(tip: Point, a: Point, b: Point) -> i32 {
    let bearing_a = degrees_atan2((a.x - tip.x) as f64, (a.y - tip.y) as f64);
    let bearing_b = degrees_atan2((b.x - tip.x) as f64, (b.y - tip.y) as f64);
    round_half_up(bearing_a - bearing_b).abs() as i32
}

/// Angle of `tip` around `cog` with y flipped to point up the screen,
/// rotated so that the hand's main axis (`tilt`) points to 90 degrees
pub fn angle_to_cog(tip: Point, cog: Point, tilt: i32) -> i32 {
    let y_offset = cog.y - tip.y;
    let x_offset = tip.x - cog.x;
    let angle_tip = round_half_up(degrees_atan2(y_offset as f64, x_offset as f64)) as i32;
    angle_tip + (90 - tilt)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(2.49), 2);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(-2.51), -3);
    }

    #[test]
    fn test_angle_between_narrow_notch() {
        // Folds 10 px to either side, 40 px below the tip
        let tip = Point::new(100, 100);
        let left = Point::new(90, 140);
        let right = Point::new(110, 140);
        let angle = angle_between(tip, left, right);
        assert_eq!(angle, 28);
        assert_eq!(angle_between(tip, right, left), 28);
    }

    #[test]
    fn test_angle_between_right_angle() {
        let tip = Point::new(0, 0);
        assert_eq!(angle_between(tip, Point::new(10, 0), Point::new(0, 10)), 90);
    }

    #[test]
    fn test_angle_to_cog_upright_hand() {
        let cog = Point::new(200, 200);
        // straight above the COG, hand axis pointing up
        assert_eq!(angle_to_cog(Point::new(200, 100), cog, 90), 90);
        // to the right of the COG
        assert_eq!(angle_to_cog(Point::new(300, 200), cog, 90), 0);
        // to the left
        assert_eq!(angle_to_cog(Point::new(100, 200), cog, 90), 180);
    }

    #[test]
    fn test_angle_to_cog_applies_tilt() {
        let cog = Point::new(200, 200);
        // tip up-right at 45 degrees, hand tilted to 45 degrees: now straight up
        assert_eq!(angle_to_cog(Point::new(300, 100), cog, 45), 90);
    }
}
