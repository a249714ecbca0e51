//! # Planar geometry
//!
//! Distance and angle functions used to compute the steering error. All angles are in radians in
//! the world frame, measured counter-clockwise from the +X axis.

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use nalgebra::{Point2, Vector2, Vector3};
use util::maths::wrap_pi;

// ---------------------------------------------------------------------------
// FUNCTIONS
// ---------------------------------------------------------------------------

/// Euclidean length of the vector `(dx, dy)`.
pub fn distance(dx: f64, dy: f64) -> f64 {
    Vector2::new(dx, dy).norm()
}

/// Angle of the line from `from` to `to`, in (-pi, pi].
pub fn bearing_angle(from: &Point2<f64>, to: &Point2<f64>) -> f64 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Angle of a heading vector projected onto the XY plane, in (-pi, pi].
pub fn heading_angle(heading: &Vector3<f64>) -> f64 {
    heading.y.atan2(heading.x)
}

/// Signed angle to turn through to go from `heading_rad` to `bearing_rad`.
///
/// The result is `bearing - heading` wrapped into (-pi, pi]. Positive errors require a
/// counter-clockwise turn. Both inputs must be in (-pi, pi].
pub fn angle_error(heading_rad: f64, bearing_rad: f64) -> f64 {
    wrap_pi(bearing_rad - heading_rad)
}

#[cfg(test)]
mod test {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_distance() {
        assert!((distance(3.0, 4.0) - 5.0).abs() < 1e-12);
        assert_eq!(distance(0.0, 0.0), 0.0);
        assert!((distance(-3.0, -4.0) - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_bearing_angle() {
        let origin = Point2::new(0.0, 0.0);

        assert_eq!(bearing_angle(&origin, &Point2::new(1.0, 0.0)), 0.0);
        assert!((bearing_angle(&origin, &Point2::new(0.0, 2.0)) - PI / 2.0).abs() < 1e-12);
        assert!((bearing_angle(&origin, &Point2::new(-1.0, 0.0)) - PI).abs() < 1e-12);
        assert!(
            (bearing_angle(&Point2::new(1.0, 1.0), &Point2::new(0.0, 0.0)) + 3.0 * PI / 4.0).abs()
            < 1e-12
        );
    }

    #[test]
    fn test_heading_angle() {
        assert_eq!(heading_angle(&Vector3::new(1.0, 0.0, 0.0)), 0.0);
        assert!((heading_angle(&Vector3::new(0.0, -1.0, 0.0)) + PI / 2.0).abs() < 1e-12);
        // Z is ignored
        assert_eq!(
            heading_angle(&Vector3::new(0.5, 0.5, 0.7)),
            heading_angle(&Vector3::new(0.5, 0.5, 0.0))
        );
    }

    #[test]
    fn test_geometry_is_pure() {
        let a = Point2::new(0.3, -1.2);
        let b = Point2::new(-4.5, 2.25);
        let h = Vector3::new(-0.6, 0.8, 0.0);

        let first = (bearing_angle(&a, &b), heading_angle(&h));
        for _ in 0..10 {
            assert_eq!((bearing_angle(&a, &b), heading_angle(&h)), first);
        }
    }

    #[test]
    fn test_angle_error_wraps() {
        // Raw difference of -6 is outside the range so one turn is added
        let err = angle_error(3.0, -3.0);
        assert!((err - (-6.0 + 2.0 * PI)).abs() < 1e-12);
        assert!((err - 0.2832).abs() < 1e-4);

        // And the other way round
        assert!((angle_error(-3.0, 3.0) - (6.0 - 2.0 * PI)).abs() < 1e-12);

        // Small errors are untouched
        assert_eq!(angle_error(0.25, 0.75), 0.5);
        assert_eq!(angle_error(0.75, 0.25), -0.5);
    }

    #[test]
    fn test_angle_error_boundaries() {
        // Exactly +pi is kept, exactly -pi maps onto +pi
        assert_eq!(angle_error(0.0, PI), PI);
        assert_eq!(angle_error(PI, 0.0), PI);
    }

    #[test]
    fn test_angle_error_range() {
        const STEPS: usize = 72;

        // Sample (-pi, pi] on a grid, including the +pi end
        let angles: Vec<f64> = (1..=STEPS)
            .map(|i| -PI + 2.0 * PI * (i as f64) / (STEPS as f64))
            .collect();

        for heading in angles.iter() {
            for bearing in angles.iter() {
                let err = angle_error(*heading, *bearing);
                assert!(
                    err > -PI && err <= PI,
                    "angle_error({}, {}) = {} is out of range",
                    heading, bearing, err
                );
            }
        }
    }
}
