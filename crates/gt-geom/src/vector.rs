//! Vector helpers shared by the meshing and picking code.

use crate::{Point, UnitVector, Vector};

const SEGMENT_EPS: f64 = 1e-12;

/// Project `point` onto the line through `origin` along `axis`.
///
/// Returns the projected point and its signed distance from `origin`.
pub fn project_onto_axis(point: &Point, origin: &Point, axis: &UnitVector) -> (Point, f64) {
    let t = axis.dot(&(point - origin));
    (origin + axis.into_inner() * t, t)
}

/// Remove the component of `v` along `normal`.
pub fn project_onto_plane(v: &Vector, normal: &UnitVector) -> Vector {
    v - normal.into_inner() * normal.dot(v)
}

/// Unsigned angle between `from` and `to`, negated when `from × to` points
/// against `axis`.
pub fn signed_angle(from: &UnitVector, to: &UnitVector, axis: &UnitVector) -> f64 {
    let to = to.into_inner();
    let cross = from.cross(&to);
    // atan2 form of acos(from·to): exact zero for identical inputs
    let angle = cross.norm().atan2(from.dot(&to));
    if axis.dot(&cross) < 0.0 {
        -angle
    } else {
        angle
    }
}

/// A unit vector perpendicular to `axis`.
///
/// World +Y projected onto the plane normal to `axis`, so that gears on the
/// default +Z axis get +Y. Falls back to world +X when `axis` is along Y.
pub fn any_perpendicular(axis: &UnitVector) -> UnitVector {
    let from_y = project_onto_plane(&Vector::y(), axis);
    if let Some(up) = UnitVector::try_new(from_y, 1e-6) {
        return up;
    }
    let from_x = project_onto_plane(&Vector::x(), axis);
    // axis is (anti)parallel to Y here, so X is already perpendicular
    UnitVector::new_normalize(from_x)
}

/// Closest points between segments `p1q1` and `p2q2`.
pub fn closest_points_on_segments(p1: &Point, q1: &Point, p2: &Point, q2: &Point) -> (Point, Point) {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let r = p1 - p2;
    let a = d1.dot(&d1);
    let e = d2.dot(&d2);
    let f = d2.dot(&r);

    if a <= SEGMENT_EPS && e <= SEGMENT_EPS {
        return (*p1, *p2);
    }

    let s;
    let t;
    if a <= SEGMENT_EPS {
        s = 0.0;
        t = (f / e).clamp(0.0, 1.0);
    } else {
        let c = d1.dot(&r);
        if e <= SEGMENT_EPS {
            t = 0.0;
            s = (-c / a).clamp(0.0, 1.0);
        } else {
            let b = d1.dot(&d2);
            let denom = a * e - b * b;
            let s0 = if denom > SEGMENT_EPS {
                ((b * f - c * e) / denom).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let t0 = (b * s0 + f) / e;
            if t0 < 0.0 {
                t = 0.0;
                s = (-c / a).clamp(0.0, 1.0);
            } else if t0 > 1.0 {
                t = 1.0;
                s = ((b - c) / a).clamp(0.0, 1.0);
            } else {
                t = t0;
                s = s0;
            }
        }
    }

    (p1 + d1 * s, p2 + d2 * t)
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::FRAC_PI_2;

    #[test]
    fn projection_onto_offset_axis() {
        let origin = Point::new(1.0, 2.0, 0.0);
        let axis = UnitVector::new_normalize(Vector::z());
        let (p, t) = project_onto_axis(&Point::new(5.0, -3.0, 4.0), &origin, &axis);
        assert_eq!(p, Point::new(1.0, 2.0, 4.0));
        assert_eq!(t, 4.0);
    }

    #[test]
    fn signed_angle_follows_axis() {
        let x = UnitVector::new_normalize(Vector::x());
        let y = UnitVector::new_normalize(Vector::y());
        let z = UnitVector::new_normalize(Vector::z());
        assert!((signed_angle(&x, &y, &z) - FRAC_PI_2).abs() < 1e-12);
        assert!((signed_angle(&y, &x, &z) + FRAC_PI_2).abs() < 1e-12);
        assert_eq!(signed_angle(&y, &y, &z), 0.0);
    }

    #[test]
    fn perpendicular_prefers_world_y() {
        let z = UnitVector::new_normalize(Vector::z());
        assert!((any_perpendicular(&z).into_inner() - Vector::y()).norm() < 1e-12);

        let y = UnitVector::new_normalize(Vector::y());
        let up = any_perpendicular(&y);
        assert!(up.dot(&y.into_inner()).abs() < 1e-12);

        let skew = UnitVector::new_normalize(Vector::new(1.0, 1.0, 1.0));
        assert!(any_perpendicular(&skew).dot(&skew.into_inner()).abs() < 1e-12);
    }

    #[test]
    fn closest_points_crossing_segments() {
        let (a, b) = closest_points_on_segments(
            &Point::new(-1.0, 0.0, 0.0),
            &Point::new(1.0, 0.0, 0.0),
            &Point::new(0.0, -1.0, 2.0),
            &Point::new(0.0, 1.0, 2.0),
        );
        assert!((a - Point::origin()).norm() < 1e-12);
        assert!((b - Point::new(0.0, 0.0, 2.0)).norm() < 1e-12);
    }

    #[test]
    fn closest_points_clamped_to_ends() {
        let (a, b) = closest_points_on_segments(
            &Point::new(0.0, 0.0, 0.0),
            &Point::new(1.0, 0.0, 0.0),
            &Point::new(3.0, 1.0, 0.0),
            &Point::new(3.0, 2.0, 0.0),
        );
        assert_eq!(a, Point::new(1.0, 0.0, 0.0));
        assert_eq!(b, Point::new(3.0, 1.0, 0.0));
    }
}
