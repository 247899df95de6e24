// gt-core/src/units.rs

use uom::si::f64::{Angle as UomAngle, AngularVelocity as UomAngularVelocity, Time as UomTime};

// Public canonical unit types (SI, f64)
pub type Angle = UomAngle;
pub type AngularVelocity = UomAngularVelocity;
pub type Time = UomTime;

#[inline]
pub fn s(v: f64) -> Time {
    use uom::si::time::second;
    Time::new::<second>(v)
}

#[inline]
pub fn ms(v: f64) -> Time {
    use uom::si::time::millisecond;
    Time::new::<millisecond>(v)
}

#[inline]
pub fn rad(v: f64) -> Angle {
    use uom::si::angle::radian;
    Angle::new::<radian>(v)
}

#[inline]
pub fn rad_per_s(v: f64) -> AngularVelocity {
    use uom::si::angular_velocity::radian_per_second;
    AngularVelocity::new::<radian_per_second>(v)
}

/// Seconds as a bare `f64`, for the phase arithmetic.
#[inline]
pub fn seconds(t: Time) -> f64 {
    use uom::si::time::second;
    t.get::<second>()
}

/// Milliseconds as a bare `f64`.
#[inline]
pub fn millis(t: Time) -> f64 {
    use uom::si::time::millisecond;
    t.get::<millisecond>()
}

/// Radians as a bare `f64`.
#[inline]
pub fn radians(a: Angle) -> f64 {
    use uom::si::angle::radian;
    a.get::<radian>()
}

pub mod constants {
    use core::f64::consts::PI;

    /// 20 degree involute pressure angle.
    pub const PRESSURE_ANGLE_RAD: f64 = PI / 9.0;

    /// 30 degree helix angle used when a helical request leaves it unset.
    pub const HELIX_ANGLE_RAD: f64 = PI / 6.0;
}
