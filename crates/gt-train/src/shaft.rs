//! Rotating shafts.

use gt_core::{
    AngularVelocity, GearId, GtError, GtResult, ShaftId, ensure_finite, normalize_angle, rad_per_s,
};
use gt_geom::{Cylinder, Point, UnitVector, Vector};

/// Rotation sense about an entity's own axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    Clockwise,
    CounterClockwise,
}

impl Rotation {
    /// Meshing gears counter-rotate.
    pub fn opposite(self) -> Rotation {
        match self {
            Rotation::Clockwise => Rotation::CounterClockwise,
            Rotation::CounterClockwise => Rotation::Clockwise,
        }
    }

    /// Right-hand rule about the axis: counter-clockwise is positive.
    pub fn sign(self) -> f64 {
        match self {
            Rotation::Clockwise => -1.0,
            Rotation::CounterClockwise => 1.0,
        }
    }

    pub fn is_clockwise(self) -> bool {
        self == Rotation::Clockwise
    }
}

/// Construction parameters for a shaft.
#[derive(Clone, Debug, PartialEq)]
pub struct ShaftParams {
    /// Center of the shaft.
    pub position: Point,
    /// Direction of the centerline; normalized on construction.
    pub axis: Vector,
    pub radius: f64,
    pub length: f64,
    /// Angular speed relative to a unit global speed (rad/s).
    pub speed: f64,
    /// Initial phase angle (rad).
    pub phase: f64,
    pub rotation: Rotation,
    /// Cumulative gear ratio from the train's driver shaft.
    pub total_ratio: f64,
}

impl Default for ShaftParams {
    /// The driver shaft of a fresh train: on +Z through the origin.
    fn default() -> Self {
        Self {
            position: Point::origin(),
            axis: Vector::z(),
            radius: 5.0,
            length: 20.0,
            speed: 1.0,
            phase: 0.0,
            rotation: Rotation::Clockwise,
            total_ratio: 1.0,
        }
    }
}

/// A rotating rod carrying zero or more coaxial gears.
///
/// Every gear on a shaft shares its axis, speed and rotation sense. The
/// shaft's pose never changes after construction; only the phase advances.
#[derive(Clone, Debug)]
pub struct Shaft {
    id: ShaftId,
    bounds: Cylinder,
    speed: f64,
    phase: f64,
    rotation: Rotation,
    total_ratio: f64,
    /// Gear whose meshing created this shaft; `None` for the train's driver.
    driver: Option<GearId>,
    gears: Vec<GearId>,
}

impl Shaft {
    /// Create a new shaft.
    ///
    /// # Errors
    /// Returns error if the axis is zero, the radius or length is not
    /// positive, or any kinematic value is not finite.
    pub(crate) fn new(id: ShaftId, params: &ShaftParams, driver: Option<GearId>) -> GtResult<Self> {
        let bounds = Cylinder::new(params.position, params.axis, params.radius, params.length)?;
        let speed = ensure_finite(params.speed, "shaft speed")?;
        let phase = ensure_finite(params.phase, "shaft phase")?;
        let total_ratio = ensure_finite(params.total_ratio, "shaft total ratio")?;
        if total_ratio <= 0.0 {
            return Err(GtError::Validation {
                what: "shaft total ratio must be positive",
            });
        }

        Ok(Self {
            id,
            bounds,
            speed,
            phase: normalize_angle(phase),
            rotation: params.rotation,
            total_ratio,
            driver,
            gears: Vec::new(),
        })
    }

    pub fn id(&self) -> ShaftId {
        self.id
    }

    pub fn position(&self) -> Point {
        self.bounds.center()
    }

    pub fn axis(&self) -> UnitVector {
        self.bounds.axis()
    }

    pub fn radius(&self) -> f64 {
        self.bounds.radius()
    }

    pub fn length(&self) -> f64 {
        self.bounds.length()
    }

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Speed as a typed quantity, sense folded in.
    pub fn angular_velocity(&self) -> AngularVelocity {
        rad_per_s(self.speed * self.rotation.sign())
    }

    pub fn phase(&self) -> f64 {
        self.phase
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn total_ratio(&self) -> f64 {
        self.total_ratio
    }

    pub fn driver(&self) -> Option<GearId> {
        self.driver
    }

    pub fn is_root(&self) -> bool {
        self.driver.is_none()
    }

    /// Mounted gears in insertion order.
    pub fn gears(&self) -> &[GearId] {
        &self.gears
    }

    pub fn bounding_cylinder(&self) -> &Cylinder {
        &self.bounds
    }

    /// Signed distance of `point`'s projection from the shaft center, if the
    /// projection lands within the shaft's length.
    pub fn axial_offset(&self, point: &Point) -> Option<f64> {
        let (_, t) = gt_geom::project_onto_axis(point, &self.position(), &self.axis());
        (t.abs() <= self.bounds.half_length()).then_some(t)
    }

    pub(crate) fn push_gear(&mut self, gear: GearId) {
        self.gears.push(gear);
    }

    /// Detach a directly mounted gear.
    ///
    /// # Errors
    /// `NotFound` if `gear` is not mounted on this shaft.
    pub(crate) fn remove_gear(&mut self, gear: GearId) -> GtResult<()> {
        let idx = self
            .gears
            .iter()
            .position(|g| *g == gear)
            .ok_or(GtError::NotFound {
                what: "gear on shaft",
                id: gear.index(),
            })?;
        self.gears.remove(idx);
        Ok(())
    }

    /// Rotate by this shaft's own speed over `step` (global speed × seconds).
    pub(crate) fn advance(&mut self, step: f64) {
        self.phase = normalize_angle(self.phase + self.speed * step);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::TAU;

    fn shaft(params: ShaftParams) -> GtResult<Shaft> {
        Shaft::new(ShaftId::from_index(0), &params, None)
    }

    #[test]
    fn default_shaft_is_valid() {
        let s = shaft(ShaftParams::default()).unwrap();
        assert!(s.is_root());
        assert_eq!(s.total_ratio(), 1.0);
        assert!(s.gears().is_empty());
        assert!((s.axis().into_inner() - Vector::z()).norm() < 1e-12);
    }

    #[test]
    fn rejects_zero_axis() {
        let params = ShaftParams {
            axis: Vector::zeros(),
            ..ShaftParams::default()
        };
        assert!(matches!(shaft(params), Err(GtError::Validation { .. })));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        for (radius, length) in [(0.0, 10.0), (1.0, 0.0), (-1.0, 5.0)] {
            let params = ShaftParams {
                radius,
                length,
                ..ShaftParams::default()
            };
            assert!(shaft(params).is_err());
        }
    }

    #[test]
    fn advance_wraps_phase() {
        let mut s = shaft(ShaftParams {
            speed: 2.0,
            ..ShaftParams::default()
        })
        .unwrap();
        s.advance(TAU);
        assert!(s.phase() < 1e-9 || (TAU - s.phase()) < 1e-9);
        s.advance(0.25);
        assert!((s.phase() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn axial_offset_respects_length() {
        let s = shaft(ShaftParams::default()).unwrap();
        assert_eq!(s.axial_offset(&Point::new(3.0, 1.0, 4.0)), Some(4.0));
        assert_eq!(s.axial_offset(&Point::new(0.0, 0.0, 10.5)), None);
    }

    #[test]
    fn remove_unknown_gear() {
        let mut s = shaft(ShaftParams::default()).unwrap();
        s.push_gear(GearId::from_index(1));
        assert!(s.remove_gear(GearId::from_index(2)).is_err());
        assert!(s.remove_gear(GearId::from_index(1)).is_ok());
        assert!(s.gears().is_empty());
    }

    #[test]
    fn rotation_sense() {
        assert_eq!(Rotation::Clockwise.opposite(), Rotation::CounterClockwise);
        assert_eq!(Rotation::Clockwise.sign(), -1.0);
        assert!(Rotation::default().is_clockwise());
    }
}
