//! Spur gear: straight involute teeth, parallel-axis meshing.

use gt_core::{GtResult, ensure_positive};
use gt_geom::{Cylinder, GeomResult, UnitVector};

use super::{
    ChildPlacement, GearBody, GearGeometry, GearKind, GearVariant, ensure_pressure_angle,
    ensure_teeth,
};

/// Radii of a spur gear derived from tooth count and diametral pitch.
///
/// ```text
/// pitch diameter  D  = N / P
/// base radius     rb = D·cos(φ) / 2
/// addendum radius ra = (N + 2) / P / 2
/// root radius     rr = (N − 2) / P / 2
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SpurGeometry {
    diametral_pitch: f64,
    pitch_circle_diameter: f64,
    base_circle_radius: f64,
    addendum_circle_radius: f64,
    addendum_angle: f64,
    root_radius: f64,
}

impl SpurGeometry {
    /// # Errors
    /// `Validation` for fewer than 4 teeth, a non-positive pitch or a
    /// pressure angle outside (0°, 90°).
    pub fn new(teeth: u32, diametral_pitch: f64, pressure_angle: f64) -> GtResult<Self> {
        let teeth = f64::from(ensure_teeth(teeth)?);
        let pitch = ensure_positive(diametral_pitch, "diametral pitch must be positive")?;
        let pressure_angle = ensure_pressure_angle(pressure_angle)?;

        let pitch_circle_diameter = teeth / pitch;
        let base_circle_radius = pitch_circle_diameter * pressure_angle.cos() / 2.0;
        let addendum_circle_radius = (teeth + 2.0) / pitch / 2.0;
        let addendum_angle = (addendum_circle_radius * addendum_circle_radius
            - base_circle_radius * base_circle_radius)
            .sqrt()
            / base_circle_radius;
        let root_radius = (teeth - 2.0) / pitch / 2.0;

        Ok(Self {
            diametral_pitch: pitch,
            pitch_circle_diameter,
            base_circle_radius,
            addendum_circle_radius,
            addendum_angle,
            root_radius,
        })
    }

    pub fn diametral_pitch(&self) -> f64 {
        self.diametral_pitch
    }

    pub fn pitch_circle_diameter(&self) -> f64 {
        self.pitch_circle_diameter
    }

    /// Involute roll angle at the addendum circle, used to draw the flank.
    pub fn addendum_angle(&self) -> f64 {
        self.addendum_angle
    }
}

impl GearGeometry for SpurGeometry {
    fn kind(&self) -> GearKind {
        GearKind::Spur
    }

    fn pitch_radius(&self) -> f64 {
        self.pitch_circle_diameter / 2.0
    }

    fn base_radius(&self) -> f64 {
        self.base_circle_radius
    }

    fn addendum_radius(&self) -> f64 {
        self.addendum_circle_radius
    }

    fn root_radius(&self) -> f64 {
        self.root_radius
    }

    fn bounding_cylinder(&self, body: &GearBody) -> GeomResult<Cylinder> {
        Cylinder::new(
            body.position,
            body.axis.into_inner(),
            self.addendum_circle_radius,
            body.width,
        )
    }

    fn mesh_child(
        &self,
        driver: &GearBody,
        direction: &UnitVector,
        teeth: u32,
    ) -> GtResult<ChildPlacement> {
        let geometry = SpurGeometry::new(teeth, self.diametral_pitch, driver.pressure_angle)?;
        let distance = (f64::from(driver.teeth) + f64::from(teeth)) / self.diametral_pitch / 2.0;
        Ok(ChildPlacement {
            teeth,
            position: driver.position + direction.into_inner() * distance,
            axis: driver.axis,
            up: driver.up,
            variant: GearVariant::Spur(geometry),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;

    #[test]
    fn textbook_radii() {
        // 20 teeth, P = 2: D = 10
        let g = SpurGeometry::new(20, 2.0, PI / 9.0).unwrap();
        assert!((g.pitch_circle_diameter() - 10.0).abs() < 1e-12);
        assert!((g.pitch_radius() - 5.0).abs() < 1e-12);
        assert!((g.addendum_radius() - 5.5).abs() < 1e-12);
        assert!((g.root_radius() - 4.5).abs() < 1e-12);
        assert!((g.base_radius() - 5.0 * (PI / 9.0).cos()).abs() < 1e-12);
        assert!(g.addendum_angle() > 0.0);
    }

    #[test]
    fn mesh_distance_with_extreme_tooth_count() {
        use crate::shaft::Rotation;
        use gt_geom::{Point, Vector};

        let driver = GearBody {
            teeth: 20,
            width: 2.0,
            pressure_angle: PI / 9.0,
            inner_radius: 1.0,
            position: Point::origin(),
            axis: UnitVector::new_normalize(Vector::z()),
            up: UnitVector::new_normalize(Vector::y()),
            speed: 1.0,
            phase: 0.0,
            rotation: Rotation::Clockwise,
        };
        let g = SpurGeometry::new(20, 1.0, PI / 9.0).unwrap();
        let x = UnitVector::new_normalize(Vector::x());
        let placement = g.mesh_child(&driver, &x, u32::MAX).unwrap();
        let expected = (20.0 + f64::from(u32::MAX)) / 2.0;
        assert!((placement.position.x - expected).abs() <= 1e-9 * expected);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(SpurGeometry::new(3, 2.0, PI / 9.0).is_err());
        assert!(SpurGeometry::new(12, 0.0, PI / 9.0).is_err());
        assert!(SpurGeometry::new(12, 1.0, PI / 2.0).is_err());
    }
}
