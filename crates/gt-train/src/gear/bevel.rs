//! Bevel gear: conical teeth, right-angle meshing about a shared cone apex.

use gt_core::{GtError, GtResult, ensure_positive};
use gt_geom::{Cylinder, GeomResult, Point, UnitVector};

use super::{
    ChildPlacement, GearBody, GearGeometry, GearKind, GearVariant, ensure_pressure_angle,
    ensure_teeth,
};

/// Geometry of a bevel gear designed to mate at 90° with a gear of
/// `child_teeth` teeth.
///
/// The body's `position` is the center of the pitch circle at the back
/// (large) end and `axis` points toward the cone apex.
///
/// ```text
/// pitch radius      R  = N / P / 2
/// pitch cone angle  δ  = atan(N / Nc)
/// cone distance     A  = sqrt(R² + Rc²)
/// addendum radius   ra = R + cos δ / P
/// root radius       rr = R − cos δ / P
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct BevelGeometry {
    diametral_pitch: f64,
    child_teeth: u32,
    pitch_radius: f64,
    mate_pitch_radius: f64,
    pitch_cone_angle: f64,
    cone_distance: f64,
    base_circle_radius: f64,
    addendum_circle_radius: f64,
    root_radius: f64,
}

impl BevelGeometry {
    /// # Errors
    /// `Validation` for fewer than 4 teeth on either cone, a non-positive
    /// pitch or a pressure angle outside (0°, 90°).
    pub fn new(
        teeth: u32,
        child_teeth: u32,
        diametral_pitch: f64,
        pressure_angle: f64,
    ) -> GtResult<Self> {
        let n = f64::from(ensure_teeth(teeth)?);
        let child_teeth = ensure_teeth(child_teeth)?;
        let nc = f64::from(child_teeth);
        let pitch = ensure_positive(diametral_pitch, "diametral pitch must be positive")?;
        let pressure_angle = ensure_pressure_angle(pressure_angle)?;

        let pitch_radius = n / pitch / 2.0;
        let mate_pitch_radius = nc / pitch / 2.0;
        let pitch_cone_angle = n.atan2(nc);
        let addendum = pitch_cone_angle.cos() / pitch;

        Ok(Self {
            diametral_pitch: pitch,
            child_teeth,
            pitch_radius,
            mate_pitch_radius,
            pitch_cone_angle,
            cone_distance: pitch_radius.hypot(mate_pitch_radius),
            base_circle_radius: pitch_radius * pressure_angle.cos(),
            addendum_circle_radius: pitch_radius + addendum,
            root_radius: pitch_radius - addendum,
        })
    }

    pub fn diametral_pitch(&self) -> f64 {
        self.diametral_pitch
    }

    /// Tooth count of the mating gear this cone was cut for.
    pub fn child_teeth(&self) -> u32 {
        self.child_teeth
    }

    pub fn pitch_cone_angle(&self) -> f64 {
        self.pitch_cone_angle
    }

    pub fn cone_distance(&self) -> f64 {
        self.cone_distance
    }

    /// Cone apex for a gear with this geometry at `body`'s pose.
    pub fn apex(&self, body: &GearBody) -> Point {
        // R / tan δ reduces to the mate's pitch radius
        body.position + body.axis.into_inner() * self.mate_pitch_radius
    }
}

impl GearGeometry for BevelGeometry {
    fn kind(&self) -> GearKind {
        GearKind::Bevel
    }

    fn pitch_radius(&self) -> f64 {
        self.pitch_radius
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

    fn validate_body(&self, body: &GearBody) -> GtResult<()> {
        if body.width >= self.cone_distance {
            return Err(GtError::Validation {
                what: "bevel face width must be shorter than the cone distance",
            });
        }
        Ok(())
    }

    fn bounding_cylinder(&self, body: &GearBody) -> GeomResult<Cylinder> {
        // the toothed face runs from the back cone toward the apex
        let center = body.position + body.axis.into_inner() * (body.width / 2.0);
        Cylinder::new(
            center,
            body.axis.into_inner(),
            self.addendum_circle_radius,
            body.width,
        )
    }

    fn mesh_child(
        &self,
        driver: &GearBody,
        direction: &UnitVector,
        _teeth: u32,
    ) -> GtResult<ChildPlacement> {
        let geometry = BevelGeometry::new(
            self.child_teeth,
            driver.teeth,
            self.diametral_pitch,
            driver.pressure_angle,
        )?;
        let position = driver.position
            + direction.into_inner() * self.pitch_radius
            + driver.axis.into_inner() * geometry.pitch_radius;
        Ok(ChildPlacement {
            teeth: self.child_teeth,
            position,
            axis: UnitVector::new_unchecked(-direction.into_inner()),
            up: driver.axis,
            variant: GearVariant::Bevel(geometry),
        })
    }
}
