//! Gear entities: the shared body plus the closed set of tooth geometries.

mod bevel;
mod helical;
mod spur;

pub use bevel::BevelGeometry;
pub use helical::{Hand, HelicalGeometry};
pub use spur::SpurGeometry;

use core::f64::consts::{PI, TAU};
use core::fmt;

use gt_core::{GearId, GtError, GtResult, ShaftId, normalize_angle};
use gt_geom::{Cylinder, GeomResult, Point, UnitVector, signed_angle};

use crate::shaft::Rotation;

/// Smallest tooth count any variant accepts.
pub const MIN_TEETH: u32 = 4;

/// Variant tag, for consumers that only need to classify a gear.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GearKind {
    Spur,
    Bevel,
    Helical,
}

impl fmt::Display for GearKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GearKind::Spur => "spur",
            GearKind::Bevel => "bevel",
            GearKind::Helical => "helical",
        };
        f.write_str(name)
    }
}

/// Pose and kinematic state shared by every gear variant.
#[derive(Clone, Debug, PartialEq)]
pub struct GearBody {
    pub teeth: u32,
    pub width: f64,
    pub pressure_angle: f64,
    /// Bore radius; equals the radius of the shaft the gear sits on.
    pub inner_radius: f64,
    pub position: Point,
    pub axis: UnitVector,
    /// Orientation reference, perpendicular to `axis`. Phase zero means a
    /// tooth is centered on this direction.
    pub up: UnitVector,
    /// Angular speed relative to a unit global speed (rad/s).
    pub speed: f64,
    /// Phase angle in `[0, 2π)`, measured in the gear's own rotation sense.
    pub phase: f64,
    pub rotation: Rotation,
}

/// Where and how a new gear sits when meshed onto a driver.
#[derive(Clone, Debug)]
pub struct ChildPlacement {
    pub teeth: u32,
    pub position: Point,
    pub axis: UnitVector,
    pub up: UnitVector,
    pub variant: GearVariant,
}

/// Per-variant geometry: radii, bounding solid and meshing rule.
pub trait GearGeometry {
    fn kind(&self) -> GearKind;

    fn pitch_radius(&self) -> f64;

    fn base_radius(&self) -> f64;

    fn addendum_radius(&self) -> f64;

    fn root_radius(&self) -> f64;

    /// Variant-specific checks on the body dimensions.
    fn validate_body(&self, _body: &GearBody) -> GtResult<()> {
        Ok(())
    }

    /// Bounding solid of a gear with this geometry at `body`'s pose.
    fn bounding_cylinder(&self, body: &GearBody) -> GeomResult<Cylinder>;

    /// Pose and geometry of a gear driven by `driver` along `direction`.
    ///
    /// `teeth` is already clamped to [`MIN_TEETH`]; variants whose mate is
    /// fixed by their own geometry may ignore it.
    fn mesh_child(
        &self,
        driver: &GearBody,
        direction: &UnitVector,
        teeth: u32,
    ) -> GtResult<ChildPlacement>;
}

/// The closed set of gear variants.
#[derive(Clone, Debug, PartialEq)]
pub enum GearVariant {
    Spur(SpurGeometry),
    Bevel(BevelGeometry),
    Helical(HelicalGeometry),
}

impl GearVariant {
    fn geometry(&self) -> &dyn GearGeometry {
        match self {
            GearVariant::Spur(g) => g,
            GearVariant::Bevel(g) => g,
            GearVariant::Helical(g) => g,
        }
    }

    pub fn kind(&self) -> GearKind {
        self.geometry().kind()
    }

    pub fn pitch_radius(&self) -> f64 {
        self.geometry().pitch_radius()
    }

    pub fn base_radius(&self) -> f64 {
        self.geometry().base_radius()
    }

    pub fn addendum_radius(&self) -> f64 {
        self.geometry().addendum_radius()
    }

    pub fn root_radius(&self) -> f64 {
        self.geometry().root_radius()
    }

    pub fn validate_body(&self, body: &GearBody) -> GtResult<()> {
        self.geometry().validate_body(body)
    }

    pub fn bounding_cylinder(&self, body: &GearBody) -> GeomResult<Cylinder> {
        self.geometry().bounding_cylinder(body)
    }

    pub fn mesh_child(
        &self,
        driver: &GearBody,
        direction: &UnitVector,
        teeth: u32,
    ) -> GtResult<ChildPlacement> {
        self.geometry().mesh_child(driver, direction, teeth)
    }
}

/// Phase of a gear driven by `driver` along `direction` so that its tooth
/// gap faces the driver's tooth at the moment of connection.
///
/// Picture the driven gear straight "above" the driver (along `up`): it is
/// turned half a revolution so its top tooth points down, then half a tooth
/// pitch so a gap sits on the driver's tooth. Driver rotation carries over
/// scaled by the tooth ratio. For any other direction both gears are first
/// turned back by the joint angle between `up` and `direction`.
pub fn mesh_phase(driver: &GearBody, direction: &UnitVector, teeth: u32) -> f64 {
    let mut joint = signed_angle(direction, &driver.up, &driver.axis);
    if driver.rotation == Rotation::CounterClockwise {
        joint = -joint;
    }
    let teeth = f64::from(teeth);
    let ratio = f64::from(driver.teeth) / teeth;
    normalize_angle(PI + TAU / teeth / 2.0 + (driver.phase - joint) * ratio - joint)
}

/// Angular speed of a gear with `teeth` driven by `driver`.
pub fn mesh_speed(driver: &GearBody, teeth: u32) -> f64 {
    driver.speed * f64::from(driver.teeth) / f64::from(teeth)
}

pub(crate) fn ensure_teeth(teeth: u32) -> GtResult<u32> {
    if teeth < MIN_TEETH {
        return Err(GtError::Validation {
            what: "gear needs at least 4 teeth",
        });
    }
    Ok(teeth)
}

pub(crate) fn ensure_pressure_angle(angle: f64) -> GtResult<f64> {
    if !(angle.is_finite() && angle > 0.0 && angle < PI / 2.0) {
        return Err(GtError::Validation {
            what: "pressure angle must lie strictly between 0 and 90 degrees",
        });
    }
    Ok(angle)
}

/// A gear mounted on exactly one shaft, optionally driven by a parent gear.
#[derive(Clone, Debug)]
pub struct Gear {
    id: GearId,
    shaft: ShaftId,
    parent: Option<GearId>,
    children: Vec<GearId>,
    body: GearBody,
    variant: GearVariant,
    bounds: Cylinder,
}

impl Gear {
    /// Validate the bore against the tooth root and derive the bounding solid.
    ///
    /// # Errors
    /// `Validation` when the root radius does not clear the bore or the body
    /// dimensions are not positive.
    pub(crate) fn new(
        id: GearId,
        shaft: ShaftId,
        parent: Option<GearId>,
        body: GearBody,
        variant: GearVariant,
    ) -> GtResult<Self> {
        gt_core::ensure_positive(body.width, "gear width must be positive")?;
        gt_core::ensure_positive(body.inner_radius, "gear bore must be positive")?;
        if variant.root_radius() <= body.inner_radius {
            return Err(GtError::BORE_TOO_LARGE);
        }
        variant.validate_body(&body)?;
        let bounds = variant.bounding_cylinder(&body)?;
        Ok(Self {
            id,
            shaft,
            parent,
            children: Vec::new(),
            body,
            variant,
            bounds,
        })
    }

    pub fn id(&self) -> GearId {
        self.id
    }

    pub fn kind(&self) -> GearKind {
        self.variant.kind()
    }

    /// The shaft this gear is mounted on.
    pub fn shaft(&self) -> ShaftId {
        self.shaft
    }

    /// The gear whose meshing created this one, if any.
    pub fn parent(&self) -> Option<GearId> {
        self.parent
    }

    /// Gears meshed onto this one, in creation order.
    pub fn children(&self) -> &[GearId] {
        &self.children
    }

    pub fn body(&self) -> &GearBody {
        &self.body
    }

    pub fn variant(&self) -> &GearVariant {
        &self.variant
    }

    pub fn teeth(&self) -> u32 {
        self.body.teeth
    }

    pub fn width(&self) -> f64 {
        self.body.width
    }

    pub fn position(&self) -> Point {
        self.body.position
    }

    pub fn axis(&self) -> UnitVector {
        self.body.axis
    }

    pub fn up(&self) -> UnitVector {
        self.body.up
    }

    pub fn speed(&self) -> f64 {
        self.body.speed
    }

    pub fn phase(&self) -> f64 {
        self.body.phase
    }

    pub fn rotation(&self) -> Rotation {
        self.body.rotation
    }

    pub fn inner_radius(&self) -> f64 {
        self.body.inner_radius
    }

    pub fn pitch_radius(&self) -> f64 {
        self.variant.pitch_radius()
    }

    pub fn base_radius(&self) -> f64 {
        self.variant.base_radius()
    }

    pub fn addendum_radius(&self) -> f64 {
        self.variant.addendum_radius()
    }

    pub fn root_radius(&self) -> f64 {
        self.variant.root_radius()
    }

    pub fn bounding_cylinder(&self) -> &Cylinder {
        &self.bounds
    }

    /// Speed with the rotation sense folded in (counter-clockwise positive).
    pub fn signed_speed(&self) -> f64 {
        self.body.speed * self.body.rotation.sign()
    }

    /// Rotation about `axis` to apply when drawing the gear.
    pub fn world_angle(&self) -> f64 {
        self.body.phase * self.body.rotation.sign()
    }

    pub(crate) fn push_child(&mut self, child: GearId) {
        self.children.push(child);
    }

    pub(crate) fn retain_children(&mut self, keep: impl FnMut(&GearId) -> bool) {
        self.children.retain(keep);
    }

    pub(crate) fn advance(&mut self, step: f64) {
        self.body.phase = normalize_angle(self.body.phase + self.body.speed * step);
    }
}
