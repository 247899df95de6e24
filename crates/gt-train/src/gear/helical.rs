//! Helical gear: teeth wound at a helix angle, parallel-axis meshing with a
//! gear of the opposite hand.

use core::f64::consts::{FRAC_PI_2, PI};

use gt_core::{GtError, GtResult, ensure_positive};
use gt_geom::{Cylinder, GeomResult, UnitVector};

use super::{
    ChildPlacement, GearBody, GearGeometry, GearKind, GearVariant, ensure_pressure_angle,
    ensure_teeth,
};

/// Handedness of the helix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Hand {
    Left,
    #[default]
    Right,
}

impl Hand {
    /// Parallel-axis helical gears only mesh with the opposite hand.
    pub fn opposite(self) -> Hand {
        match self {
            Hand::Left => Hand::Right,
            Hand::Right => Hand::Left,
        }
    }
}

/// Radii of a helical gear, specified by its normal diametral pitch.
///
/// ```text
/// transverse pitch   Pt = Pn·cos ψ
/// pitch diameter     D  = N / Pt
/// transverse φt      = atan(tan φn / cos ψ)
/// base radius        rb = D·cos(φt) / 2
/// addendum radius    ra = D/2 + 1/Pn
/// root radius        rr = D/2 − 1/Pn
/// lead               L  = π·D / tan ψ
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct HelicalGeometry {
    normal_diametral_pitch: f64,
    helix_angle: f64,
    hand: Hand,
    transverse_pitch: f64,
    transverse_pressure_angle: f64,
    pitch_circle_diameter: f64,
    base_circle_radius: f64,
    addendum_circle_radius: f64,
    root_radius: f64,
    lead: f64,
}

impl HelicalGeometry {
    /// # Errors
    /// `Validation` for fewer than 4 teeth, a non-positive pitch, or a helix
    /// or pressure angle outside (0°, 90°).
    pub fn new(
        teeth: u32,
        normal_diametral_pitch: f64,
        helix_angle: f64,
        hand: Hand,
        pressure_angle: f64,
    ) -> GtResult<Self> {
        let teeth = f64::from(ensure_teeth(teeth)?);
        let pn = ensure_positive(
            normal_diametral_pitch,
            "normal diametral pitch must be positive",
        )?;
        if !(helix_angle.is_finite() && helix_angle > 0.0 && helix_angle < FRAC_PI_2) {
            return Err(GtError::Validation {
                what: "helix angle must lie strictly between 0 and 90 degrees",
            });
        }
        let pressure_angle = ensure_pressure_angle(pressure_angle)?;

        let transverse_pitch = pn * helix_angle.cos();
        let transverse_pressure_angle = (pressure_angle.tan() / helix_angle.cos()).atan();
        let pitch_circle_diameter = teeth / transverse_pitch;
        let pitch_radius = pitch_circle_diameter / 2.0;

        Ok(Self {
            normal_diametral_pitch: pn,
            helix_angle,
            hand,
            transverse_pitch,
            transverse_pressure_angle,
            pitch_circle_diameter,
            base_circle_radius: pitch_radius * transverse_pressure_angle.cos(),
            addendum_circle_radius: pitch_radius + 1.0 / pn,
            root_radius: pitch_radius - 1.0 / pn,
            lead: PI * pitch_circle_diameter / helix_angle.tan(),
        })
    }

    pub fn normal_diametral_pitch(&self) -> f64 {
        self.normal_diametral_pitch
    }

    pub fn helix_angle(&self) -> f64 {
        self.helix_angle
    }

    pub fn hand(&self) -> Hand {
        self.hand
    }

    pub fn transverse_pitch(&self) -> f64 {
        self.transverse_pitch
    }

    pub fn transverse_pressure_angle(&self) -> f64 {
        self.transverse_pressure_angle
    }

    pub fn pitch_circle_diameter(&self) -> f64 {
        self.pitch_circle_diameter
    }

    /// Axial advance of one full turn of a tooth.
    pub fn lead(&self) -> f64 {
        self.lead
    }
}

impl GearGeometry for HelicalGeometry {
    fn kind(&self) -> GearKind {
        GearKind::Helical
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
        let geometry = HelicalGeometry::new(
            teeth,
            self.normal_diametral_pitch,
            self.helix_angle,
            self.hand.opposite(),
            driver.pressure_angle,
        )?;
        let distance = (f64::from(driver.teeth) + f64::from(teeth)) / self.transverse_pitch / 2.0;
        Ok(ChildPlacement {
            teeth,
            position: driver.position + direction.into_inner() * distance,
            axis: driver.axis,
            up: driver.up,
            variant: GearVariant::Helical(geometry),
        })
    }
}
