//! Parameters for creating gears.

use gt_core::GtResult;

use crate::gear::{
    BevelGeometry, GearKind, GearVariant, Hand, HelicalGeometry, MIN_TEETH, SpurGeometry,
};
use crate::options::TrainOptions;

/// A gear to mount directly on a shaft.
///
/// Pose, speed and bore come from the shaft; the pressure angle comes from
/// [`TrainOptions`].
#[derive(Clone, Debug, PartialEq)]
pub enum GearParams {
    Spur {
        teeth: u32,
        width: f64,
        diametral_pitch: f64,
    },
    Bevel {
        teeth: u32,
        width: f64,
        diametral_pitch: f64,
        /// Tooth count of the gear this one will drive at a right angle.
        child_teeth: u32,
    },
    Helical {
        teeth: u32,
        width: f64,
        normal_diametral_pitch: f64,
        /// Falls back to [`TrainOptions::helix_angle`].
        helix_angle: Option<f64>,
        hand: Hand,
    },
}

impl GearParams {
    pub fn spur(teeth: u32, width: f64, diametral_pitch: f64) -> Self {
        GearParams::Spur {
            teeth,
            width,
            diametral_pitch,
        }
    }

    pub fn bevel(teeth: u32, width: f64, diametral_pitch: f64, child_teeth: u32) -> Self {
        GearParams::Bevel {
            teeth,
            width,
            diametral_pitch,
            child_teeth,
        }
    }

    pub fn helical(teeth: u32, width: f64, normal_diametral_pitch: f64) -> Self {
        GearParams::Helical {
            teeth,
            width,
            normal_diametral_pitch,
            helix_angle: None,
            hand: Hand::default(),
        }
    }

    pub fn kind(&self) -> GearKind {
        match self {
            GearParams::Spur { .. } => GearKind::Spur,
            GearParams::Bevel { .. } => GearKind::Bevel,
            GearParams::Helical { .. } => GearKind::Helical,
        }
    }

    pub fn teeth(&self) -> u32 {
        match self {
            GearParams::Spur { teeth, .. }
            | GearParams::Bevel { teeth, .. }
            | GearParams::Helical { teeth, .. } => *teeth,
        }
    }

    pub fn width(&self) -> f64 {
        match self {
            GearParams::Spur { width, .. }
            | GearParams::Bevel { width, .. }
            | GearParams::Helical { width, .. } => *width,
        }
    }

    pub(crate) fn geometry(&self, options: &TrainOptions) -> GtResult<GearVariant> {
        let variant = match *self {
            GearParams::Spur {
                teeth,
                diametral_pitch,
                ..
            } => GearVariant::Spur(SpurGeometry::new(
                teeth,
                diametral_pitch,
                options.pressure_angle,
            )?),
            GearParams::Bevel {
                teeth,
                diametral_pitch,
                child_teeth,
                ..
            } => GearVariant::Bevel(BevelGeometry::new(
                teeth,
                child_teeth,
                diametral_pitch,
                options.pressure_angle,
            )?),
            GearParams::Helical {
                teeth,
                normal_diametral_pitch,
                helix_angle,
                hand,
                ..
            } => GearVariant::Helical(HelicalGeometry::new(
                teeth,
                normal_diametral_pitch,
                helix_angle.unwrap_or(options.helix_angle),
                hand,
                options.pressure_angle,
            )?),
        };
        Ok(variant)
    }
}

/// A gear to mesh onto an existing gear. The variant, pitch and width follow
/// the driving gear.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshParams {
    /// Clamped to at least 4. Ignored when meshing onto a bevel gear, whose
    /// mate's tooth count is fixed by its cone.
    pub teeth: u32,
    /// Bore of the new gear, which is also the radius of its new shaft.
    pub inner_radius: f64,
}

impl MeshParams {
    pub fn new(teeth: u32, inner_radius: f64) -> Self {
        Self {
            teeth,
            inner_radius,
        }
    }

    /// Parameters for meshing onto a bevel gear.
    pub fn bevel(inner_radius: f64) -> Self {
        Self::new(MIN_TEETH, inner_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gear::GearGeometry as _;

    #[test]
    fn accessors_cover_every_variant() {
        let all = [
            GearParams::spur(12, 2.0, 1.0),
            GearParams::bevel(12, 2.0, 1.0, 20),
            GearParams::helical(12, 2.0, 1.0),
        ];
        for p in &all {
            assert_eq!(p.teeth(), 12);
            assert_eq!(p.width(), 2.0);
        }
        assert_eq!(all[1].kind(), GearKind::Bevel);
    }

    #[test]
    fn helical_defaults_from_options() {
        let opts = TrainOptions::default();
        let GearVariant::Helical(g) = GearParams::helical(20, 1.0, 2.0).geometry(&opts).unwrap()
        else {
            panic!("expected helical geometry");
        };
        assert_eq!(g.helix_angle(), opts.helix_angle);
        assert_eq!(g.kind(), GearKind::Helical);
    }

    #[test]
    fn invalid_teeth_surface_as_validation() {
        let opts = TrainOptions::default();
        assert!(GearParams::spur(3, 1.0, 1.0).geometry(&opts).is_err());
    }
}
