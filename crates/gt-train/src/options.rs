//! Tunable parameters of a gear train.

use gt_core::constants::{HELIX_ANGLE_RAD, PRESSURE_ANGLE_RAD};
use gt_core::{Time, ms};
use gt_geom::cylinder::CONTACT_TOLERANCE;

/// Length of a shaft created by meshing, as a multiple of the gear width.
///
/// A clearance heuristic for drawing; the interference rules do not depend
/// on it.
pub const CHILD_SHAFT_LENGTH_FACTOR: f64 = 3.0;

/// Which bodies a new gear is tested against.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum IntersectionScope {
    /// Bodies reachable from the shaft being mounted on, or from the driving
    /// gear's meshed children.
    #[default]
    Subtree,
    /// Every body in the train.
    Train,
}

/// Options for a gear train.
#[derive(Clone, Debug)]
pub struct TrainOptions {
    /// Pressure angle given to gears mounted on a shaft (rad).
    pub pressure_angle: f64,
    /// Helix angle for helical requests that leave it unset (rad).
    pub helix_angle: f64,
    /// Global speed scalar a new train starts with.
    pub default_speed: f64,
    /// See [`CHILD_SHAFT_LENGTH_FACTOR`].
    pub child_shaft_length_factor: f64,
    /// Penetration below which two bodies count as touching.
    pub contact_tolerance: f64,
    pub intersection_scope: IntersectionScope,
    /// Interval an external scheduler should tick at when none is given.
    pub tick_interval: Time,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            pressure_angle: PRESSURE_ANGLE_RAD,
            helix_angle: HELIX_ANGLE_RAD,
            default_speed: 1.0,
            child_shaft_length_factor: CHILD_SHAFT_LENGTH_FACTOR,
            contact_tolerance: CONTACT_TOLERANCE,
            intersection_scope: IntersectionScope::default(),
            tick_interval: ms(50.0),
        }
    }
}
