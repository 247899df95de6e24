//! gt-train: shafts, gears and the gear train that links them.
//!
//! A [`GearTrain`] owns a driver shaft. Gears are mounted on shafts or meshed
//! onto other gears; meshing creates a new shaft whose speed, rotation sense
//! and phase follow from the driver so the teeth interlock. Every structural
//! change is checked against the bounding solids already in the train.
//!
//! ```
//! use gt_geom::{Point, Vector};
//! use gt_train::{GearParams, GearTrain, MeshParams};
//!
//! let mut train = GearTrain::default();
//! let root = train.root_id();
//! let driver = train
//!     .mount_gear(root, &GearParams::spur(20, 2.0, 1.0), Point::origin())
//!     .unwrap();
//! let driven = train
//!     .mesh_gear(driver, Vector::x(), &MeshParams::new(10, 1.0))
//!     .unwrap();
//! assert_eq!(train.gear(driven).unwrap().speed(), 2.0);
//! ```

pub mod command;
pub mod gear;
pub mod options;
pub mod params;
pub mod shaft;
pub mod train;
pub mod traverse;

pub use command::{Command, CommandOutcome, GearRequest};
pub use gear::{
    BevelGeometry, ChildPlacement, Gear, GearBody, GearGeometry, GearKind, GearVariant, Hand,
    HelicalGeometry, MIN_TEETH, SpurGeometry, mesh_phase, mesh_speed,
};
pub use options::{CHILD_SHAFT_LENGTH_FACTOR, IntersectionScope, TrainOptions};
pub use params::{GearParams, MeshParams};
pub use shaft::{Rotation, Shaft, ShaftParams};
pub use train::GearTrain;
pub use traverse::EntityRef;
