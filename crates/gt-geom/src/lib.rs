//! gt-geom: bounding solids and interference tests for gear train bodies.
//!
//! Provides:
//! - `Cylinder`, the bounding solid for shafts and gears
//! - a conservative cylinder/cylinder overlap predicate
//! - small vector helpers (axis projection, signed angles)
//!
//! # Example
//!
//! ```
//! use gt_geom::Cylinder;
//! use nalgebra::{Point3, Vector3};
//!
//! let a = Cylinder::new(Point3::origin(), Vector3::z(), 2.0, 1.0).unwrap();
//! let b = Cylinder::new(Point3::new(3.0, 0.0, 0.0), Vector3::z(), 2.0, 1.0).unwrap();
//! let c = Cylinder::new(Point3::new(5.0, 0.0, 0.0), Vector3::z(), 2.0, 1.0).unwrap();
//!
//! assert!(a.intersects(&b));
//! assert!(!a.intersects(&c));
//! ```

pub mod cylinder;
pub mod error;
pub mod vector;

pub use cylinder::Cylinder;
pub use error::{GeomError, GeomResult};
pub use vector::{
    any_perpendicular, closest_points_on_segments, project_onto_axis, project_onto_plane,
    signed_angle,
};

/// Re-exported so downstream crates name the same point/vector types.
pub use nalgebra::{Point3, Unit, Vector3};

pub type Point = Point3<f64>;
pub type Vector = Vector3<f64>;
pub type UnitVector = Unit<Vector3<f64>>;
