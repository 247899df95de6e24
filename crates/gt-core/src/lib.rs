//! gt-core: stable foundation for geartrain.
//!
//! Contains:
//! - units (uom SI types + constructors)
//! - numeric (Real + tolerances + angle helpers)
//! - ids (stable compact IDs for shafts and gears)
//! - error (shared error types)

pub mod error;
pub mod ids;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{GtError, GtResult};
pub use ids::*;
pub use numeric::*;
pub use units::*;
