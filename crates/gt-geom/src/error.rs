//! Geometry-specific error types.

use gt_core::GtError;
use thiserror::Error;

/// Errors raised when constructing geometric primitives.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeomError {
    #[error("Degenerate axis: {what}")]
    DegenerateAxis { what: &'static str },

    #[error("Invalid dimension: {what}")]
    InvalidDimension { what: &'static str },
}

pub type GeomResult<T> = Result<T, GeomError>;

impl From<GeomError> for GtError {
    fn from(e: GeomError) -> Self {
        match e {
            GeomError::DegenerateAxis { what } => GtError::Validation { what },
            GeomError::InvalidDimension { what } => GtError::Validation { what },
        }
    }
}
