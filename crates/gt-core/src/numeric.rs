use core::f64::consts::TAU;

use crate::GtError;

/// Floating point type used throughout system
pub type Real = f64;

/// One tolerance for everything
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    if diff <= tol.abs {
        return true;
    }
    diff <= tol.rel * a.abs().max(b.abs())
}

pub fn ensure_finite(v: Real, what: &'static str) -> Result<Real, GtError> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GtError::NonFinite { what, value: v })
    }
}

/// Finite and strictly positive, else a validation error naming `what`.
pub fn ensure_positive(v: Real, what: &'static str) -> Result<Real, GtError> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(GtError::Validation { what })
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: Real) -> Real {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Smallest absolute difference between two angles, in `[0, π]`.
pub fn angle_distance(a: Real, b: Real) -> Real {
    let d = normalize_angle(a - b);
    d.min(TAU - d)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn normalized_angle_in_range(a in -1.0e6_f64..1.0e6_f64) {
            let n = normalize_angle(a);
            prop_assert!((0.0..TAU).contains(&n));
            prop_assert!(angle_distance(n, a) < 1e-6);
        }
    }
}
