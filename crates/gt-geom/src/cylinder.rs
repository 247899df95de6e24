//! Finite solid cylinder, the bounding solid of every shaft and gear body.

use crate::error::{GeomError, GeomResult};
use crate::vector::{closest_points_on_segments, project_onto_plane};
use crate::{Point, UnitVector, Vector};

/// Below this `|a₁ × a₂|` two axes are treated as parallel.
const PARALLEL_EPS: f64 = 1e-9;

/// Penetration shallower than this counts as touching, not overlapping.
pub const CONTACT_TOLERANCE: f64 = 1e-9;

/// A solid cylinder whose centerline passes through `center` along `axis`
/// and extends `length / 2` to either side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Cylinder {
    center: Point,
    axis: UnitVector,
    radius: f64,
    length: f64,
}

impl Cylinder {
    /// Create a cylinder, normalizing `axis`.
    ///
    /// # Errors
    /// Returns error if the axis is zero or the dimensions are not finite and
    /// positive.
    pub fn new(center: Point, axis: Vector, radius: f64, length: f64) -> GeomResult<Self> {
        if !center.coords.iter().all(|c| c.is_finite()) {
            return Err(GeomError::InvalidDimension {
                what: "cylinder center must be finite",
            });
        }
        let axis = UnitVector::try_new(axis, 1e-12).ok_or(GeomError::DegenerateAxis {
            what: "cylinder axis must be non-zero",
        })?;
        if !(radius.is_finite() && radius > 0.0) {
            return Err(GeomError::InvalidDimension {
                what: "cylinder radius must be positive",
            });
        }
        if !(length.is_finite() && length > 0.0) {
            return Err(GeomError::InvalidDimension {
                what: "cylinder length must be positive",
            });
        }
        Ok(Self {
            center,
            axis,
            radius,
            length,
        })
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn axis(&self) -> UnitVector {
        self.axis
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn length(&self) -> f64 {
        self.length
    }

    pub fn half_length(&self) -> f64 {
        self.length / 2.0
    }

    /// The two end-cap centers.
    pub fn endpoints(&self) -> (Point, Point) {
        let half = self.axis.into_inner() * self.half_length();
        (self.center - half, self.center + half)
    }

    /// Radius of the smallest sphere around `center` containing the solid.
    pub fn bounding_radius(&self) -> f64 {
        self.radius.hypot(self.half_length())
    }

    /// Half-width of the projection of the solid onto direction `n`.
    pub fn extent_along(&self, n: &UnitVector) -> f64 {
        let c = n.dot(&self.axis.into_inner()).abs().min(1.0);
        c * self.half_length() + self.radius * (1.0 - c * c).sqrt()
    }

    /// Whether the two solids overlap, touching excluded.
    pub fn intersects(&self, other: &Cylinder) -> bool {
        self.intersects_within(other, CONTACT_TOLERANCE)
    }

    /// Like [`Cylinder::intersects`] with an explicit contact tolerance.
    ///
    /// Parallel axes get an exact test. Otherwise this is a separating-axis
    /// test over a fixed candidate set; it may report an overlap for skew
    /// solids that only nearly touch, but never misses a real one.
    pub fn intersects_within(&self, other: &Cylinder, tolerance: f64) -> bool {
        let d = other.center - self.center;
        if d.norm() >= self.bounding_radius() + other.bounding_radius() - tolerance {
            return false;
        }

        let cross = self.axis.cross(&other.axis.into_inner());
        if cross.norm() < PARALLEL_EPS {
            let axial = self.axis.dot(&d);
            let radial = (d - self.axis.into_inner() * axial).norm();
            return radial < self.radius + other.radius - tolerance
                && axial.abs() < self.half_length() + other.half_length() - tolerance;
        }

        !self
            .candidate_axes(other)
            .iter()
            .any(|n| self.separated_along(other, n, &d, tolerance))
    }

    fn candidate_axes(&self, other: &Cylinder) -> Vec<UnitVector> {
        let d = other.center - self.center;
        let (p1, q1) = self.endpoints();
        let (p2, q2) = other.endpoints();
        let (c1, c2) = closest_points_on_segments(&p1, &q1, &p2, &q2);

        let mut axes = vec![self.axis, other.axis];
        let derived = [
            self.axis.cross(&other.axis.into_inner()),
            c2 - c1,
            project_onto_plane(&d, &self.axis),
            project_onto_plane(&d, &other.axis),
        ];
        axes.extend(
            derived
                .iter()
                .filter_map(|v| UnitVector::try_new(*v, 1e-12)),
        );
        axes
    }

    fn separated_along(&self, other: &Cylinder, n: &UnitVector, d: &Vector, tolerance: f64) -> bool {
        n.dot(d).abs() >= self.extent_along(n) + other.extent_along(n) - tolerance
    }
}
