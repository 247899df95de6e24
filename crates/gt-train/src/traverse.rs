//! Borrowed views over train entities, yielded by traversal.

use gt_core::EntityId;
use gt_geom::{Cylinder, Point, UnitVector};

use crate::gear::Gear;
use crate::shaft::{Rotation, Shaft};

/// A shaft or gear visited during traversal.
#[derive(Clone, Copy, Debug)]
pub enum EntityRef<'a> {
    Shaft(&'a Shaft),
    Gear(&'a Gear),
}

impl<'a> EntityRef<'a> {
    pub fn id(&self) -> EntityId {
        match self {
            EntityRef::Shaft(s) => EntityId::Shaft(s.id()),
            EntityRef::Gear(g) => EntityId::Gear(g.id()),
        }
    }

    pub fn as_shaft(&self) -> Option<&'a Shaft> {
        match *self {
            EntityRef::Shaft(s) => Some(s),
            EntityRef::Gear(_) => None,
        }
    }

    pub fn as_gear(&self) -> Option<&'a Gear> {
        match *self {
            EntityRef::Gear(g) => Some(g),
            EntityRef::Shaft(_) => None,
        }
    }

    pub fn position(&self) -> Point {
        match self {
            EntityRef::Shaft(s) => s.position(),
            EntityRef::Gear(g) => g.position(),
        }
    }

    pub fn axis(&self) -> UnitVector {
        match self {
            EntityRef::Shaft(s) => s.axis(),
            EntityRef::Gear(g) => g.axis(),
        }
    }

    pub fn phase(&self) -> f64 {
        match self {
            EntityRef::Shaft(s) => s.phase(),
            EntityRef::Gear(g) => g.phase(),
        }
    }

    pub fn speed(&self) -> f64 {
        match self {
            EntityRef::Shaft(s) => s.speed(),
            EntityRef::Gear(g) => g.speed(),
        }
    }

    pub fn rotation(&self) -> Rotation {
        match self {
            EntityRef::Shaft(s) => s.rotation(),
            EntityRef::Gear(g) => g.rotation(),
        }
    }

    pub fn bounding_cylinder(&self) -> &'a Cylinder {
        match *self {
            EntityRef::Shaft(s) => s.bounding_cylinder(),
            EntityRef::Gear(g) => g.bounding_cylinder(),
        }
    }
}
