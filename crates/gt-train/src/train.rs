//! The gear train: an arena of shafts and gears rooted at one driver shaft.

use gt_core::{
    EntityId, GearId, GtError, GtResult, ShaftId, Time, ensure_finite, ensure_positive, seconds,
};
use gt_geom::{Cylinder, Point, UnitVector, Vector, any_perpendicular, project_onto_plane};
use tracing::{debug, trace};

use crate::gear::{Gear, GearBody, MIN_TEETH, mesh_phase, mesh_speed};
use crate::options::{IntersectionScope, TrainOptions};
use crate::params::{GearParams, MeshParams};
use crate::shaft::{Shaft, ShaftParams};
use crate::traverse::EntityRef;

/// Shortest radial component accepted as a mesh direction.
const MIN_DIRECTION_NORM: f64 = 1e-9;

/// A tree of shafts and gears driven from a single root shaft.
///
/// Entities live in two arenas indexed by their ids. Removed slots stay
/// empty so ids are never reused.
///
/// Every mutation validates first and commits second: on `Err` the train is
/// exactly as it was.
#[derive(Clone, Debug)]
pub struct GearTrain {
    shafts: Vec<Option<Shaft>>,
    gears: Vec<Option<Gear>>,
    root: ShaftId,
    speed: f64,
    running: bool,
    tick_interval: Time,
    options: TrainOptions,
}

impl Default for GearTrain {
    fn default() -> Self {
        Self::new(ShaftParams::default(), TrainOptions::default())
            .expect("default driver shaft and options are valid")
    }
}

impl GearTrain {
    /// Create a train holding only its driver shaft.
    ///
    /// # Errors
    /// Returns error if `root` does not describe a valid shaft or the default
    /// speed is not finite.
    pub fn new(root: ShaftParams, options: TrainOptions) -> GtResult<Self> {
        let speed = ensure_finite(options.default_speed, "default speed")?;
        let tick_interval = options.tick_interval;
        ensure_positive(seconds(tick_interval), "tick interval must be positive")?;
        let id = ShaftId::from_index(0);
        let shaft = Shaft::new(id, &root, None)?;
        debug!(shaft = %id, "created gear train");
        Ok(Self {
            shafts: vec![Some(shaft)],
            gears: Vec::new(),
            root: id,
            speed,
            running: false,
            tick_interval,
            options,
        })
    }

    /// A train with the default driver shaft on +Z through the origin.
    pub fn with_default_root(options: TrainOptions) -> GtResult<Self> {
        Self::new(ShaftParams::default(), options)
    }

    pub fn options(&self) -> &TrainOptions {
        &self.options
    }

    pub fn root_id(&self) -> ShaftId {
        self.root
    }

    /// The driver shaft.
    pub fn root(&self) -> &Shaft {
        self.shaft(self.root)
            .expect("the driver shaft is never removed")
    }

    pub fn shaft(&self, id: ShaftId) -> Option<&Shaft> {
        self.shafts.get(id.index() as usize).and_then(Option::as_ref)
    }

    pub fn gear(&self, id: GearId) -> Option<&Gear> {
        self.gears.get(id.index() as usize).and_then(Option::as_ref)
    }

    /// Look up either kind of entity.
    pub fn entity(&self, id: EntityId) -> Option<EntityRef<'_>> {
        match id {
            EntityId::Shaft(s) => self.shaft(s).map(EntityRef::Shaft),
            EntityId::Gear(g) => self.gear(g).map(EntityRef::Gear),
        }
    }

    /// Shaft a gear is mounted on.
    pub fn gear_owner(&self, id: GearId) -> GtResult<ShaftId> {
        Ok(self.try_gear(id)?.shaft())
    }

    pub fn shaft_count(&self) -> usize {
        self.shafts.iter().flatten().count()
    }

    pub fn gear_count(&self) -> usize {
        self.gears.iter().flatten().count()
    }

    /// Number of live entities.
    pub fn count(&self) -> usize {
        self.shaft_count() + self.gear_count()
    }

    fn try_shaft(&self, id: ShaftId) -> GtResult<&Shaft> {
        self.shaft(id).ok_or(GtError::NotFound {
            what: "shaft",
            id: id.index(),
        })
    }

    fn try_gear(&self, id: GearId) -> GtResult<&Gear> {
        self.gear(id).ok_or(GtError::NotFound {
            what: "gear",
            id: id.index(),
        })
    }

    fn shaft_mut(&mut self, id: ShaftId) -> GtResult<&mut Shaft> {
        self.shafts
            .get_mut(id.index() as usize)
            .and_then(Option::as_mut)
            .ok_or(GtError::NotFound {
                what: "shaft",
                id: id.index(),
            })
    }

    fn gear_mut(&mut self, id: GearId) -> GtResult<&mut Gear> {
        self.gears
            .get_mut(id.index() as usize)
            .and_then(Option::as_mut)
            .ok_or(GtError::NotFound {
                what: "gear",
                id: id.index(),
            })
    }

    fn next_shaft_id(&self) -> ShaftId {
        ShaftId::from_index(self.shafts.len() as u32)
    }

    fn next_gear_id(&self) -> GearId {
        GearId::from_index(self.gears.len() as u32)
    }

    // ---------------------------------------------------------------------
    // Traversal
    // ---------------------------------------------------------------------

    /// Visit every entity depth-first from the driver shaft.
    ///
    /// A shaft is visited before its gears, its gears in mount order, then
    /// each gear's meshed subtrees in child order.
    pub fn traverse<'a, F>(&'a self, visitor: F)
    where
        F: FnMut(EntityRef<'a>),
    {
        self.visit(self.entity_ids_from(self.root), visitor);
    }

    /// Visit the subtree below `shaft`, the shaft included.
    pub fn traverse_from<'a, F>(&'a self, shaft: ShaftId, visitor: F) -> GtResult<()>
    where
        F: FnMut(EntityRef<'a>),
    {
        self.try_shaft(shaft)?;
        self.visit(self.entity_ids_from(shaft), visitor);
        Ok(())
    }

    /// Every entity in traversal order.
    pub fn entities(&self) -> Vec<EntityRef<'_>> {
        self.entity_ids()
            .into_iter()
            .filter_map(|id| self.entity(id))
            .collect()
    }

    /// Ids of every entity in traversal order.
    pub fn entity_ids(&self) -> Vec<EntityId> {
        self.entity_ids_from(self.root)
    }

    fn visit<'a, F>(&'a self, ids: Vec<EntityId>, mut visitor: F)
    where
        F: FnMut(EntityRef<'a>),
    {
        for entity in ids.into_iter().filter_map(|id| self.entity(id)) {
            visitor(entity);
        }
    }

    fn entity_ids_from(&self, shaft: ShaftId) -> Vec<EntityId> {
        let mut out = Vec::new();
        self.collect_shaft(shaft, &mut out);
        out
    }

    fn collect_shaft(&self, id: ShaftId, out: &mut Vec<EntityId>) {
        let Some(shaft) = self.shaft(id) else {
            return;
        };
        out.push(EntityId::Shaft(id));
        out.extend(shaft.gears().iter().map(|g| EntityId::Gear(*g)));
        for gear in shaft.gears() {
            self.collect_meshed(*gear, out);
        }
    }

    /// Subtrees of the shafts created by meshing onto `id`.
    fn collect_meshed(&self, id: GearId, out: &mut Vec<EntityId>) {
        let Some(gear) = self.gear(id) else {
            return;
        };
        for child in gear.children() {
            if let Some(child) = self.gear(*child) {
                self.collect_shaft(child.shaft(), out);
            }
        }
    }

    fn collect_gear(&self, id: GearId, out: &mut Vec<EntityId>) {
        if self.gear(id).is_some() {
            out.push(EntityId::Gear(id));
            self.collect_meshed(id, out);
        }
    }

    fn bounds_of(&self, id: EntityId) -> Option<&Cylinder> {
        self.entity(id).map(|e| e.bounding_cylinder())
    }

    // ---------------------------------------------------------------------
    // Construction
    // ---------------------------------------------------------------------

    /// Mount a new gear on `shaft` at the projection of `position` onto the
    /// shaft's centerline.
    ///
    /// The gear takes the shaft's axis, speed, phase and rotation; its bore is
    /// the shaft radius.
    ///
    /// # Errors
    /// - `NotFound` for an unknown shaft
    /// - `Validation` if the point projects outside the shaft, or for bad
    ///   gear dimensions
    /// - `Intersection` if the gear overlaps existing bodies
    pub fn mount_gear(
        &mut self,
        shaft_id: ShaftId,
        params: &GearParams,
        position: Point,
    ) -> GtResult<GearId> {
        let shaft = self.try_shaft(shaft_id)?;
        let offset = shaft.axial_offset(&position).ok_or(GtError::Validation {
            what: "gear outside shaft",
        })?;
        let axis = shaft.axis();
        let body = GearBody {
            teeth: params.teeth(),
            width: params.width(),
            pressure_angle: self.options.pressure_angle,
            inner_radius: shaft.radius(),
            position: shaft.position() + axis.into_inner() * offset,
            axis,
            up: any_perpendicular(&axis),
            speed: shaft.speed(),
            phase: shaft.phase(),
            rotation: shaft.rotation(),
        };
        let variant = params.geometry(&self.options)?;
        let id = self.next_gear_id();
        let gear = Gear::new(id, shaft_id, None, body, variant)?;

        let scope = match self.options.intersection_scope {
            IntersectionScope::Subtree => self.entity_ids_from(shaft_id),
            IntersectionScope::Train => self.entity_ids(),
        };
        self.ensure_clear(gear.bounding_cylinder(), &scope, &[EntityId::Shaft(shaft_id)])?;

        self.shaft_mut(shaft_id)?.push_gear(id);
        debug!(gear = %id, shaft = %shaft_id, kind = %params.kind(), teeth = gear.teeth(), "mounted gear");
        self.gears.push(Some(gear));
        Ok(id)
    }

    /// Mesh a new gear onto `driver`, on a new shaft, along `direction`.
    ///
    /// `direction` is projected onto the driver's plane of rotation. The new
    /// gear takes the driver's variant, pitch and width; its speed, phase and
    /// rotation follow from the driver so the teeth interlock.
    ///
    /// # Errors
    /// - `NotFound` for an unknown driver
    /// - `Validation` if `direction` is parallel to the driver's axis, or for
    ///   a bad bore
    /// - `Intersection` if the gear overlaps existing bodies
    pub fn mesh_gear(
        &mut self,
        driver_id: GearId,
        direction: Vector,
        params: &MeshParams,
    ) -> GtResult<GearId> {
        let driver = self.try_gear(driver_id)?;
        let driver_body = driver.body().clone();
        let radial = project_onto_plane(&direction, &driver_body.axis);
        let direction =
            UnitVector::try_new(radial, MIN_DIRECTION_NORM).ok_or(GtError::Validation {
                what: "mesh direction must not be parallel to the driving gear's axis",
            })?;

        let placement =
            driver
                .variant()
                .mesh_child(&driver_body, &direction, params.teeth.max(MIN_TEETH))?;
        let teeth = placement.teeth;
        let speed = mesh_speed(&driver_body, teeth);
        let phase = mesh_phase(&driver_body, &direction, teeth);
        let rotation = driver_body.rotation.opposite();
        let total_ratio = self.try_shaft(driver.shaft())?.total_ratio()
            * f64::from(driver_body.teeth)
            / f64::from(teeth);

        let shaft_id = self.next_shaft_id();
        let mut shaft = Shaft::new(
            shaft_id,
            &ShaftParams {
                position: placement.position,
                axis: placement.axis.into_inner(),
                radius: params.inner_radius,
                length: self.options.child_shaft_length_factor * driver_body.width,
                speed,
                phase,
                rotation,
                total_ratio,
            },
            Some(driver_id),
        )?;
        let gear_id = self.next_gear_id();
        let gear = Gear::new(
            gear_id,
            shaft_id,
            Some(driver_id),
            GearBody {
                teeth,
                width: driver_body.width,
                pressure_angle: driver_body.pressure_angle,
                inner_radius: params.inner_radius,
                position: placement.position,
                axis: placement.axis,
                up: placement.up,
                speed,
                phase,
                rotation,
            },
            placement.variant,
        )?;

        let scope = match self.options.intersection_scope {
            IntersectionScope::Subtree => {
                let mut ids = Vec::new();
                self.collect_meshed(driver_id, &mut ids);
                ids
            }
            IntersectionScope::Train => self.entity_ids(),
        };
        self.ensure_clear(gear.bounding_cylinder(), &scope, &[EntityId::Gear(driver_id)])?;

        self.gear_mut(driver_id)?.push_child(gear_id);
        shaft.push_gear(gear_id);
        debug!(
            gear = %gear_id,
            shaft = %shaft_id,
            driver = %driver_id,
            teeth,
            speed,
            "meshed gear"
        );
        self.shafts.push(Some(shaft));
        self.gears.push(Some(gear));
        Ok(gear_id)
    }

    /// Fail with the number of bodies in `scope` (minus `exclude`) that
    /// overlap `candidate`.
    fn ensure_clear(
        &self,
        candidate: &Cylinder,
        scope: &[EntityId],
        exclude: &[EntityId],
    ) -> GtResult<()> {
        let tolerance = self.options.contact_tolerance;
        let count = scope
            .iter()
            .filter(|id| !exclude.contains(id))
            .filter_map(|id| self.bounds_of(*id))
            .filter(|b| candidate.intersects_within(b, tolerance))
            .count();
        if count > 0 {
            return Err(GtError::Intersection { count });
        }
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Removal
    // ---------------------------------------------------------------------

    /// Remove a gear and everything it drives. Returns how many entities
    /// were removed.
    ///
    /// A gear created by meshing takes its whole shaft with it, siblings
    /// mounted on that shaft included.
    pub fn remove_gear(&mut self, id: GearId) -> GtResult<usize> {
        let gear = self.try_gear(id)?;
        let shaft = gear.shaft();
        let removed = match gear.parent() {
            Some(parent) => {
                self.gear_mut(parent)?.retain_children(|c| *c != id);
                self.discard(|train, out| train.collect_shaft(shaft, out))
            }
            None => {
                self.shaft_mut(shaft)?.remove_gear(id)?;
                self.discard(|train, out| train.collect_gear(id, out))
            }
        };
        debug!(gear = %id, removed, "removed gear");
        Ok(removed)
    }

    /// Remove a non-root shaft together with the gear that drives it and
    /// everything below.
    ///
    /// # Errors
    /// `InvalidOperation` for the driver shaft; `NotFound` for an unknown id.
    pub fn remove_shaft(&mut self, id: ShaftId) -> GtResult<usize> {
        let shaft = self.try_shaft(id)?;
        let Some(driver) = shaft.driver() else {
            return Err(GtError::InvalidOperation {
                what: "the driver shaft cannot be removed",
            });
        };
        let driven = self
            .try_gear(driver)?
            .children()
            .iter()
            .copied()
            .find(|c| self.gear(*c).is_some_and(|g| g.shaft() == id))
            .ok_or(GtError::NotFound {
                what: "gear driving shaft",
                id: id.index(),
            })?;
        self.remove_gear(driven)
    }

    /// Remove whichever entity `id` names.
    pub fn remove(&mut self, id: EntityId) -> GtResult<usize> {
        match id {
            EntityId::Shaft(s) => self.remove_shaft(s),
            EntityId::Gear(g) => self.remove_gear(g),
        }
    }

    fn discard(&mut self, collect: impl FnOnce(&Self, &mut Vec<EntityId>)) -> usize {
        let mut ids = Vec::new();
        collect(self, &mut ids);
        for id in &ids {
            match id {
                EntityId::Shaft(s) => {
                    if let Some(slot) = self.shafts.get_mut(s.index() as usize) {
                        *slot = None;
                    }
                }
                EntityId::Gear(g) => {
                    if let Some(slot) = self.gears.get_mut(g.index() as usize) {
                        *slot = None;
                    }
                }
            }
        }
        ids.len()
    }

    // ---------------------------------------------------------------------
    // Motion
    // ---------------------------------------------------------------------

    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Set the global speed scalar. Returns the previous value.
    ///
    /// Zero freezes the train; negative values run it backwards.
    pub fn set_speed(&mut self, speed: f64) -> GtResult<f64> {
        let speed = ensure_finite(speed, "global speed")?;
        debug!(speed, "set global speed");
        Ok(std::mem::replace(&mut self.speed, speed))
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn tick_interval(&self) -> Time {
        self.tick_interval
    }

    /// Mark the train as running, ticking every `interval`.
    pub fn start(&mut self, interval: Time) -> GtResult<()> {
        ensure_positive(seconds(interval), "tick interval must be positive")?;
        self.tick_interval = interval;
        self.running = true;
        debug!(interval_s = seconds(interval), "started");
        Ok(())
    }

    pub fn stop(&mut self) {
        self.running = false;
        debug!("stopped");
    }

    /// Advance every entity by `dt` at the current global speed.
    ///
    /// Each entity's phase moves by its own speed times `speed × dt`, in its
    /// own rotation sense. Speeds are fixed at construction, so one pass in
    /// any order gives the same result.
    pub fn tick(&mut self, dt: Time) -> GtResult<()> {
        let dt = ensure_finite(seconds(dt), "tick interval")?;
        let step = ensure_finite(self.speed * dt, "tick step")?;
        let ids = self.entity_ids();
        for id in &ids {
            match id {
                EntityId::Shaft(s) => self.shaft_mut(*s)?.advance(step),
                EntityId::Gear(g) => self.gear_mut(*g)?.advance(step),
            }
        }
        trace!(entities = ids.len(), step, "tick");
        Ok(())
    }

    /// Tick by the stored interval if running. Returns whether it ticked.
    pub fn tick_if_running(&mut self) -> GtResult<bool> {
        if !self.running {
            return Ok(false);
        }
        self.tick(self.tick_interval)?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::f64::consts::PI;
    use gt_core::{ms, s};

    fn train_with_gear() -> (GearTrain, GearId) {
        let mut train = GearTrain::default();
        let root = train.root_id();
        let gear = train
            .mount_gear(root, &GearParams::spur(20, 2.0, 1.0), Point::origin())
            .unwrap();
        (train, gear)
    }

    #[test]
    fn new_train_holds_only_the_driver() {
        let train = GearTrain::default();
        assert_eq!(train.count(), 1);
        assert!(train.root().is_root());
        assert!(!train.is_running());
        assert_eq!(train.speed(), 1.0);
    }

    #[test]
    fn mount_snaps_to_centerline() {
        let mut train = GearTrain::default();
        let root = train.root_id();
        let id = train
            .mount_gear(root, &GearParams::spur(20, 2.0, 1.0), Point::new(3.0, -2.0, 4.0))
            .unwrap();
        let gear = train.gear(id).unwrap();
        assert!((gear.position() - Point::new(0.0, 0.0, 4.0)).norm() < 1e-12);
        assert_eq!(gear.inner_radius(), 5.0);
        assert_eq!(train.gear_owner(id).unwrap(), root);
    }

    #[test]
    fn mount_outside_shaft_is_rejected() {
        let mut train = GearTrain::default();
        let root = train.root_id();
        let err = train
            .mount_gear(root, &GearParams::spur(20, 2.0, 1.0), Point::new(0.0, 0.0, 11.0))
            .unwrap_err();
        assert!(matches!(err, GtError::Validation { .. }));
        assert_eq!(train.count(), 1);
    }

    #[test]
    fn mesh_links_parent_child_and_shaft() {
        let (mut train, driver) = train_with_gear();
        let child = train
            .mesh_gear(driver, Vector::x(), &MeshParams::new(10, 1.0))
            .unwrap();
        let c = train.gear(child).unwrap();
        assert_eq!(c.parent(), Some(driver));
        assert_eq!(train.gear(driver).unwrap().children(), &[child]);
        let shaft = train.shaft(c.shaft()).unwrap();
        assert_eq!(shaft.driver(), Some(driver));
        assert_eq!(shaft.gears(), &[child]);
        assert!((shaft.total_ratio() - 2.0).abs() < 1e-12);
        assert!((shaft.length() - 6.0).abs() < 1e-12);
        assert!((c.position() - Point::new(15.0, 0.0, 0.0)).norm() < 1e-9);
        assert_eq!(train.count(), 4);
    }

    #[test]
    fn mesh_along_axis_is_rejected() {
        let (mut train, driver) = train_with_gear();
        let err = train
            .mesh_gear(driver, Vector::z(), &MeshParams::new(10, 1.0))
            .unwrap_err();
        assert!(matches!(err, GtError::Validation { .. }));
        assert_eq!(train.count(), 2);
    }

    #[test]
    fn mesh_clamps_teeth() {
        let (mut train, driver) = train_with_gear();
        let child = train
            .mesh_gear(driver, Vector::x(), &MeshParams::new(1, 0.5))
            .unwrap();
        assert_eq!(train.gear(child).unwrap().teeth(), MIN_TEETH);
    }

    #[test]
    fn traversal_order_is_shaft_gears_then_subtrees() {
        let (mut train, driver) = train_with_gear();
        let root = train.root_id();
        let child = train
            .mesh_gear(driver, Vector::x(), &MeshParams::new(10, 1.0))
            .unwrap();
        let child_shaft = train.gear_owner(child).unwrap();
        let ids = train.entity_ids();
        assert_eq!(
            ids,
            vec![
                EntityId::Shaft(root),
                EntityId::Gear(driver),
                EntityId::Shaft(child_shaft),
                EntityId::Gear(child),
            ]
        );
        let mut seen = 0;
        train.traverse_from(child_shaft, |_| seen += 1).unwrap();
        assert_eq!(seen, 2);
    }

    #[test]
    fn remove_root_is_invalid() {
        let mut train = GearTrain::default();
        let root = train.root_id();
        assert!(matches!(
            train.remove_shaft(root),
            Err(GtError::InvalidOperation { .. })
        ));
    }

    #[test]
    fn remove_unknown_is_not_found() {
        let mut train = GearTrain::default();
        assert!(matches!(
            train.remove_gear(GearId::from_index(7)),
            Err(GtError::NotFound { .. })
        ));
    }

    #[test]
    fn remove_mounted_gear_drops_subtree() {
        let (mut train, driver) = train_with_gear();
        train
            .mesh_gear(driver, Vector::x(), &MeshParams::new(10, 1.0))
            .unwrap();
        assert_eq!(train.remove_gear(driver).unwrap(), 3);
        assert_eq!(train.count(), 1);
        assert!(train.root().gears().is_empty());
    }

    #[test]
    fn remove_child_shaft_unlinks_driver() {
        let (mut train, driver) = train_with_gear();
        let child = train
            .mesh_gear(driver, Vector::x(), &MeshParams::new(10, 1.0))
            .unwrap();
        let shaft = train.gear_owner(child).unwrap();
        assert_eq!(train.remove_shaft(shaft).unwrap(), 2);
        assert!(train.gear(driver).unwrap().children().is_empty());
        assert!(train.shaft(shaft).is_none());
    }

    #[test]
    fn tick_advances_by_speed() {
        let (mut train, driver) = train_with_gear();
        train.tick(s(0.25)).unwrap();
        assert!((train.gear(driver).unwrap().phase() - 0.25).abs() < 1e-12);
        train.set_speed(0.0).unwrap();
        train.tick(s(10.0)).unwrap();
        assert!((train.root().phase() - 0.25).abs() < 1e-12);
    }

    #[test]
    fn start_stop_and_tick_if_running() {
        let mut train = GearTrain::default();
        assert!(!train.tick_if_running().unwrap());
        train.start(ms(100.0)).unwrap();
        assert!(train.tick_if_running().unwrap());
        assert!((train.root().phase() - 0.1).abs() < 1e-12);
        train.stop();
        assert!(!train.is_running());
        assert!(train.start(ms(0.0)).is_err());
    }

    #[test]
    fn traversal_refs_outlive_the_visitor() {
        let (train, driver) = train_with_gear();
        let mut seen = Vec::new();
        train.traverse(|e| seen.push(e));
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[1].id(), EntityId::Gear(driver));
        let listed: Vec<EntityId> = train.entities().iter().map(|e| e.id()).collect();
        assert_eq!(listed, train.entity_ids());
    }

    #[test]
    fn overflowing_tick_step_leaves_phases_untouched() {
        let (mut train, driver) = train_with_gear();
        train.tick(s(0.5)).unwrap();
        train.set_speed(f64::MAX).unwrap();
        assert!(matches!(
            train.tick(s(10.0)),
            Err(GtError::NonFinite { .. })
        ));
        assert!((train.root().phase() - 0.5).abs() < 1e-12);
        assert!((train.gear(driver).unwrap().phase() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn huge_tooth_count_meshes_at_the_right_distance() {
        let mut train = GearTrain::default();
        let root = train.root_id();
        let driver = train
            .mount_gear(root, &GearParams::helical(20, 2.0, 1.0), Point::origin())
            .unwrap();
        let child = train
            .mesh_gear(driver, Vector::x(), &MeshParams::new(u32::MAX, 1.0))
            .unwrap();
        let c = train.gear(child).unwrap();
        let d = train.gear(driver).unwrap();
        let expected = d.pitch_radius() + c.pitch_radius();
        assert!((c.position().x - expected).abs() <= 1e-9 * expected);
    }

    #[test]
    fn set_speed_rejects_nan() {
        let mut train = GearTrain::default();
        assert!(matches!(
            train.set_speed(f64::NAN),
            Err(GtError::NonFinite { .. })
        ));
        assert_eq!(train.set_speed(-2.0).unwrap(), 1.0);
        assert_eq!(train.speed(), -2.0);
    }

    #[test]
    fn meshed_phase_is_half_turn_plus_half_tooth() {
        let (mut train, driver) = train_with_gear();
        let up = train.gear(driver).unwrap().up().into_inner();
        let child = train
            .mesh_gear(driver, up, &MeshParams::new(10, 1.0))
            .unwrap();
        let phase = train.gear(child).unwrap().phase();
        assert!((phase - (PI + PI / 10.0)).abs() < 1e-12);
    }
}
