//! Commands: UI-level intents applied to a train.
//!
//! A picking layer resolves a click to an entity id and a 3D point; the
//! command says what to do there. Nothing here holds mode state between
//! commands.

use gt_core::{EntityId, GearId, GtError, GtResult, Time};
use gt_geom::Point;

use crate::params::{GearParams, MeshParams};
use crate::train::GearTrain;

/// What to build when adding a gear.
///
/// Shaft targets take `Mount`; gear targets take `Mesh`, whose variant
/// always follows the target gear.
#[derive(Clone, Debug, PartialEq)]
pub enum GearRequest {
    Mount(GearParams),
    Mesh(MeshParams),
}

#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    /// Add a gear on the picked entity at the picked point.
    AddGear {
        target: EntityId,
        point: Point,
        request: GearRequest,
    },
    Remove {
        target: EntityId,
    },
    SetSpeed(f64),
    Start {
        interval: Time,
    },
    Stop,
}

/// Result of a successfully applied [`Command`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CommandOutcome {
    Added(GearId),
    /// Number of entities removed.
    Removed(usize),
    SpeedChanged { previous: f64 },
    Started,
    Stopped,
}

impl GearTrain {
    /// Apply one command. On `Err` the train is unchanged.
    ///
    /// Adding onto a gear meshes toward the picked point: the direction is
    /// the point minus the gear center, projected onto the gear's plane of
    /// rotation.
    pub fn apply(&mut self, command: Command) -> GtResult<CommandOutcome> {
        match command {
            Command::AddGear {
                target: EntityId::Shaft(shaft),
                point,
                request: GearRequest::Mount(params),
            } => self
                .mount_gear(shaft, &params, point)
                .map(CommandOutcome::Added),
            Command::AddGear {
                target: EntityId::Gear(gear),
                point,
                request: GearRequest::Mesh(params),
            } => {
                let center = self
                    .gear(gear)
                    .ok_or(GtError::NotFound {
                        what: "gear",
                        id: gear.index(),
                    })?
                    .position();
                self.mesh_gear(gear, point - center, &params)
                    .map(CommandOutcome::Added)
            }
            Command::AddGear { .. } => Err(GtError::InvalidOperation {
                what: "shafts take a mount request and gears a mesh request",
            }),
            Command::Remove { target } => self.remove(target).map(CommandOutcome::Removed),
            Command::SetSpeed(speed) => self
                .set_speed(speed)
                .map(|previous| CommandOutcome::SpeedChanged { previous }),
            Command::Start { interval } => {
                self.start(interval)?;
                Ok(CommandOutcome::Started)
            }
            Command::Stop => {
                self.stop();
                Ok(CommandOutcome::Stopped)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gt_core::ms;

    #[test]
    fn mount_then_mesh_by_picking() {
        let mut train = GearTrain::default();
        let root = EntityId::Shaft(train.root_id());
        let CommandOutcome::Added(driver) = train
            .apply(Command::AddGear {
                target: root,
                point: Point::new(1.0, 1.0, 2.0),
                request: GearRequest::Mount(GearParams::spur(20, 2.0, 1.0)),
            })
            .unwrap()
        else {
            panic!("expected a new gear");
        };

        // picked point above the gear plane still meshes radially along +X
        let CommandOutcome::Added(child) = train
            .apply(Command::AddGear {
                target: EntityId::Gear(driver),
                point: Point::new(30.0, 0.0, 7.0),
                request: GearRequest::Mesh(MeshParams::new(10, 1.0)),
            })
            .unwrap()
        else {
            panic!("expected a new gear");
        };
        let pos = train.gear(child).unwrap().position();
        assert!((pos - Point::new(15.0, 0.0, 2.0)).norm() < 1e-9);
    }

    #[test]
    fn mismatched_request_is_invalid() {
        let mut train = GearTrain::default();
        let err = train
            .apply(Command::AddGear {
                target: EntityId::Shaft(train.root_id()),
                point: Point::origin(),
                request: GearRequest::Mesh(MeshParams::new(10, 1.0)),
            })
            .unwrap_err();
        assert!(matches!(err, GtError::InvalidOperation { .. }));
    }

    #[test]
    fn controls_round_trip() {
        let mut train = GearTrain::default();
        assert_eq!(
            train.apply(Command::SetSpeed(3.0)).unwrap(),
            CommandOutcome::SpeedChanged { previous: 1.0 }
        );
        assert_eq!(
            train
                .apply(Command::Start {
                    interval: ms(20.0)
                })
                .unwrap(),
            CommandOutcome::Started
        );
        assert!(train.is_running());
        assert_eq!(train.apply(Command::Stop).unwrap(), CommandOutcome::Stopped);
        assert!(!train.is_running());
    }

    #[test]
    fn removing_root_through_command_fails() {
        let mut train = GearTrain::default();
        let target = EntityId::Shaft(train.root_id());
        assert!(matches!(
            train.apply(Command::Remove { target }),
            Err(GtError::InvalidOperation { .. })
        ));
    }
}
