//! Build steps given on the command line.
//!
//! ```text
//! mount:<shaft>:<kind>:<teeth>:<width>:<pitch>[:<offset>[:<mate teeth>]]
//! mesh:<gear>:<angle deg>:<teeth>:<bore>
//! remove-gear:<gear>
//! remove-shaft:<shaft>
//! ```
//!
//! Shafts and gears are numbered from 0 in creation order; the driver shaft
//! is shaft 0. `kind` is `spur`, `helical`, `helical-left` or `bevel`. A
//! mount `offset` is measured along the shaft axis from its center. A mesh
//! angle is measured from the driving gear's up direction about its axis.

use std::str::FromStr;

use gt_core::{EntityId, GearId, GtError, ShaftId};
use gt_train::{Command, CommandOutcome, GearParams, GearRequest, GearTrain, Hand, MeshParams};

use crate::error::{CliError, CliResult};

#[derive(Clone, Debug, PartialEq)]
pub enum Step {
    Mount {
        shaft: u32,
        params: GearParams,
        offset: f64,
    },
    Mesh {
        gear: u32,
        angle_deg: f64,
        teeth: u32,
        bore: f64,
    },
    RemoveGear(u32),
    RemoveShaft(u32),
}

fn field<T: FromStr>(input: &str, value: &str, what: &str) -> CliResult<T> {
    value.parse().map_err(|_| CliError::InvalidStep {
        input: input.to_string(),
        message: format!("cannot parse {what} from '{value}'"),
    })
}

fn invalid(input: &str, message: &str) -> CliError {
    CliError::InvalidStep {
        input: input.to_string(),
        message: message.to_string(),
    }
}

impl FromStr for Step {
    type Err = CliError;

    fn from_str(input: &str) -> CliResult<Self> {
        let fields: Vec<&str> = input.split(':').map(str::trim).collect();
        match fields.as_slice() {
            ["mount", shaft, kind, teeth, width, pitch, rest @ ..] => {
                let teeth: u32 = field(input, teeth, "teeth")?;
                let width = field(input, width, "width")?;
                let pitch = field(input, pitch, "pitch")?;
                let (offset, mate) = match rest {
                    [] => (0.0, None),
                    [offset] => (field(input, offset, "offset")?, None),
                    [offset, mate] => (
                        field(input, offset, "offset")?,
                        Some(field(input, mate, "mate teeth")?),
                    ),
                    _ => return Err(invalid(input, "too many fields for mount")),
                };
                let params = match *kind {
                    "spur" => GearParams::spur(teeth, width, pitch),
                    "helical" => GearParams::helical(teeth, width, pitch),
                    "helical-left" => GearParams::Helical {
                        teeth,
                        width,
                        normal_diametral_pitch: pitch,
                        helix_angle: None,
                        hand: Hand::Left,
                    },
                    "bevel" => GearParams::bevel(teeth, width, pitch, mate.unwrap_or(teeth)),
                    other => {
                        return Err(invalid(input, &format!("unknown gear kind '{other}'")));
                    }
                };
                if mate.is_some() && *kind != "bevel" {
                    return Err(invalid(input, "mate teeth only apply to bevel gears"));
                }
                Ok(Step::Mount {
                    shaft: field(input, shaft, "shaft index")?,
                    params,
                    offset,
                })
            }
            ["mesh", gear, angle, teeth, bore] => Ok(Step::Mesh {
                gear: field(input, gear, "gear index")?,
                angle_deg: field(input, angle, "angle")?,
                teeth: field(input, teeth, "teeth")?,
                bore: field(input, bore, "bore")?,
            }),
            ["remove-gear", gear] => Ok(Step::RemoveGear(field(input, gear, "gear index")?)),
            ["remove-shaft", shaft] => Ok(Step::RemoveShaft(field(input, shaft, "shaft index")?)),
            _ => Err(invalid(input, "expected mount, mesh, remove-gear or remove-shaft")),
        }
    }
}

impl Step {
    /// The command this step stands for against the train as it is now.
    pub fn command(&self, train: &GearTrain) -> CliResult<Command> {
        let command = match self {
            Step::Mount {
                shaft,
                params,
                offset,
            } => {
                let id = ShaftId::from_index(*shaft);
                let s = train.shaft(id).ok_or(GtError::NotFound {
                    what: "shaft",
                    id: *shaft,
                })?;
                Command::AddGear {
                    target: EntityId::Shaft(id),
                    point: s.position() + s.axis().into_inner() * *offset,
                    request: GearRequest::Mount(params.clone()),
                }
            }
            Step::Mesh {
                gear,
                angle_deg,
                teeth,
                bore,
            } => {
                let id = GearId::from_index(*gear);
                let g = train.gear(id).ok_or(GtError::NotFound {
                    what: "gear",
                    id: *gear,
                })?;
                let up = g.up().into_inner();
                let side = g.axis().cross(&up);
                let angle = angle_deg.to_radians();
                let direction = up * angle.cos() + side * angle.sin();
                Command::AddGear {
                    target: EntityId::Gear(id),
                    point: g.position() + direction * g.pitch_radius(),
                    request: GearRequest::Mesh(MeshParams::new(*teeth, *bore)),
                }
            }
            Step::RemoveGear(gear) => Command::Remove {
                target: EntityId::Gear(GearId::from_index(*gear)),
            },
            Step::RemoveShaft(shaft) => Command::Remove {
                target: EntityId::Shaft(ShaftId::from_index(*shaft)),
            },
        };
        Ok(command)
    }

    pub fn apply(&self, train: &mut GearTrain) -> CliResult<CommandOutcome> {
        let command = self.command(train)?;
        Ok(train.apply(command)?)
    }
}
