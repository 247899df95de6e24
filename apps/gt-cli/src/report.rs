//! Inspection report of a train: text for people, JSON for tools.

use gt_core::EntityId;
use gt_train::{EntityRef, GearTrain};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct TrainReport {
    pub speed: f64,
    pub running: bool,
    pub elapsed_s: f64,
    pub entities: Vec<EntityReport>,
}

#[derive(Debug, Serialize)]
pub struct EntityReport {
    pub id: EntityId,
    pub kind: String,
    pub position: [f64; 3],
    pub axis: [f64; 3],
    pub speed: f64,
    pub phase: f64,
    pub rotation: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub teeth: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pitch_radius: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_ratio: Option<f64>,
}

impl EntityReport {
    fn from_entity(entity: EntityRef<'_>) -> Self {
        let p = entity.position();
        let a = entity.axis();
        let (kind, teeth, pitch_radius, total_ratio) = match entity {
            EntityRef::Shaft(s) => ("shaft".to_string(), None, None, Some(s.total_ratio())),
            EntityRef::Gear(g) => (
                g.kind().to_string(),
                Some(g.teeth()),
                Some(g.pitch_radius()),
                None,
            ),
        };
        Self {
            id: entity.id(),
            kind,
            position: [p.x, p.y, p.z],
            axis: [a.x, a.y, a.z],
            speed: entity.speed(),
            phase: entity.phase(),
            rotation: format!("{:?}", entity.rotation()),
            teeth,
            pitch_radius,
            total_ratio,
        }
    }
}

impl TrainReport {
    pub fn from_train(train: &GearTrain, elapsed_s: f64) -> Self {
        Self {
            speed: train.speed(),
            running: train.is_running(),
            elapsed_s,
            entities: train
                .entities()
                .into_iter()
                .map(EntityReport::from_entity)
                .collect(),
        }
    }

    pub fn print_text(&self) {
        println!(
            "Gear train: {} entities, speed {}, elapsed {:.3} s",
            self.entities.len(),
            self.speed,
            self.elapsed_s
        );
        for e in &self.entities {
            let [x, y, z] = e.position;
            let mut line = format!(
                "  {:<10} {:<8} at ({:.3}, {:.3}, {:.3})  speed={:.4}  phase={:.4}  {}",
                e.id.to_string(),
                e.kind,
                x,
                y,
                z,
                e.speed,
                e.phase,
                e.rotation
            );
            if let Some(teeth) = e.teeth {
                line.push_str(&format!("  teeth={}", teeth));
            }
            if let Some(ratio) = e.total_ratio {
                line.push_str(&format!("  ratio={:.4}", ratio));
            }
            println!("{}", line);
        }
    }
}
