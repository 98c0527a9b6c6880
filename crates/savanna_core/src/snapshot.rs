use glam::Vec2;
use savanna_data::{Food, LionState, Obstacle};
use serde::{Deserialize, Serialize};

/// Cumulative counts since the world was created.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, Eq)]
pub struct WorldStats {
    pub giraffes_spawned: u64,
    pub giraffes_killed: u64,
    pub food_eaten: u64,
    pub lion_exhaustions: u64,
    pub carcasses_removed: u64,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GiraffeSnapshot {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub orientation: f32,
    pub dead: bool,
    pub carcass_timer: f32,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LionSnapshot {
    pub id: u64,
    pub position: Vec2,
    pub velocity: Vec2,
    pub orientation: f32,
    pub state: LionState,
    pub energy: f32,
    pub locked_giraffe: Option<u64>,
}

/// Serializable picture of the whole field, for export and inspection.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct WorldSnapshot {
    pub tick: u64,
    pub time: f64,
    pub seed: u64,
    pub width: f32,
    pub height: f32,
    pub giraffes: Vec<GiraffeSnapshot>,
    pub lions: Vec<LionSnapshot>,
    pub food: Vec<Food>,
    pub obstacles: Vec<Obstacle>,
    pub stats: WorldStats,
}

impl WorldSnapshot {
    #[must_use]
    pub fn live_giraffes(&self) -> usize {
        self.giraffes.iter().filter(|g| !g.dead).count()
    }

    pub fn to_json(&self) -> anyhow::Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Stable numeric id of an ECS entity for snapshots.
#[inline]
#[must_use]
pub fn entity_id(entity: hecs::Entity) -> u64 {
    entity.to_bits().get()
}
