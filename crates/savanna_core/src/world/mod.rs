//! The simulated savanna: actors in a `hecs` world plus the static field.

use glam::Vec2;
use rand_chacha::ChaCha8Rng;
use savanna_data::{Food, Giraffe, LionState, Mob, Obstacle, SpriteId};

use crate::components::Lion;
use crate::config::AppConfig;
use crate::events::SimEvent;
use crate::metrics::Metrics;
use crate::snapshot::{entity_id, GiraffeSnapshot, LionSnapshot, WorldSnapshot, WorldStats};
use crate::spatial_hash::SpatialHash;
use crate::steering::AvoidanceProbe;
use crate::systems::MobView;

pub mod init;
pub mod update;

pub use init::clock_seed;

pub struct World {
    pub config: AppConfig,
    pub size: Vec2,
    pub tick: u64,
    /// Simulated seconds.
    pub time: f64,
    pub ecs: hecs::World,
    pub obstacles: Vec<Obstacle>,
    pub spatial_hash: SpatialHash,
    pub rng: ChaCha8Rng,
    seed: u64,
    pub metrics: Metrics,
    pub stats: WorldStats,
    /// Events raised since the start of the last update.
    pub events: Vec<SimEvent>,
    /// Sprites of despawned actors, waiting for the presentation layer.
    pub released_sprites: Vec<SpriteId>,
    /// Keep avoidance rays for debug drawing.
    pub record_probes: bool,
    pub probes: Vec<AvoidanceProbe>,

    view_buffer: Vec<MobView>,
    position_buffer: Vec<Vec2>,
}

impl World {
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Total giraffes on the field, carcasses included.
    #[must_use]
    pub fn giraffe_count(&self) -> usize {
        self.ecs.query::<&Giraffe>().iter().count()
    }

    #[must_use]
    pub fn live_giraffe_count(&self) -> usize {
        self.ecs
            .query::<&Giraffe>()
            .iter()
            .filter(|(_, g)| g.is_alive())
            .count()
    }

    #[must_use]
    pub fn lion_count(&self) -> usize {
        self.ecs.query::<&Lion>().iter().count()
    }

    #[must_use]
    pub fn lion_states(&self) -> Vec<LionState> {
        self.ecs.query::<&Lion>().iter().map(|(_, l)| l.state).collect()
    }

    #[must_use]
    pub fn food_positions(&self) -> Vec<Vec2> {
        self.ecs
            .query::<&Food>()
            .iter()
            .map(|(_, f)| f.position)
            .collect()
    }

    /// Hands the released sprite ids over, leaving none behind.
    pub fn take_released_sprites(&mut self) -> Vec<SpriteId> {
        std::mem::take(&mut self.released_sprites)
    }

    pub fn snapshot(&self) -> WorldSnapshot {
        let giraffes = self
            .ecs
            .query::<(&Giraffe, &Mob)>()
            .iter()
            .map(|(entity, (giraffe, mob))| GiraffeSnapshot {
                id: entity_id(entity),
                position: mob.position,
                velocity: mob.velocity,
                orientation: mob.orientation,
                dead: giraffe.dead,
                carcass_timer: giraffe.carcass_timer,
            })
            .collect();
        let lions = self
            .ecs
            .query::<(&Lion, &Mob)>()
            .iter()
            .map(|(entity, (lion, mob))| LionSnapshot {
                id: entity_id(entity),
                position: mob.position,
                velocity: mob.velocity,
                orientation: mob.orientation,
                state: lion.state,
                energy: lion.energy,
                locked_giraffe: lion.locked_giraffe.map(entity_id),
            })
            .collect();
        let food = self
            .ecs
            .query::<&Food>()
            .iter()
            .map(|(_, f)| f.clone())
            .collect();

        WorldSnapshot {
            tick: self.tick,
            time: self.time,
            seed: self.seed,
            width: self.size.x,
            height: self.size.y,
            giraffes,
            lions,
            food,
            obstacles: self.obstacles.clone(),
            stats: self.stats.clone(),
        }
    }
}
