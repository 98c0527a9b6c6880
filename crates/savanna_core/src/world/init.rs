use std::time::{SystemTime, UNIX_EPOCH};

use glam::Vec2;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use savanna_data::{Food, Giraffe};

use super::World;
use crate::components::Lion;
use crate::config::AppConfig;
use crate::events::SimEvent;
use crate::metrics::Metrics;
use crate::snapshot::WorldStats;
use crate::spatial_hash::SpatialHash;
use crate::spawn;

/// Seed derived from the wall clock, for unseeded runs.
#[must_use]
pub fn clock_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

impl World {
    /// Validates `config` and builds a populated field.
    pub fn new(config: AppConfig) -> anyhow::Result<Self> {
        config.validate()?;

        let seed = config.world.seed.unwrap_or_else(clock_seed);
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let size = Vec2::new(config.world.width, config.world.height);
        let obstacles = spawn::layout_obstacles(&config.world, &mut rng);
        let spatial_hash = SpatialHash::new(config.world.spatial_cell_size, size.x, size.y);
        let metrics = Metrics::new(config.game.log_interval);
        let record_probes = config.game.debug_avoidance;

        let mut world = Self {
            config,
            size,
            tick: 0,
            time: 0.0,
            ecs: hecs::World::new(),
            obstacles,
            spatial_hash,
            rng,
            seed,
            metrics,
            stats: WorldStats::default(),
            events: Vec::new(),
            released_sprites: Vec::new(),
            record_probes,
            probes: Vec::new(),
            view_buffer: Vec::new(),
            position_buffer: Vec::new(),
        };

        world.spawn_food();
        world.spawn_lions();
        let spawned = world.spawn_giraffes(world.config.world.initial_giraffes);

        tracing::info!(
            seed,
            width = size.x,
            height = size.y,
            obstacles = world.obstacles.len(),
            lions = world.config.lion.count,
            giraffes = spawned,
            "World created"
        );
        Ok(world)
    }

    /// Restarts the random stream. Actors already on the field stay put.
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.rng = ChaCha8Rng::seed_from_u64(seed);
        tracing::info!(seed, "World reseeded");
    }

    /// Adds up to `count` giraffes at random free spots, never exceeding
    /// `max_giraffes` (carcasses count). Returns how many were added.
    pub fn spawn_giraffes(&mut self, count: usize) -> usize {
        let room = self
            .config
            .world
            .max_giraffes
            .saturating_sub(self.giraffe_count());
        let count = count.min(room);
        if count == 0 {
            return 0;
        }

        let giraffe = &self.config.giraffe;
        for _ in 0..count {
            let position =
                spawn::random_free_position(&mut self.rng, self.size, &self.obstacles, giraffe.radius);
            let velocity = spawn::random_velocity(&mut self.rng, giraffe.spawn_velocity);
            self.ecs
                .spawn((Giraffe::default(), giraffe.mob_at(position, velocity)));
        }

        self.record_event(SimEvent::GiraffesSpawned { count });
        tracing::debug!(count, total = self.giraffe_count(), "Giraffes spawned");
        count
    }

    fn spawn_lions(&mut self) {
        for _ in 0..self.config.lion.count {
            let lion = &self.config.lion;
            let position =
                spawn::random_free_position(&mut self.rng, self.size, &self.obstacles, lion.radius);
            self.ecs.spawn((Lion::new(lion.max_energy), lion.mob_at(position)));
        }
    }

    fn spawn_food(&mut self) {
        let radius = self.config.food.radius;
        for _ in 0..self.config.food.count {
            let position = spawn::random_free_position(&mut self.rng, self.size, &self.obstacles, radius);
            self.ecs.spawn((Food { position, radius },));
        }
    }
}
