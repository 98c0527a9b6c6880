pub mod macros;

use glam::Vec2;
use savanna_core::components::Lion;
use savanna_core::config::{AppConfig, ObstacleConfig};
use savanna_core::World;
use savanna_data::{Giraffe, Mob, ObstacleKind};
use savanna_engine::HeadlessSprites;
use savanna_lib::app::Game;

/// Builds small, seeded fields with no random obstacles.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: AppConfig,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = AppConfig::default();
        config.world.width = 800.0;
        config.world.height = 600.0;
        config.world.seed = Some(1);
        config.world.initial_giraffes = 0;
        config.world.lakes = 0;
        config.world.trees = 0;
        config.world.rocks = 0;
        Self { config }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_giraffes(mut self, count: usize) -> Self {
        self.config.world.initial_giraffes = count;
        self
    }

    pub fn with_obstacle(mut self, kind: ObstacleKind, x: f32, y: f32, radius: f32) -> Self {
        self.config.world.obstacles.push(ObstacleConfig { kind, x, y, radius });
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut AppConfig),
    {
        modifier(&mut self.config);
        self
    }

    pub fn config(&self) -> AppConfig {
        self.config.clone()
    }

    pub fn build(self) -> World {
        World::new(self.config).expect("Failed to create world")
    }

    /// A headless game already in the playing state.
    pub fn build_game(self) -> Game<HeadlessSprites> {
        let mut game = Game::new(self.config, HeadlessSprites::default()).expect("Failed to create game");
        game.update(0.0, 0.0).expect("Failed to start game");
        game
    }
}

/// Moves every lion to `position` and stops it.
#[allow(dead_code)]
pub fn place_lions(world: &mut World, position: Vec2) {
    for (_, (_, mob)) in world.ecs.query_mut::<(&Lion, &mut Mob)>() {
        mob.position = position;
        mob.velocity = Vec2::ZERO;
    }
}

/// Moves every giraffe to `position` and stops it.
#[allow(dead_code)]
pub fn place_giraffes(world: &mut World, position: Vec2) {
    for (_, (_, mob)) in world.ecs.query_mut::<(&Giraffe, &mut Mob)>() {
        mob.position = position;
        mob.velocity = Vec2::ZERO;
    }
}

/// Every lion's energy, in query order.
#[allow(dead_code)]
pub fn lion_energy(world: &World) -> Vec<f32> {
    world
        .ecs
        .query::<&Lion>()
        .iter()
        .map(|(_, lion)| lion.energy)
        .collect()
}
