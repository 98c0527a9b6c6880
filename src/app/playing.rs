use savanna_core::config::GameConfig;
use savanna_core::World;
use savanna_data::SpriteId;

/// Game state while the field is live.
pub struct Playing {
    pub world: World,
    pub debug_draw: bool,
    pub debug_avoidance: bool,
    /// Obstacle sprites, added on the first presented frame.
    pub obstacle_sprites: Vec<SpriteId>,
    /// Bound keys per action, shown in the HUD.
    pub key_help: String,
}

impl Playing {
    pub fn new(mut world: World, game: &GameConfig, key_help: String) -> Self {
        world.record_probes = game.debug_avoidance;
        Self {
            world,
            debug_draw: game.debug_draw,
            debug_avoidance: game.debug_avoidance,
            obstacle_sprites: Vec::new(),
            key_help,
        }
    }

    pub fn toggle_debug_draw(&mut self) {
        self.debug_draw = !self.debug_draw;
        tracing::debug!(enabled = self.debug_draw, "Debug draw toggled");
    }

    /// Probes are only recorded while they are being shown.
    pub fn toggle_debug_avoidance(&mut self) {
        self.debug_avoidance = !self.debug_avoidance;
        self.world.record_probes = self.debug_avoidance;
        tracing::debug!(enabled = self.debug_avoidance, "Avoidance probes toggled");
    }

    pub fn add_giraffes(&mut self, count: usize) -> usize {
        let added = self.world.spawn_giraffes(count);
        if added < count {
            tracing::warn!(
                requested = count,
                added,
                total = self.world.giraffe_count(),
                "Herd is at capacity"
            );
        }
        added
    }
}
