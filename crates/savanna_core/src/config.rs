//! Configuration management for simulation parameters.
//!
//! This module provides strongly-typed configuration structures that map to
//! the `config.toml` file. Every section and field has a default, so a file
//! only needs to name what it changes.
//!
//! ## Configuration Hierarchy
//!
//! 1. Default values (hardcoded in `Default` impls)
//! 2. `config.toml` file (overrides defaults)
//! 3. Command line flags (applied by the binary)
//!
//! ## Example `config.toml`
//!
//! ```toml
//! [world]
//! width = 1280.0
//! height = 720.0
//! initial_giraffes = 40
//! seed = 42
//!
//! [[world.obstacles]]
//! kind = "lake"
//! x = 400.0
//! y = 300.0
//! radius = 90.0
//!
//! [lion]
//! max_energy = 8.0
//!
//! [binds]
//! q = "quit"
//! space = "add_ten"
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use savanna_data::{Mob, Obstacle, ObstacleKind};
use serde::{Deserialize, Serialize};

/// Largest herd the world will hold, carcasses included.
pub const GIRAFFE_CAP: usize = 5000;

/// Largest spatial grid, in cells, a field may need.
pub const MAX_GRID_CELLS: f32 = 4_194_304.0;

/// World-level simulation configuration.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,
    pub initial_giraffes: usize,
    pub max_giraffes: usize,
    pub seed: Option<u64>,
    /// Largest time step a single update integrates.
    pub max_dt: f32,
    /// Number of randomly placed obstacles of each kind, used when `obstacles` is empty.
    pub lakes: usize,
    pub trees: usize,
    pub rocks: usize,
    pub lake_radius: f32,
    pub tree_radius: f32,
    pub rock_radius: f32,
    /// Explicit obstacle layout. Overrides the random placement counts.
    pub obstacles: Vec<ObstacleConfig>,
    pub spatial_cell_size: f32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            initial_giraffes: 20,
            max_giraffes: GIRAFFE_CAP,
            seed: None,
            max_dt: 0.1,
            lakes: 2,
            trees: 6,
            rocks: 3,
            lake_radius: 90.0,
            tree_radius: 18.0,
            rock_radius: 26.0,
            obstacles: Vec::new(),
            spatial_cell_size: 40.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ObstacleConfig {
    pub kind: ObstacleKind,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
}

impl ObstacleConfig {
    #[must_use]
    pub fn to_obstacle(&self) -> Obstacle {
        Obstacle::new(self.kind, Vec2::new(self.x, self.y), self.radius)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GiraffeConfig {
    pub mass: f32,
    pub max_force: f32,
    pub max_speed: f32,
    pub radius: f32,
    /// Seconds a carcass stays on the field.
    pub carcass_lifetime: f32,
    /// Magnitude of the random velocity a new giraffe starts with, per axis.
    pub spawn_velocity: f32,
}

impl Default for GiraffeConfig {
    fn default() -> Self {
        Self {
            mass: 1.0,
            max_force: 60.0,
            max_speed: 40.0,
            radius: 10.0,
            carcass_lifetime: 10.0,
            spawn_velocity: 32.0,
        }
    }
}

impl GiraffeConfig {
    #[must_use]
    pub fn mob_at(&self, position: Vec2, velocity: Vec2) -> Mob {
        Mob {
            mass: self.mass,
            velocity,
            max_force: self.max_force,
            max_speed: self.max_speed,
            radius: self.radius,
            ..Mob::at(position)
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LionConfig {
    pub count: usize,
    pub mass: f32,
    pub max_force: f32,
    pub max_speed: f32,
    pub radius: f32,
    /// Energy needed before the lion may lock onto a giraffe.
    pub max_energy: f32,
    /// Energy regained per second while resting.
    pub recharge_rate: f32,
    /// Energy spent per second while hunting.
    pub exertion_rate: f32,
    /// Extra reach added to the lion radius for the kill check.
    pub kill_reach: f32,
    /// Upper bound, in seconds, on how far ahead the lion predicts its prey.
    pub pursuit_prediction: f32,
}

impl Default for LionConfig {
    fn default() -> Self {
        Self {
            count: 1,
            mass: 1.0,
            max_force: 90.0,
            max_speed: 55.0,
            radius: 14.0,
            max_energy: 10.0,
            recharge_rate: 1.0,
            exertion_rate: 1.0,
            kill_reach: 2.0,
            pursuit_prediction: 1.0,
        }
    }
}

impl LionConfig {
    #[must_use]
    pub fn mob_at(&self, position: Vec2) -> Mob {
        Mob {
            mass: self.mass,
            max_force: self.max_force,
            max_speed: self.max_speed,
            radius: self.radius,
            ..Mob::at(position)
        }
    }
}

/// Relative weight of each behavior in the blended steering force.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct BehaviorWeights {
    pub arrival: f32,
    pub flee: f32,
    pub separation: f32,
    pub avoidance: f32,
}

impl Default for BehaviorWeights {
    fn default() -> Self {
        Self {
            arrival: 1.0,
            flee: 2.0,
            separation: 1.5,
            avoidance: 3.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct SteeringConfig {
    /// Distance over which arrival ramps the speed down.
    pub arrival_distance: f32,
    /// Giraffes flee lions closer than this.
    pub panic_distance: f32,
    pub separation_radius: f32,
    pub min_look_ahead: f32,
    /// Seconds of travel the avoidance ray covers on top of `min_look_ahead`.
    pub look_ahead_time: f32,
    pub bounds_margin: f32,
    /// Fraction of velocity lost per second.
    pub drag: f32,
    /// Speed multiplier while wading through a lake.
    pub lake_speed_factor: f32,
    pub weights: BehaviorWeights,
}

impl Default for SteeringConfig {
    fn default() -> Self {
        Self {
            arrival_distance: 100.0,
            panic_distance: 180.0,
            separation_radius: 30.0,
            min_look_ahead: 30.0,
            look_ahead_time: 1.0,
            bounds_margin: 20.0,
            drag: 0.5,
            lake_speed_factor: 0.5,
            weights: BehaviorWeights::default(),
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct FoodConfig {
    pub count: usize,
    pub radius: f32,
}

impl Default for FoodConfig {
    fn default() -> Self {
        Self {
            count: 1,
            radius: 8.0,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct GameConfig {
    /// Atlas description file. The built-in atlas is used when unset.
    pub atlas: Option<String>,
    pub target_fps: u64,
    pub debug_draw: bool,
    pub debug_avoidance: bool,
    /// Ticks between periodic stats log lines.
    pub log_interval: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            atlas: None,
            target_fps: 60,
            debug_draw: true,
            debug_avoidance: false,
            log_interval: 1000,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(default)]
pub struct AppConfig {
    pub world: WorldConfig,
    pub giraffe: GiraffeConfig,
    pub lion: LionConfig,
    pub steering: SteeringConfig,
    pub food: FoodConfig,
    pub game: GameConfig,
    /// Key name to action name.
    pub binds: BTreeMap<String, String>,
}

pub fn default_binds() -> BTreeMap<String, String> {
    [
        ("q", "quit"),
        ("escape", "quit"),
        ("d", "debug_draw"),
        ("a", "debug_avoidance"),
        ("1", "add_one"),
        ("5", "add_five"),
        ("0", "add_ten"),
    ]
    .into_iter()
    .map(|(key, action)| (key.to_string(), action.to_string()))
    .collect()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            world: WorldConfig::default(),
            giraffe: GiraffeConfig::default(),
            lion: LionConfig::default(),
            steering: SteeringConfig::default(),
            food: FoodConfig::default(),
            game: GameConfig::default(),
            binds: default_binds(),
        }
    }
}

impl AppConfig {
    /// Validates all configuration parameters.
    ///
    /// Returns `Ok(())` if all parameters are valid, or `Err` with a description
    /// of the first validation failure.
    ///
    /// # Validation Rules
    /// - World dimensions, masses, speeds, forces and radii must be positive
    /// - Rates and distances must be non-negative
    /// - Factors must be in `[0.0, 1.0]`
    /// - The herd cap may not exceed the hard cap of 5000
    /// - Every float must be finite, and the field must fit the spatial grid
    pub fn validate(&self) -> anyhow::Result<()> {
        for (name, value) in self.float_fields() {
            anyhow::ensure!(value.is_finite(), "{name} must be finite (got {value})");
        }

        // World validation
        anyhow::ensure!(
            self.world.width > 0.0 && self.world.height > 0.0,
            "World dimensions must be positive"
        );
        if self.world.spatial_cell_size > 0.0 {
            let cols = (self.world.width / self.world.spatial_cell_size).ceil();
            let rows = (self.world.height / self.world.spatial_cell_size).ceil();
            anyhow::ensure!(
                cols * rows <= MAX_GRID_CELLS,
                "World too large for a spatial cell size of {} (max {MAX_GRID_CELLS} cells)",
                self.world.spatial_cell_size
            );
        }
        anyhow::ensure!(
            self.world.max_giraffes <= GIRAFFE_CAP,
            "Max giraffes too large (max {GIRAFFE_CAP})"
        );
        anyhow::ensure!(
            self.world.initial_giraffes <= self.world.max_giraffes,
            "Initial giraffes exceed max giraffes"
        );
        anyhow::ensure!(self.world.max_dt > 0.0, "Max dt must be positive");
        anyhow::ensure!(
            self.world.spatial_cell_size > 0.0,
            "Spatial cell size must be positive"
        );
        anyhow::ensure!(
            self.world.lake_radius > 0.0
                && self.world.tree_radius > 0.0
                && self.world.rock_radius > 0.0,
            "Obstacle radii must be positive"
        );
        for obstacle in &self.world.obstacles {
            anyhow::ensure!(
                obstacle.radius > 0.0,
                "Obstacle at ({}, {}) must have a positive radius",
                obstacle.x,
                obstacle.y
            );
        }

        // Giraffe validation
        anyhow::ensure!(self.giraffe.mass > 0.0, "Giraffe mass must be positive");
        anyhow::ensure!(
            self.giraffe.max_force > 0.0 && self.giraffe.max_speed > 0.0,
            "Giraffe max force and max speed must be positive"
        );
        anyhow::ensure!(self.giraffe.radius > 0.0, "Giraffe radius must be positive");
        anyhow::ensure!(
            self.giraffe.carcass_lifetime >= 0.0,
            "Carcass lifetime must be non-negative"
        );
        anyhow::ensure!(
            self.giraffe.spawn_velocity >= 0.0,
            "Spawn velocity must be non-negative"
        );

        // Lion validation
        anyhow::ensure!(self.lion.mass > 0.0, "Lion mass must be positive");
        anyhow::ensure!(
            self.lion.max_force > 0.0 && self.lion.max_speed > 0.0,
            "Lion max force and max speed must be positive"
        );
        anyhow::ensure!(self.lion.radius > 0.0, "Lion radius must be positive");
        anyhow::ensure!(self.lion.max_energy > 0.0, "Lion max energy must be positive");
        anyhow::ensure!(
            self.lion.recharge_rate >= 0.0 && self.lion.exertion_rate >= 0.0,
            "Lion energy rates must be non-negative"
        );
        anyhow::ensure!(self.lion.kill_reach >= 0.0, "Kill reach must be non-negative");
        anyhow::ensure!(
            self.lion.pursuit_prediction >= 0.0,
            "Pursuit prediction must be non-negative"
        );

        // Steering validation
        let s = &self.steering;
        anyhow::ensure!(
            s.arrival_distance >= 0.0
                && s.panic_distance >= 0.0
                && s.separation_radius >= 0.0
                && s.min_look_ahead >= 0.0
                && s.look_ahead_time >= 0.0
                && s.bounds_margin >= 0.0,
            "Steering distances must be non-negative"
        );
        anyhow::ensure!(
            s.bounds_margin * 2.0 < self.world.width.min(self.world.height),
            "Bounds margin must leave room inside the field"
        );
        anyhow::ensure!(s.drag >= 0.0, "Drag must be non-negative");
        anyhow::ensure!(
            (0.0..=1.0).contains(&s.lake_speed_factor),
            "Lake speed factor must be in [0.0, 1.0]"
        );
        let w = &s.weights;
        anyhow::ensure!(
            w.arrival >= 0.0 && w.flee >= 0.0 && w.separation >= 0.0 && w.avoidance >= 0.0,
            "Behavior weights must be non-negative"
        );

        // Food validation
        anyhow::ensure!(self.food.radius > 0.0, "Food radius must be positive");

        // Game validation
        anyhow::ensure!(self.game.target_fps > 0, "Target FPS must be positive");
        anyhow::ensure!(self.game.target_fps <= 240, "Target FPS too high (max 240)");
        anyhow::ensure!(self.game.log_interval > 0, "Log interval must be positive");

        Ok(())
    }

    fn float_fields(&self) -> Vec<(String, f32)> {
        let (w, g, l, s, f) = (&self.world, &self.giraffe, &self.lion, &self.steering, &self.food);
        let mut fields: Vec<(String, f32)> = [
            ("world.width", w.width),
            ("world.height", w.height),
            ("world.max_dt", w.max_dt),
            ("world.lake_radius", w.lake_radius),
            ("world.tree_radius", w.tree_radius),
            ("world.rock_radius", w.rock_radius),
            ("world.spatial_cell_size", w.spatial_cell_size),
            ("giraffe.mass", g.mass),
            ("giraffe.max_force", g.max_force),
            ("giraffe.max_speed", g.max_speed),
            ("giraffe.radius", g.radius),
            ("giraffe.carcass_lifetime", g.carcass_lifetime),
            ("giraffe.spawn_velocity", g.spawn_velocity),
            ("lion.mass", l.mass),
            ("lion.max_force", l.max_force),
            ("lion.max_speed", l.max_speed),
            ("lion.radius", l.radius),
            ("lion.max_energy", l.max_energy),
            ("lion.recharge_rate", l.recharge_rate),
            ("lion.exertion_rate", l.exertion_rate),
            ("lion.kill_reach", l.kill_reach),
            ("lion.pursuit_prediction", l.pursuit_prediction),
            ("steering.arrival_distance", s.arrival_distance),
            ("steering.panic_distance", s.panic_distance),
            ("steering.separation_radius", s.separation_radius),
            ("steering.min_look_ahead", s.min_look_ahead),
            ("steering.look_ahead_time", s.look_ahead_time),
            ("steering.bounds_margin", s.bounds_margin),
            ("steering.drag", s.drag),
            ("steering.lake_speed_factor", s.lake_speed_factor),
            ("steering.weights.arrival", s.weights.arrival),
            ("steering.weights.flee", s.weights.flee),
            ("steering.weights.separation", s.weights.separation),
            ("steering.weights.avoidance", s.weights.avoidance),
            ("food.radius", f.radius),
        ]
        .into_iter()
        .map(|(name, value)| (name.to_string(), value))
        .collect();

        for (i, obstacle) in w.obstacles.iter().enumerate() {
            fields.push((format!("world.obstacles[{i}].x"), obstacle.x));
            fields.push((format!("world.obstacles[{i}].y"), obstacle.y));
            fields.push((format!("world.obstacles[{i}].radius"), obstacle.radius));
        }
        fields
    }

    /// Parses and validates configuration from TOML text.
    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let config = toml::from_str::<Self>(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from `path`.
    ///
    /// A missing file yields the defaults (with a warning); a file that exists
    /// but does not parse or validate is an error.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml(&content)
                .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display())),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(path = %path.display(), "Config file not found, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Could not open config file {}: {e}",
                path.display()
            )),
        }
    }
}
