use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Opaque identity of a sprite owned by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SpriteId(pub u64);

/// Links a simulated actor to the sprite that presents it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteHandle(pub SpriteId);

/// Kinematic state shared by every moving actor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mob {
    pub mass: f32,
    pub position: Vec2,
    pub velocity: Vec2,
    /// Clamped steering force applied during the last integration step.
    pub steering_direction: Vec2,
    /// Point the mob is currently steering for.
    pub steering_target: Vec2,
    pub max_force: f32,
    pub max_speed: f32,
    /// Facing in radians.
    pub orientation: f32,
    pub radius: f32,
}

impl Default for Mob {
    fn default() -> Self {
        Self {
            mass: 100.0,
            position: Vec2::ZERO,
            velocity: Vec2::ZERO,
            steering_direction: Vec2::ZERO,
            steering_target: Vec2::ZERO,
            max_force: 30.0,
            max_speed: 30.0,
            orientation: 0.0,
            radius: 10.0,
        }
    }
}

impl Mob {
    #[must_use]
    pub fn at(position: Vec2) -> Self {
        Self {
            position,
            steering_target: position,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }

    /// Unit direction of travel, or the facing direction when at rest.
    #[must_use]
    pub fn heading(&self) -> Vec2 {
        let heading = self.velocity.normalize_or_zero();
        if heading == Vec2::ZERO {
            Vec2::from_angle(self.orientation)
        } else {
            heading
        }
    }
}

/// Prey marker. A dead giraffe stays on the field as a carcass until its timer runs out.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Giraffe {
    pub dead: bool,
    pub carcass_timer: f32,
}

impl Giraffe {
    #[must_use]
    pub fn is_alive(&self) -> bool {
        !self.dead
    }
}

/// Food the herd walks toward. Food never moves; eaten food is relocated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Food {
    pub position: Vec2,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum LionState {
    /// Recharging energy, not pursuing anything.
    #[default]
    Resting,
    /// Locked on a giraffe and chasing it.
    Hunting,
}
