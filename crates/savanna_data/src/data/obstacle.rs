use super::color::{pico8, Color4f};
use glam::Vec2;
use serde::{Deserialize, Serialize};

/// What an obstacle does to a mob that reaches it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObstacleKind {
    /// Passable water that slows mobs wading through it.
    #[default]
    Lake,
    /// Solid.
    Tree,
    /// Solid.
    Rock,
}

impl ObstacleKind {
    #[must_use]
    pub fn is_solid(self) -> bool {
        !matches!(self, ObstacleKind::Lake)
    }

    #[must_use]
    pub fn default_color(self) -> Color4f {
        match self {
            ObstacleKind::Lake => pico8::BLUE,
            ObstacleKind::Tree => pico8::DARK_GREEN,
            ObstacleKind::Rock => pico8::LIGHT_GRAY,
        }
    }

    /// Atlas frame used to present this kind.
    #[must_use]
    pub fn frame_name(self) -> &'static str {
        match self {
            ObstacleKind::Lake => "lake",
            ObstacleKind::Tree => "tree",
            ObstacleKind::Rock => "rock",
        }
    }
}

/// Static circular region on the field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub position: Vec2,
    pub radius: f32,
    pub color: Color4f,
    pub kind: ObstacleKind,
}

impl Default for Obstacle {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            radius: 100.0,
            color: Color4f::WHITE,
            kind: ObstacleKind::Lake,
        }
    }
}

impl Obstacle {
    #[must_use]
    pub fn new(kind: ObstacleKind, position: Vec2, radius: f32) -> Self {
        Self {
            position,
            radius,
            color: kind.default_color(),
            kind,
        }
    }

    #[must_use]
    pub fn contains(&self, point: Vec2, margin: f32) -> bool {
        let reach = self.radius + margin;
        self.position.distance_squared(point) <= reach * reach
    }
}
