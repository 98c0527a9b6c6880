use serde::{Deserialize, Serialize};

/// RGBA color with channels in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Color4f {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color4f {
    pub const WHITE: Color4f = Color4f::new(1.0, 1.0, 1.0, 1.0);
    pub const BLACK: Color4f = Color4f::new(0.0, 0.0, 0.0, 1.0);

    #[must_use]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Channels as 8-bit values, clamped.
    #[must_use]
    pub fn to_rgb8(self) -> (u8, u8, u8) {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        (channel(self.r), channel(self.g), channel(self.b))
    }
}

impl Default for Color4f {
    fn default() -> Self {
        Self::WHITE
    }
}

/// The pico-8 palette.
pub mod pico8 {
    use super::Color4f;

    pub const BLACK: Color4f = Color4f::new(0.000, 0.000, 0.000, 1.0);
    pub const DARK_BLUE: Color4f = Color4f::new(0.114, 0.169, 0.325, 1.0);
    pub const DARK_PURPLE: Color4f = Color4f::new(0.494, 0.145, 0.325, 1.0);
    pub const DARK_GREEN: Color4f = Color4f::new(0.000, 0.529, 0.318, 1.0);
    pub const BROWN: Color4f = Color4f::new(0.671, 0.322, 0.212, 1.0);
    pub const DARK_GRAY: Color4f = Color4f::new(0.373, 0.341, 0.310, 1.0);
    pub const LIGHT_GRAY: Color4f = Color4f::new(0.761, 0.765, 0.780, 1.0);
    pub const WHITE: Color4f = Color4f::new(1.000, 0.945, 0.910, 1.0);
    pub const RED: Color4f = Color4f::new(1.000, 0.000, 0.302, 1.0);
    pub const ORANGE: Color4f = Color4f::new(1.000, 0.639, 0.000, 1.0);
    pub const YELLOW: Color4f = Color4f::new(1.000, 0.925, 0.153, 1.0);
    pub const GREEN: Color4f = Color4f::new(0.000, 0.894, 0.212, 1.0);
    pub const BLUE: Color4f = Color4f::new(0.161, 0.678, 1.000, 1.0);
    pub const LAVENDER: Color4f = Color4f::new(0.514, 0.463, 0.612, 1.0);
    pub const PINK: Color4f = Color4f::new(1.000, 0.467, 0.659, 1.0);
    pub const PEACH: Color4f = Color4f::new(1.000, 0.800, 0.667, 1.0);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_rgb8_clamps() {
        let c = Color4f::new(1.5, -0.2, 0.5, 1.0);
        assert_eq!(c.to_rgb8(), (255, 0, 128));
    }
}
