//! Sprite atlas: named frames with a size and a terminal rendering hint.

use std::collections::BTreeMap;
use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// How a terminal draws a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FrameShape {
    /// A single character at the sprite position.
    #[default]
    Glyph,
    /// A circle filling the sprite's scaled extent.
    Disc,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AtlasFrame {
    pub name: String,
    /// Size in world units before any sprite scaling.
    pub size: Vec2,
    pub glyph: char,
    #[serde(default)]
    pub shape: FrameShape,
}

impl AtlasFrame {
    pub fn new(name: &str, size: Vec2, glyph: char, shape: FrameShape) -> Self {
        Self {
            name: name.to_string(),
            size,
            glyph,
            shape,
        }
    }
}

#[derive(Debug, Deserialize)]
struct AtlasFile {
    frames: Vec<AtlasFrame>,
}

/// Frames by name.
///
/// # Example atlas file
///
/// ```toml
/// [[frames]]
/// name = "giraffe"
/// size = [20.0, 20.0]
/// glyph = "G"
///
/// [[frames]]
/// name = "lake"
/// size = [1.0, 1.0]
/// glyph = "~"
/// shape = "disc"
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Atlas {
    frames: BTreeMap<String, AtlasFrame>,
}

impl Default for Atlas {
    fn default() -> Self {
        Self::from_frames([
            AtlasFrame::new("giraffe", Vec2::splat(20.0), 'G', FrameShape::Glyph),
            AtlasFrame::new("lion", Vec2::splat(28.0), 'L', FrameShape::Glyph),
            AtlasFrame::new("food", Vec2::splat(16.0), '*', FrameShape::Glyph),
            AtlasFrame::new("lake", Vec2::ONE, '~', FrameShape::Disc),
            AtlasFrame::new("tree", Vec2::ONE, 'T', FrameShape::Disc),
            AtlasFrame::new("rock", Vec2::ONE, 'o', FrameShape::Disc),
        ])
    }
}

impl Atlas {
    pub fn from_frames(frames: impl IntoIterator<Item = AtlasFrame>) -> Self {
        Self {
            frames: frames
                .into_iter()
                .map(|frame| (frame.name.clone(), frame))
                .collect(),
        }
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let file: AtlasFile = toml::from_str(content)?;
        for frame in &file.frames {
            if !(frame.size.x > 0.0 && frame.size.y > 0.0) {
                return Err(EngineError::InvalidAtlas(format!(
                    "frame '{}' must have a positive size",
                    frame.name
                )));
            }
        }
        let atlas = Self::from_frames(file.frames);
        if atlas.is_empty() {
            return Err(EngineError::InvalidAtlas("no frames".to_string()));
        }
        Ok(atlas)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let atlas = Self::from_toml(&content)?;
        tracing::info!(
            path = %path.as_ref().display(),
            frames = %atlas.names().collect::<Vec<_>>().join(","),
            "Atlas loaded"
        );
        Ok(atlas)
    }

    #[must_use]
    pub fn frame(&self, name: &str) -> Option<&AtlasFrame> {
        self.frames.get(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Frame names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.frames.keys().map(String::as_str)
    }
}
