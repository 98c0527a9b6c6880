//! The sprite batch seam between the game and whatever draws it.

use std::collections::BTreeMap;

use glam::{Mat4, Vec2};
use savanna_data::{Color4f, SpriteId};

use crate::atlas::{Atlas, AtlasFrame};
use crate::error::{EngineError, Result};

/// A sprite handed out by [`SpriteBatch::add_sprite`].
#[derive(Debug, Clone, PartialEq)]
pub struct Sprite {
    pub id: SpriteId,
    pub frame: String,
}

/// A 2D segment drawn on top of the sprites for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    pub from: Vec2,
    pub to: Vec2,
    pub color: Color4f,
}

/// Everything a renderer needs to know about one sprite.
///
/// Transforms are double buffered: `transform_sprite` writes `pending`,
/// `commit_sprites` copies it to `committed`, which is what gets drawn.
/// A new sprite starts with a zero transform and is invisible until placed.
#[derive(Debug, Clone, PartialEq)]
pub struct SpriteInstance {
    pub frame: String,
    pub color: Color4f,
    pub pending: Mat4,
    pub committed: Mat4,
}

impl SpriteInstance {
    #[must_use]
    pub fn position(&self) -> Vec2 {
        self.committed.w_axis.truncate().truncate()
    }

    #[must_use]
    pub fn rotation(&self) -> f32 {
        let x = self.committed.x_axis;
        x.y.atan2(x.x)
    }

    /// Horizontal and vertical scale of the committed transform.
    #[must_use]
    pub fn scale(&self) -> Vec2 {
        Vec2::new(
            self.committed.x_axis.truncate().length(),
            self.committed.y_axis.truncate().length(),
        )
    }

    #[must_use]
    pub fn layer(&self) -> f32 {
        self.committed.w_axis.z
    }
}

/// Engine collaborator the presentation layer talks to.
pub trait SpriteBatch {
    /// Replaces the atlas. Sprites already added keep their frame names.
    fn load_atlas(&mut self, atlas: Atlas);
    /// Creates a sprite showing atlas frame `frame`. Fails for unknown frames.
    fn add_sprite(&mut self, frame: &str, color: Color4f) -> Result<Sprite>;
    fn remove_sprite(&mut self, id: SpriteId) -> Result<()>;
    fn transform_sprite(&mut self, id: SpriteId, transform: Mat4) -> Result<()>;
    fn color_sprite(&mut self, id: SpriteId, color: Color4f) -> Result<()>;
    /// Per-frame animation hook with the absolute time `t` and step `dt`.
    fn update_sprites(&mut self, t: f64, dt: f32);
    /// Publishes pending transforms and debug lines for rendering.
    fn commit_sprites(&mut self);
    fn render_sprites(&mut self) -> Result<()>;
    fn atlas_frame(&self, name: &str) -> Option<&AtlasFrame>;
    fn debug_line(&mut self, from: Vec2, to: Vec2, color: Color4f);
    fn status_text(&mut self, _lines: &[String]) {}
}

/// Sprite bookkeeping shared by the engine implementations.
#[derive(Debug, Clone)]
pub struct SpriteStore {
    pub atlas: Atlas,
    pub instances: BTreeMap<SpriteId, SpriteInstance>,
    next_id: u64,
    pending_lines: Vec<DebugLine>,
    pub committed_lines: Vec<DebugLine>,
    pub time: f64,
}

impl SpriteStore {
    pub fn new(atlas: Atlas) -> Self {
        Self {
            atlas,
            instances: BTreeMap::new(),
            next_id: 1,
            pending_lines: Vec::new(),
            committed_lines: Vec::new(),
            time: 0.0,
        }
    }

    pub fn add(&mut self, frame: &str, color: Color4f) -> Result<Sprite> {
        if self.atlas.frame(frame).is_none() {
            return Err(EngineError::UnknownFrame(frame.to_string()));
        }
        let id = SpriteId(self.next_id);
        self.next_id += 1;
        self.instances.insert(
            id,
            SpriteInstance {
                frame: frame.to_string(),
                color,
                pending: Mat4::ZERO,
                committed: Mat4::ZERO,
            },
        );
        Ok(Sprite {
            id,
            frame: frame.to_string(),
        })
    }

    pub fn remove(&mut self, id: SpriteId) -> Result<()> {
        self.instances
            .remove(&id)
            .map(|_| ())
            .ok_or(EngineError::UnknownSprite(id))
    }

    fn instance_mut(&mut self, id: SpriteId) -> Result<&mut SpriteInstance> {
        self.instances
            .get_mut(&id)
            .ok_or(EngineError::UnknownSprite(id))
    }

    pub fn transform(&mut self, id: SpriteId, transform: Mat4) -> Result<()> {
        self.instance_mut(id)?.pending = transform;
        Ok(())
    }

    pub fn color(&mut self, id: SpriteId, color: Color4f) -> Result<()> {
        self.instance_mut(id)?.color = color;
        Ok(())
    }

    pub fn line(&mut self, from: Vec2, to: Vec2, color: Color4f) {
        self.pending_lines.push(DebugLine { from, to, color });
    }

    pub fn commit(&mut self) {
        for instance in self.instances.values_mut() {
            instance.committed = instance.pending;
        }
        self.committed_lines = std::mem::take(&mut self.pending_lines);
    }

    #[must_use]
    pub fn get(&self, id: SpriteId) -> Option<&SpriteInstance> {
        self.instances.get(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}

/// A sprite batch that draws nothing and remembers everything.
#[derive(Debug, Clone)]
pub struct HeadlessSprites {
    pub store: SpriteStore,
    pub commits: u64,
    pub renders: u64,
    pub status: Vec<String>,
}

impl HeadlessSprites {
    pub fn new(atlas: Atlas) -> Self {
        Self {
            store: SpriteStore::new(atlas),
            commits: 0,
            renders: 0,
            status: Vec::new(),
        }
    }
}

impl Default for HeadlessSprites {
    fn default() -> Self {
        Self::new(Atlas::default())
    }
}

impl SpriteBatch for HeadlessSprites {
    fn load_atlas(&mut self, atlas: Atlas) {
        self.store.atlas = atlas;
    }

    fn add_sprite(&mut self, frame: &str, color: Color4f) -> Result<Sprite> {
        self.store.add(frame, color)
    }

    fn remove_sprite(&mut self, id: SpriteId) -> Result<()> {
        self.store.remove(id)
    }

    fn transform_sprite(&mut self, id: SpriteId, transform: Mat4) -> Result<()> {
        self.store.transform(id, transform)
    }

    fn color_sprite(&mut self, id: SpriteId, color: Color4f) -> Result<()> {
        self.store.color(id, color)
    }

    fn update_sprites(&mut self, t: f64, _dt: f32) {
        self.store.time = t;
    }

    fn commit_sprites(&mut self) {
        self.store.commit();
        self.commits += 1;
    }

    fn render_sprites(&mut self) -> Result<()> {
        self.renders += 1;
        Ok(())
    }

    fn atlas_frame(&self, name: &str) -> Option<&AtlasFrame> {
        self.store.atlas.frame(name)
    }

    fn debug_line(&mut self, from: Vec2, to: Vec2, color: Color4f) {
        self.store.line(from, to, color);
    }

    fn status_text(&mut self, lines: &[String]) {
        self.status = lines.to_vec();
    }
}
