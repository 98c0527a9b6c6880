//! The engine seam: sprites, atlas frames and keyboard input.
//!
//! The game only ever talks to a [`SpriteBatch`]. [`HeadlessSprites`] records
//! what it is told, which is what tests and batch runs use; the terminal
//! renderer lives in `savanna_tui`.

pub mod action_binds;
pub mod atlas;
pub mod error;
pub mod input;
pub mod sprites;

pub use action_binds::ActionBinds;
pub use atlas::{Atlas, AtlasFrame, FrameShape};
pub use error::{EngineError, Result};
pub use input::{InputCommand, Key, TriggerState};
pub use sprites::{DebugLine, HeadlessSprites, Sprite, SpriteBatch, SpriteInstance, SpriteStore};
