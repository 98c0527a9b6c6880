//! Error types for the engine seam.

use savanna_data::SpriteId;
use thiserror::Error;

/// Main error type for engine operations.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The atlas has no frame with this name
    #[error("Unknown atlas frame: {0}")]
    UnknownFrame(String),

    /// The sprite was never added or was already removed
    #[error("Unknown sprite: {0:?}")]
    UnknownSprite(SpriteId),

    /// A key name that does not parse
    #[error("Invalid key name: {0}")]
    InvalidKey(String),

    /// Atlas description errors
    #[error("Atlas parse error: {0}")]
    AtlasParse(#[from] toml::de::Error),

    /// Atlas contents that parse but make no sense
    #[error("Invalid atlas: {0}")]
    InvalidAtlas(String),

    /// File system and terminal errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
