// Asset loading
//
// Images are read once at startup. Missing art never stops the game: sheets
// fall back to generated placeholders with the same cell geometry.

mod loader;
mod sheet;

pub use loader::{AssetLoader, AssetType};
pub use sheet::SpriteSheet;

/// Asset loading errors
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Failed to decode {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid sprite sheet {name}: {reason}")]
    InvalidSheet { name: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
