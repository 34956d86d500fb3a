//! Asset loading for texture images and shader source
//!
//! File I/O lives here so the scene and render layers only ever see decoded
//! pixel buffers and source strings.

pub mod image_loader;
pub mod shader_loader;

pub use image_loader::ImageData;
pub use shader_loader::ShaderSource;

use thiserror::Error;

/// Errors raised while loading assets from disk or memory
#[derive(Debug, Error)]
pub enum AssetError {
    /// The asset file could not be read
    #[error("I/O error reading {path}: {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The asset bytes could not be decoded
    #[error("failed to decode asset: {0}")]
    DecodeFailed(String),
}
