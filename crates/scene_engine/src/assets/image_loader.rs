//! Texture image decoding
//!
//! Decodes image files into contiguous RGBA8 pixel buffers ready for upload
//! through a render backend.

use crate::assets::AssetError;
use std::path::Path;

/// Bytes per pixel for RGBA8 data
const BYTES_PER_PIXEL: usize = 4;

/// A decoded image as a contiguous RGBA8 pixel buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl ImageData {
    /// Decode an image file into RGBA8 pixels
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        log::debug!("decoding image {}", path.display());

        let decoded = image::open(path).map_err(|err| match err {
            image::ImageError::IoError(source) => AssetError::Io {
                path: path.display().to_string(),
                source,
            },
            other => AssetError::DecodeFailed(other.to_string()),
        })?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::info!("loaded {}x{} image from {}", width, height, path.display());

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Decode an image from an in-memory byte buffer
    pub fn from_memory(bytes: &[u8]) -> Result<Self, AssetError> {
        let decoded = image::load_from_memory(bytes)
            .map_err(|err| AssetError::DecodeFailed(err.to_string()))?;

        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        log::debug!("loaded {}x{} image from memory", width, height);

        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Create a single-color image
    ///
    /// Handy as a placeholder texture and in tests.
    pub fn solid_color(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixels = rgba
            .iter()
            .copied()
            .cycle()
            .take((width * height) as usize * BYTES_PER_PIXEL)
            .collect();
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Image width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The raw RGBA8 pixel buffer, row-major, `width * height * 4` bytes
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}
