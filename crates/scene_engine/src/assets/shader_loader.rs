//! Plain-text shader source loading

use crate::assets::AssetError;
use crate::config::ShaderConfig;
use std::fs;
use std::path::Path;

/// A vertex/fragment shader source pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSource {
    /// Vertex shader source text
    pub vertex: String,
    /// Fragment shader source text
    pub fragment: String,
}

impl ShaderSource {
    /// Read both shader stages from source files
    pub fn from_files(
        vertex_path: impl AsRef<Path>,
        fragment_path: impl AsRef<Path>,
    ) -> Result<Self, AssetError> {
        Ok(Self {
            vertex: read_source(vertex_path.as_ref())?,
            fragment: read_source(fragment_path.as_ref())?,
        })
    }

    /// Read both shader stages from the paths in a [`ShaderConfig`]
    pub fn from_config(config: &ShaderConfig) -> Result<Self, AssetError> {
        Self::from_files(&config.vertex_shader_path, &config.fragment_shader_path)
    }
}

fn read_source(path: &Path) -> Result<String, AssetError> {
    log::debug!("reading shader source {}", path.display());
    fs::read_to_string(path).map_err(|source| AssetError::Io {
        path: path.display().to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_shader_file_is_io_error() {
        let result = ShaderSource::from_files("no/such.vert", "no/such.frag");
        assert!(matches!(result, Err(AssetError::Io { .. })));
    }
}
