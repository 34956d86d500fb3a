//! Configuration types for shader and texture resources
//!
//! Small, serializable configuration structs with validation and defaults.
//! Hosts can construct these in code or load them from a TOML file.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Errors raised while loading or validating configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read
    #[error("failed to read config file {path}: {source}")]
    Io {
        /// Path that failed to read
        path: String,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// The configuration file could not be parsed as TOML
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A configured shader source file does not exist
    #[error("shader file not found: {0}")]
    MissingShader(String),
}

/// Shader source configuration
///
/// Holds the file paths for a vertex/fragment shader pair. Paths point at
/// plain-text GLSL source files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShaderConfig {
    /// Path to the vertex shader source file
    pub vertex_shader_path: String,
    /// Path to the fragment shader source file
    pub fragment_shader_path: String,
}

impl ShaderConfig {
    /// Create a new shader configuration
    pub fn new(vertex_path: impl Into<String>, fragment_path: impl Into<String>) -> Self {
        Self {
            vertex_shader_path: vertex_path.into(),
            fragment_shader_path: fragment_path.into(),
        }
    }

    /// Validate that both shader source files exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !Path::new(&self.vertex_shader_path).exists() {
            return Err(ConfigError::MissingShader(self.vertex_shader_path.clone()));
        }
        if !Path::new(&self.fragment_shader_path).exists() {
            return Err(ConfigError::MissingShader(self.fragment_shader_path.clone()));
        }
        Ok(())
    }
}

/// Texture coordinate wrapping mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextureWrap {
    /// Repeat the texture outside [0, 1]
    #[default]
    Repeat,
    /// Clamp coordinates to the texture edge
    ClampToEdge,
}

/// Texture sampling filter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TextureFilter {
    /// Bilinear filtering
    #[default]
    Linear,
    /// Nearest-neighbor filtering
    Nearest,
}

/// Sampling parameters applied when a texture is uploaded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct TextureParams {
    /// Coordinate wrapping mode for both axes
    pub wrap: TextureWrap,
    /// Minification/magnification filter
    pub filter: TextureFilter,
}

/// Top-level configuration for a scene host
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SceneConfig {
    /// Optional shader pair to attach at the scene root
    pub shader: Option<ShaderConfig>,
    /// Default texture sampling parameters
    pub texture: TextureParams,
}

impl SceneConfig {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(text)?)
    }
}
