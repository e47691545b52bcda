//! Renderer configuration.

use std::path::Path;

use serde::Deserialize;

use crate::error::{RenderError, Result};

/// Depth budget used when nothing else is configured.
pub const DEFAULT_MAX_DEPTH: u32 = 4;

/// Tracer settings.
///
/// Every field has a default, so a TOML file only needs the keys it changes:
///
/// ```toml
/// max_depth = 2
/// enable_refraction = false
/// parallel = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TracerConfig {
    /// Depth budget of secondary rays spawned from a primary hit.
    pub max_depth: u32,
    /// Cast shadow rays; when off every light reaches every surface.
    pub enable_shadows: bool,
    /// Follow mirror reflections.
    pub enable_reflection: bool,
    /// Follow refracted rays into transparent materials.
    pub enable_refraction: bool,
    /// Sample bound textures for the diffuse term.
    pub enable_texture_map: bool,
    /// Render image rows on the rayon thread pool.
    pub parallel: bool,
    /// Draw a progress bar while rendering.
    pub show_progress: bool,
}

impl Default for TracerConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            enable_shadows: true,
            enable_reflection: true,
            enable_refraction: true,
            enable_texture_map: true,
            parallel: false,
            show_progress: false,
        }
    }
}

impl TracerConfig {
    /// Parse a configuration from TOML text.
    pub fn from_toml_str(text: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Load a configuration file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text).map_err(|e| RenderError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }
}
