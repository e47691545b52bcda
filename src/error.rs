//! Error types for scene construction and configuration.
//!
//! Rendering itself never fails: every problem is detected while the
//! [`Scene`](crate::scene::Scene) is built, before the pixel loop starts.

use std::path::PathBuf;

use thiserror::Error;

use crate::scene::PrimitiveKind;

/// Errors that can occur while preparing a render.
#[derive(Error, Debug)]
pub enum RenderError {
    /// The scene contains a primitive the geometry kernel cannot intersect.
    #[error("unsupported primitive {kind:?} at index {index}")]
    UnsupportedPrimitive {
        /// Position of the shape in the flattened shape list.
        index: usize,
        /// The rejected kind.
        kind: PrimitiveKind,
    },

    /// A primitive's composite transform cannot be inverted.
    #[error("primitive {index} has a degenerate transform (determinant {determinant})")]
    DegenerateTransform {
        /// Position of the shape in the flattened shape list.
        index: usize,
        /// Determinant of the offending CTM.
        determinant: f32,
    },

    /// Output image has no pixels.
    #[error("invalid image dimensions {width}x{height}")]
    InvalidDimensions {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// Capability that this renderer does not provide.
    #[error("{0} is not implemented")]
    Unsupported(&'static str),

    /// Texture image could not be decoded.
    #[error("failed to load texture {path}: {source}")]
    Texture {
        /// File the texture was read from.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// Rendered image could not be written.
    #[error("failed to save image {path}: {source}")]
    Output {
        /// Destination file.
        path: PathBuf,
        /// Encoder error.
        #[source]
        source: image::ImageError,
    },

    /// Render configuration file is malformed.
    #[error("invalid config {path}: {message}")]
    Config {
        /// File the configuration was read from.
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// I/O failure while reading an input file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for renderer operations.
pub type Result<T> = std::result::Result<T, RenderError>;
