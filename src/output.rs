//! PNG output for rendered images.
//!
//! The tracer already clamps and quantizes every pixel, so the buffer is
//! written as-is with no tone mapping or gamma correction.

use chromaray::{RenderError, Result};
use image::RgbaImage;
use log::info;

/// Save an RGBA image as PNG.
///
/// # Errors
///
/// Returns [`RenderError::Output`] when the file cannot be encoded or written.
pub fn save_image_as_png(image: &RgbaImage, output_path: &str) -> Result<()> {
    image
        .save_with_format(output_path, image::ImageFormat::Png)
        .map_err(|source| RenderError::Output {
            path: output_path.into(),
            source,
        })?;
    info!(
        "Image saved as {} ({}x{})",
        output_path,
        image.width(),
        image.height()
    );
    Ok(())
}
