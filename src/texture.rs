//! Texture sampling.
//!
//! The renderer never decodes files while tracing. A [`TextureMap`] wraps an
//! in-memory texel grid (anything implementing [`Texture`]) together with the
//! material's repeat factors and answers nearest-pixel lookups in UV space.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use image::{Rgba, RgbaImage};

use crate::error::{RenderError, Result};

/// Color returned when no texture is bound to a surface.
pub const NO_TEXTURE: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A 2-D grid of RGBA texels.
pub trait Texture: Send + Sync + fmt::Debug {
    /// Width and height in texels.
    fn dimensions(&self) -> (u32, u32);

    /// Texel at column `x`, row `y` (row 0 is the top of the image).
    fn texel(&self, x: u32, y: u32) -> Rgba<u8>;
}

impl Texture for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        RgbaImage::dimensions(self)
    }

    fn texel(&self, x: u32, y: u32) -> Rgba<u8> {
        *self.get_pixel(x, y)
    }
}

/// A texture bound to a material, with its repeat factors.
#[derive(Clone)]
pub struct TextureMap {
    texture: Arc<dyn Texture>,
    /// Number of times the texture repeats across U.
    pub repeat_u: f32,
    /// Number of times the texture repeats across V.
    pub repeat_v: f32,
}

impl fmt::Debug for TextureMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (width, height) = self.texture.dimensions();
        f.debug_struct("TextureMap")
            .field("width", &width)
            .field("height", &height)
            .field("repeat_u", &self.repeat_u)
            .field("repeat_v", &self.repeat_v)
            .finish()
    }
}

impl TextureMap {
    /// Bind an already loaded texture.
    pub fn new(texture: Arc<dyn Texture>, repeat_u: f32, repeat_v: f32) -> Self {
        Self {
            texture,
            repeat_u,
            repeat_v,
        }
    }

    /// Decode an image file into an RGBA texture.
    pub fn open(path: impl AsRef<Path>, repeat_u: f32, repeat_v: f32) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path)
            .map_err(|source| RenderError::Texture {
                path: path.to_path_buf(),
                source,
            })?
            .to_rgba8();
        log::debug!(
            "Loaded texture {} ({}x{})",
            path.display(),
            image.width(),
            image.height()
        );
        Ok(Self::new(Arc::new(image), repeat_u, repeat_v))
    }

    /// Nearest texel for surface coordinates `(u, v)` in `[0, 1]`.
    ///
    /// `v = 1` is the top row of the image. Coordinates are scaled by the
    /// repeat factors and wrapped, so `u = 1` lands back on column 0.
    pub fn sample(&self, u: f32, v: f32) -> Rgba<u8> {
        let (width, height) = self.texture.dimensions();
        if width == 0 || height == 0 {
            return NO_TEXTURE;
        }
        let column = wrap(u * self.repeat_u * width as f32, width);
        let row = wrap((1.0 - v) * self.repeat_v * height as f32, height);
        self.texture.texel(column, row)
    }
}

/// Floor `coordinate` and wrap it into `0..size`.
fn wrap(coordinate: f32, size: u32) -> u32 {
    // `as` saturates and maps NaN to 0
    (coordinate.floor() as i64).rem_euclid(size as i64) as u32
}
