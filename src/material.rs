//! Surface materials for Phong shading and Whitted recursion.
//!
//! Colors are alpha-extended RGBA coefficients stored in a [`Vec4`]. The
//! alpha channel is carried through shading but the final image is always
//! written fully opaque.

use glam::{Vec3A, Vec4};

use crate::texture::TextureMap;

/// RGBA color type.
pub type Color = Vec4;

/// Material of a primitive.
///
/// A non-zero `reflective` coefficient spawns a mirror ray at every hit and a
/// non-zero `transparent` coefficient spawns a refracted ray.
#[derive(Debug, Clone)]
pub struct Material {
    /// Ambient coefficient, scaled by the global `ka`.
    pub ambient: Color,
    /// Diffuse coefficient, scaled by the global `kd`.
    pub diffuse: Color,
    /// Specular coefficient, scaled by the global `ks`.
    pub specular: Color,
    /// Mirror reflection coefficient.
    pub reflective: Color,
    /// Transmission coefficient.
    pub transparent: Color,
    /// Phong exponent.
    pub shininess: f32,
    /// Mix between texture color (1.0) and diffuse coefficient (0.0).
    pub blend: f32,
    /// Index of refraction of the material's interior.
    pub ior: f32,
    /// Optional texture sampled for the diffuse term.
    pub texture: Option<TextureMap>,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            ambient: Color::ZERO,
            diffuse: Color::ZERO,
            specular: Color::ZERO,
            reflective: Color::ZERO,
            transparent: Color::ZERO,
            shininess: 1.0,
            blend: 0.0,
            ior: 1.0,
            texture: None,
        }
    }
}

impl Material {
    /// Whether hits on this material spawn a reflected ray.
    pub fn is_reflective(&self) -> bool {
        self.reflective != Color::ZERO
    }

    /// Whether hits on this material spawn a refracted ray.
    pub fn is_transparent(&self) -> bool {
        self.transparent != Color::ZERO
    }
}

/// Reflect a vector off a surface using the law of reflection.
pub fn reflect(v: Vec3A, n: Vec3A) -> Vec3A {
    v - 2.0 * v.dot(n) * n
}

/// Refract a unit incident direction through a surface.
///
/// `eta` is the ratio n1 / n2 and `n` is the unit outward normal. The cosine
/// term is taken as `dot(incident, n)` on both sides of the surface, so a ray
/// leaving a closed shape through its far wall continues outward instead of
/// folding back inside. There is no total internal reflection guard: a
/// negative radicand produces NaN components, which every downstream
/// intersection test rejects.
pub fn refract(incident: Vec3A, n: Vec3A, eta: f32) -> Vec3A {
    let cos_theta1 = incident.dot(n);
    let cos_theta2 = (1.0 - eta * eta * (1.0 - cos_theta1 * cos_theta1)).sqrt();
    eta * incident + (eta * cos_theta1 - cos_theta2) * n
}
