//! Ray representation for 3D ray tracing.
//!
//! A ray is defined as r(t) = origin + t * direction. Rays are cheap `Copy`
//! values created per query and moved between world and object space with
//! [`Ray::transform`].

use glam::{Mat4, Vec3A};

/// Ray in 3D space defined by origin and direction.
///
/// Mathematical representation: r(t) = origin + t * direction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Starting point of the ray.
    ///
    /// The camera position for primary rays, or a slightly offset surface
    /// point for shadow, reflected and refracted rays.
    pub origin: Vec3A,

    /// Direction vector of the ray.
    ///
    /// Not required to be normalized. Object-space rays keep the scale the
    /// inverse CTM gives them, so a parameter `t` found in object space is
    /// the same `t` along the world-space ray.
    pub direction: Vec3A,
}

impl Ray {
    /// Create a new ray with origin and direction.
    pub fn new(origin: Vec3A, direction: Vec3A) -> Self {
        Self { origin, direction }
    }

    /// Compute a point at parameter t along the ray.
    ///
    /// Returns r(t) = origin + t * direction.
    pub fn at(&self, t: f32) -> Vec3A {
        self.origin + t * self.direction
    }

    /// Map the ray through an affine matrix.
    ///
    /// The origin is transformed as a point (w = 1) and the direction as a
    /// vector (w = 0).
    pub fn transform(&self, matrix: &Mat4) -> Ray {
        Ray {
            origin: matrix.transform_point3a(self.origin),
            direction: matrix.transform_vector3a(self.direction),
        }
    }
}
