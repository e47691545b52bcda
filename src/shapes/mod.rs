//! Geometry kernel: canonical primitives in object space.
//!
//! Every shape is unit sized and centered at the object-space origin:
//!
//! - sphere of radius 0.5
//! - cube spanning `[-0.5, 0.5]` on every axis
//! - cylinder of radius 0.5 spanning `y` in `[-0.5, 0.5]`, capped at both ends
//! - cone with a base of radius 0.5 at `y = -0.5` and its apex at `y = 0.5`
//!
//! World placement is entirely the job of the primitive's CTM; rays reach
//! this module already transformed into object space.
//!
//! Division by zero (axis-parallel rays, degenerate discriminants) is left to
//! IEEE semantics. The resulting infinities and NaNs fail the `t > 0` and
//! slab range checks, so they surface as misses rather than errors.

pub mod cone;
pub mod cube;
pub mod cylinder;
pub mod sphere;

use std::f32::consts::PI;

use glam::Vec3A;
use image::Rgba;

use crate::interval::Interval;
use crate::ray::Ray;
use crate::texture::TextureMap;

/// Coordinates at or beyond this magnitude belong to a flat face.
///
/// Shared edges (cube edges, cylinder and cone rims) are classified as flat,
/// which keeps seam points from picking up a lateral normal.
pub const FLAT_THRESHOLD: f32 = 0.499;

/// Radius of the canonical round primitives.
pub const RADIUS: f32 = 0.5;

/// Closed set of primitive shapes the kernel can intersect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    /// Sphere of radius 0.5.
    Sphere,
    /// Axis-aligned cube of side 1.
    Cube,
    /// Cone with base radius 0.5 and height 1.
    Cone,
    /// Capped cylinder with radius 0.5 and height 1.
    Cylinder,
}

impl Shape {
    /// Nearest intersection parameter of an object-space ray.
    ///
    /// Round shapes only report strictly positive roots. The cube reports
    /// the raw slab entry parameter, which is negative when the ray starts
    /// inside it, so callers must still filter on `t > 0`.
    pub fn intersect(self, ray: &Ray) -> Option<f32> {
        match self {
            Shape::Sphere => sphere::intersect(ray),
            Shape::Cube => cube::intersect(ray),
            Shape::Cone => cone::intersect(ray),
            Shape::Cylinder => cylinder::intersect(ray),
        }
    }

    /// Unit object-space normal at a surface point.
    pub fn normal(self, point: Vec3A) -> Vec3A {
        match self {
            Shape::Sphere => sphere::normal(point),
            Shape::Cube => cube::normal(point),
            Shape::Cone => cone::normal(point),
            Shape::Cylinder => cylinder::normal(point),
        }
    }

    /// Texture coordinates `(u, v)` in `[0, 1]` of a surface point.
    pub fn uv(self, point: Vec3A) -> (f32, f32) {
        match self {
            Shape::Sphere => sphere::uv(point),
            Shape::Cube => cube::uv(point),
            Shape::Cone => cone::uv(point),
            Shape::Cylinder => cylinder::uv(point),
        }
    }

    /// Texture color at a surface point, or `None` if nothing is bound.
    pub fn texture_color(self, point: Vec3A, texture: Option<&TextureMap>) -> Option<Rgba<u8>> {
        texture.map(|map| {
            let (u, v) = self.uv(point);
            map.sample(u, v)
        })
    }
}

/// Real roots of `a t^2 + b t + c = 0`, or `None` for a negative discriminant.
pub(crate) fn solve_quadratic(a: f32, b: f32, c: f32) -> Option<(f32, f32)> {
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return None;
    }
    let sqrtd = discriminant.sqrt();
    Some(((-b - sqrtd) / (2.0 * a), (-b + sqrtd) / (2.0 * a)))
}

/// Smallest strictly positive candidate.
pub(crate) fn closest_forward(candidates: impl IntoIterator<Item = f32>) -> Option<f32> {
    candidates
        .into_iter()
        .filter(|&t| Interval::FORWARD.surrounds(t))
        .fold(None, |best, t| match best {
            Some(b) if b <= t => Some(b),
            _ => Some(t),
        })
}

/// Parameter at which the ray crosses the horizontal plane `y = height`,
/// kept only if the crossing lies on the disc of radius 0.5.
pub(crate) fn cap_hit(ray: &Ray, height: f32) -> Option<f32> {
    let t = (height - ray.origin.y) / ray.direction.y;
    let x = ray.origin.x + t * ray.direction.x;
    let z = ray.origin.z + t * ray.direction.z;
    (x * x + z * z <= RADIUS * RADIUS).then_some(t)
}

/// Longitude coordinate around the y axis.
pub(crate) fn angular_u(point: Vec3A) -> f32 {
    let theta = point.z.atan2(point.x);
    if theta < 0.0 {
        -theta / (2.0 * PI)
    } else {
        1.0 - theta / (2.0 * PI)
    }
}

/// Planar coordinates on a cap facing `+y` (top) or `-y` (bottom).
pub(crate) fn cap_uv(point: Vec3A, top: bool) -> (f32, f32) {
    if top {
        (point.x + 0.5, -point.z + 0.5)
    } else {
        (point.x + 0.5, point.z + 0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    const ALL: [Shape; 4] = [Shape::Sphere, Shape::Cube, Shape::Cone, Shape::Cylinder];

    /// Distance from `p` to the canonical surface of `shape` (approximately).
    fn surface_error(shape: Shape, p: Vec3A) -> f32 {
        let r = (p.x * p.x + p.z * p.z).sqrt();
        match shape {
            Shape::Sphere => (p.length() - 0.5).abs(),
            Shape::Cube => (p.abs().max_element() - 0.5).abs(),
            Shape::Cylinder => {
                let cap = (p.y.abs() - 0.5).abs().max((r - 0.5).max(0.0));
                let side = (r - 0.5).abs().max((p.y.abs() - 0.5).max(0.0));
                cap.min(side)
            }
            Shape::Cone => {
                let base = (p.y + 0.5).abs().max((r - 0.5).max(0.0));
                let side = (r - 0.5 * (0.5 - p.y)).abs().max((p.y.abs() - 0.5).max(0.0));
                base.min(side)
            }
        }
    }

    fn random_ray_toward_center(rng: &mut ChaCha8Rng) -> Ray {
        let origin = Vec3A::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        )
        .normalize()
            * rng.random_range(2.0f32..6.0);
        let target = Vec3A::new(
            rng.random_range(-0.1..0.1),
            rng.random_range(-0.1..0.1),
            rng.random_range(-0.1..0.1),
        );
        Ray::new(origin, (target - origin) * rng.random_range(0.2f32..3.0))
    }

    #[test]
    fn test_hits_lie_on_surface() {
        let mut rng = ChaCha8Rng::seed_from_u64(0x5eed);
        for shape in ALL {
            for _ in 0..500 {
                let ray = random_ray_toward_center(&mut rng);
                let t = shape
                    .intersect(&ray)
                    .unwrap_or_else(|| panic!("{shape:?} missed {ray:?}"));
                assert!(t > 0.0, "{shape:?} returned t = {t}");
                let p = ray.at(t);
                assert!(
                    surface_error(shape, p) < 1e-3,
                    "{shape:?}: {p:?} is off the surface"
                );
            }
        }
    }

    #[test]
    fn test_normals_are_unit_length() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for shape in ALL {
            for _ in 0..500 {
                let ray = random_ray_toward_center(&mut rng);
                let Some(t) = shape.intersect(&ray) else {
                    continue;
                };
                let p = ray.at(t);
                if shape == Shape::Cone && p.y > 0.49 {
                    // normal is undefined at the apex
                    continue;
                }
                let n = shape.normal(p);
                assert!((n.length() - 1.0).abs() < 1e-4, "{shape:?} at {p:?}: {n:?}");
            }
        }
    }

    #[test]
    fn test_uv_in_unit_square() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for shape in ALL {
            for _ in 0..200 {
                let ray = random_ray_toward_center(&mut rng);
                let Some(t) = shape.intersect(&ray) else {
                    continue;
                };
                let (u, v) = shape.uv(ray.at(t));
                assert!((-1e-3..=1.0 + 1e-3).contains(&u), "{shape:?}: u = {u}");
                assert!((-1e-3..=1.0 + 1e-3).contains(&v), "{shape:?}: v = {v}");
            }
        }
    }

    #[test]
    fn test_far_rays_miss() {
        let ray = Ray::new(Vec3A::new(5.0, 5.0, 5.0), Vec3A::new(1.0, 0.0, 0.0));
        for shape in ALL {
            assert!(shape.intersect(&ray).map_or(true, |t| t <= 0.0), "{shape:?}");
        }
    }

    #[test]
    fn test_rays_pointing_away_miss() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 3.0), Vec3A::new(0.0, 0.0, 1.0));
        for shape in ALL {
            assert!(shape.intersect(&ray).map_or(true, |t| t <= 0.0), "{shape:?}");
        }
    }

    #[test]
    fn test_texture_color_without_texture() {
        for shape in ALL {
            assert_eq!(shape.texture_color(Vec3A::new(0.0, 0.5, 0.0), None), None);
        }
    }

    #[test]
    fn test_solve_quadratic() {
        let (t1, t2) = solve_quadratic(1.0, -3.0, 2.0).unwrap();
        assert_eq!((t1, t2), (1.0, 2.0));
        assert!(solve_quadratic(1.0, 0.0, 1.0).is_none());
    }

    #[test]
    fn test_closest_forward_filters_invalid() {
        assert_eq!(closest_forward([f32::NAN, -1.0, 3.0, 2.0, f32::INFINITY]), Some(2.0));
        assert_eq!(closest_forward([f32::NAN, -1.0, 0.0]), None);
    }

    #[test]
    fn test_angular_u() {
        assert!((angular_u(Vec3A::new(0.5, 0.0, 0.0)) - 1.0).abs() < 1e-6);
        assert!((angular_u(Vec3A::new(0.0, 0.0, -0.5)) - 0.25).abs() < 1e-6);
        assert!((angular_u(Vec3A::new(-0.5, 0.0, 0.0)) - 0.5).abs() < 1e-6);
        assert!((angular_u(Vec3A::new(0.0, 0.0, 0.5)) - 0.75).abs() < 1e-6);
    }
}
