//! Sphere of radius 0.5 centered at the origin.

use std::f32::consts::PI;

use glam::Vec3A;

use super::{angular_u, closest_forward, solve_quadratic, RADIUS};
use crate::ray::Ray;

/// Smaller positive root of `|O + tD|^2 = 0.25`.
pub fn intersect(ray: &Ray) -> Option<f32> {
    let a = ray.direction.length_squared();
    let b = 2.0 * ray.origin.dot(ray.direction);
    let c = ray.origin.length_squared() - RADIUS * RADIUS;

    let (t1, t2) = solve_quadratic(a, b, c)?;
    closest_forward([t1, t2])
}

/// Radial normal.
pub fn normal(point: Vec3A) -> Vec3A {
    point.normalize()
}

/// Longitude/latitude unwrap. Both poles map to `u = 0.5`.
pub fn uv(point: Vec3A) -> (f32, f32) {
    let v = (point.y / RADIUS).clamp(-1.0, 1.0).asin() / PI + 0.5;
    let u = if point.x.abs() < 1e-6 && point.z.abs() < 1e-6 {
        0.5
    } else {
        angular_u(point)
    };
    (u, v)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_ray_sphere_head_on() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        let t = intersect(&ray).unwrap();
        assert!((t - 4.5).abs() < EPS);
    }

    #[test]
    fn test_ray_sphere_unnormalized_direction() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, -3.0));
        let t = intersect(&ray).unwrap();
        assert!((t - 1.5).abs() < EPS);
    }

    #[test]
    fn test_ray_from_inside_hits_far_wall() {
        let ray = Ray::new(Vec3A::ZERO, Vec3A::new(1.0, 0.0, 0.0));
        let t = intersect(&ray).unwrap();
        assert!((t - 0.5).abs() < EPS);
    }

    #[test]
    fn test_ray_sphere_miss() {
        let ray = Ray::new(Vec3A::new(0.0, 1.0, 5.0), Vec3A::new(0.0, 0.0, -1.0));
        assert_eq!(intersect(&ray), None);
    }

    #[test]
    fn test_behind_origin_is_miss() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::new(0.0, 0.0, 1.0));
        assert_eq!(intersect(&ray), None);
    }

    #[test]
    fn test_zero_direction_is_miss() {
        let ray = Ray::new(Vec3A::new(0.0, 0.0, 5.0), Vec3A::ZERO);
        assert_eq!(intersect(&ray), None);
    }

    #[test]
    fn test_normal() {
        let n = normal(Vec3A::new(0.0, 0.5, 0.0));
        assert!((n - Vec3A::Y).length() < EPS);
    }

    #[test]
    fn test_uv_poles_and_equator() {
        let (u, v) = uv(Vec3A::new(0.0, 0.5, 0.0));
        assert_eq!(u, 0.5);
        assert!((v - 1.0).abs() < EPS);

        let (_, v) = uv(Vec3A::new(0.0, -0.5, 0.0));
        assert!(v.abs() < EPS);

        let (u, v) = uv(Vec3A::new(-0.5, 0.0, 0.0));
        assert!((u - 0.5).abs() < EPS);
        assert!((v - 0.5).abs() < EPS);
    }
}
