//! Capped cylinder of radius 0.5 spanning `y` in `[-0.5, 0.5]`.

use glam::Vec3A;

use super::{
    angular_u, cap_hit, cap_uv, closest_forward, solve_quadratic, FLAT_THRESHOLD, RADIUS,
};
use crate::interval::Interval;
use crate::ray::Ray;

/// Nearest of the lateral surface and both caps.
///
/// Lateral roots are kept only when their height lies inside the slab; cap
/// crossings only when they fall within the rim.
pub fn intersect(ray: &Ray) -> Option<f32> {
    let (o, d) = (ray.origin, ray.direction);
    let a = d.x * d.x + d.z * d.z;
    let b = 2.0 * (o.x * d.x + o.z * d.z);
    let c = o.x * o.x + o.z * o.z - RADIUS * RADIUS;

    let lateral = solve_quadratic(a, b, c)
        .into_iter()
        .flat_map(|(t1, t2)| [t1, t2])
        .filter(|&t| Interval::UNIT_SLAB.contains(ray.at(t).y));
    let caps = [Interval::UNIT_SLAB.min, Interval::UNIT_SLAB.max]
        .into_iter()
        .filter_map(|height| cap_hit(ray, height));

    closest_forward(lateral.chain(caps))
}

/// Cap normal within the flat band, radial normal elsewhere.
pub fn normal(point: Vec3A) -> Vec3A {
    if point.y >= FLAT_THRESHOLD {
        Vec3A::Y
    } else if point.y <= -FLAT_THRESHOLD {
        Vec3A::NEG_Y
    } else {
        Vec3A::new(point.x, 0.0, point.z).normalize()
    }
}

/// Angular unwrap on the side, planar coordinates on the caps.
pub fn uv(point: Vec3A) -> (f32, f32) {
    if point.y >= FLAT_THRESHOLD {
        cap_uv(point, true)
    } else if point.y <= -FLAT_THRESHOLD {
        cap_uv(point, false)
    } else {
        (angular_u(point), point.y + 0.5)
    }
}
