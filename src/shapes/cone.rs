//! Cone with a base of radius 0.5 at `y = -0.5` and its apex at `y = 0.5`.
//!
//! The radius shrinks linearly with height, `r(y) = 0.5 * (0.5 - y)`, which
//! gives the implicit lateral surface `x^2 + z^2 - (0.5 - y)^2 / 4 = 0`.

use glam::Vec3A;

use super::{angular_u, cap_hit, cap_uv, closest_forward, solve_quadratic, FLAT_THRESHOLD};
use crate::interval::Interval;
use crate::ray::Ray;

/// Nearest of the lateral surface and the base cap.
///
/// The implicit equation describes a double cone; roots on the upper nappe
/// fall outside the slab and are discarded with the other out-of-range roots.
pub fn intersect(ray: &Ray) -> Option<f32> {
    let (o, d) = (ray.origin, ray.direction);
    let a = d.x * d.x + d.z * d.z - 0.25 * d.y * d.y;
    let b = 2.0 * o.x * d.x + 2.0 * o.z * d.z - 0.5 * o.y * d.y + 0.25 * d.y;
    let c = o.x * o.x + o.z * o.z - 0.25 * o.y * o.y + 0.25 * o.y - 0.0625;

    let lateral = solve_quadratic(a, b, c)
        .into_iter()
        .flat_map(|(t1, t2)| [t1, t2])
        .filter(|&t| Interval::UNIT_SLAB.contains(ray.at(t).y));
    let base = cap_hit(ray, Interval::UNIT_SLAB.min);

    closest_forward(lateral.chain(base))
}

/// Base normal within the flat band, slanted lateral normal elsewhere.
///
/// The lateral gradient is `(x/r, 0.5, z/r)` before normalization. The apex
/// has no defined normal and yields NaN.
pub fn normal(point: Vec3A) -> Vec3A {
    if point.y <= -FLAT_THRESHOLD {
        return Vec3A::NEG_Y;
    }
    let radial = Vec3A::new(point.x, 0.0, point.z).normalize();
    Vec3A::new(radial.x, 0.5, radial.z).normalize()
}

/// Angular unwrap on the side, planar coordinates on the base.
pub fn uv(point: Vec3A) -> (f32, f32) {
    if point.y <= -FLAT_THRESHOLD {
        cap_uv(point, false)
    } else {
        (angular_u(point), point.y + 0.5)
    }
}
