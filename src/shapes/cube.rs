//! Axis-aligned cube spanning `[-0.5, 0.5]` on every axis.

use glam::Vec3A;

use super::FLAT_THRESHOLD;
use crate::interval::Interval;
use crate::ray::Ray;

/// Slab test over the three axes.
///
/// Returns the entry parameter `tmin` whenever the slabs overlap, even when
/// it is negative (ray origin inside the cube). Axis-parallel rays divide by
/// zero; the resulting infinities keep the slab logic correct and NaNs never
/// tighten the interval.
pub fn intersect(ray: &Ray) -> Option<f32> {
    let slab = Interval::UNIT_SLAB;
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;

    for axis in 0..3 {
        let mut t1 = (slab.min - ray.origin[axis]) / ray.direction[axis];
        let mut t2 = (slab.max - ray.origin[axis]) / ray.direction[axis];
        if t1 > t2 {
            std::mem::swap(&mut t1, &mut t2);
        }
        if t1 > t_min {
            t_min = t1;
        }
        if t2 < t_max {
            t_max = t2;
        }
    }

    if t_min > t_max {
        return None;
    }
    Some(t_min)
}

/// Face normal, chosen in x, y, z order so edges and corners get one face.
///
/// Points strictly inside the cube have no face and return zero.
pub fn normal(point: Vec3A) -> Vec3A {
    face(point).unwrap_or(Vec3A::ZERO)
}

/// Planar coordinates on the face the point lies on.
pub fn uv(point: Vec3A) -> (f32, f32) {
    let (x, y, z) = (point.x, point.y, point.z);
    match face(point) {
        Some(n) if n.x > 0.0 => (-z + 0.5, y + 0.5),
        Some(n) if n.x < 0.0 => (z + 0.5, y + 0.5),
        Some(n) if n.y > 0.0 => (x + 0.5, -z + 0.5),
        Some(n) if n.y < 0.0 => (x + 0.5, z + 0.5),
        Some(n) if n.z < 0.0 => (-x + 0.5, y + 0.5),
        _ => (x + 0.5, y + 0.5),
    }
}

fn face(point: Vec3A) -> Option<Vec3A> {
    let (x, y, z) = (point.x, point.y, point.z);
    if x >= FLAT_THRESHOLD {
        Some(Vec3A::X)
    } else if x <= -FLAT_THRESHOLD {
        Some(Vec3A::NEG_X)
    } else if y >= FLAT_THRESHOLD {
        Some(Vec3A::Y)
    } else if y <= -FLAT_THRESHOLD {
        Some(Vec3A::NEG_Y)
    } else if z >= FLAT_THRESHOLD {
        Some(Vec3A::Z)
    } else if z <= -FLAT_THRESHOLD {
        Some(Vec3A::NEG_Z)
    } else {
        None
    }
}
