//! Ray-primitive intersection over the flat primitive list.
//!
//! Each [`Primitive`] pairs a canonical [`Shape`] with a material and its
//! object-to-world CTM. The matrices derived from a CTM are computed once per
//! render into an [`ObjectTransform`] side table and borrowed by every query,
//! so the per-ray work is only matrix-vector products.

use glam::{Mat3, Mat4, Vec3A};
use image::Rgba;

use crate::interval::Interval;
use crate::material::Material;
use crate::ray::Ray;
use crate::shapes::Shape;

/// A shape placed in the world.
#[derive(Debug, Clone)]
pub struct Primitive {
    shape: Shape,
    material: Material,
    ctm: Mat4,
}

impl Primitive {
    /// Create a primitive from its shape, material and object-to-world transform.
    pub fn new(shape: Shape, material: Material, ctm: Mat4) -> Self {
        Self {
            shape,
            material,
            ctm,
        }
    }

    /// Canonical shape.
    pub fn shape(&self) -> Shape {
        self.shape
    }

    /// Surface material.
    pub fn material(&self) -> &Material {
        &self.material
    }

    /// Object-to-world composite transform.
    pub fn ctm(&self) -> Mat4 {
        self.ctm
    }

    /// Texture color at an object-space surface point.
    pub fn texture_color(&self, object_point: Vec3A) -> Option<Rgba<u8>> {
        self.shape
            .texture_color(object_point, self.material.texture.as_ref())
    }
}

/// Matrices derived from a primitive's CTM.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObjectTransform {
    /// Object to world.
    pub ctm: Mat4,
    /// World to object.
    pub inverse: Mat4,
    /// Inverse transpose of the CTM's linear part, for normals.
    pub normal_matrix: Mat3,
}

impl ObjectTransform {
    /// Derive the inverse and normal matrices of `ctm`.
    pub fn new(ctm: Mat4) -> Self {
        let inverse = invert_ctm(ctm);
        Self {
            ctm,
            inverse,
            normal_matrix: Mat3::from_mat4(inverse.transpose()),
        }
    }

    /// Side table for a primitive list, indexed like the list.
    pub fn table(primitives: &[Primitive]) -> Vec<ObjectTransform> {
        primitives
            .iter()
            .map(|primitive| ObjectTransform::new(primitive.ctm()))
            .collect()
    }

    /// Bring a world-space ray into object space.
    pub fn to_object(&self, ray: &Ray) -> Ray {
        ray.transform(&self.inverse)
    }

    /// Map an object-space point to world space.
    pub fn point_to_world(&self, point: Vec3A) -> Vec3A {
        self.ctm.transform_point3a(point)
    }

    /// Map an object-space normal to a unit world-space normal.
    ///
    /// Uses the inverse transpose so non-uniform scales keep normals
    /// perpendicular to the surface.
    pub fn normal_to_world(&self, normal: Vec3A) -> Vec3A {
        (self.normal_matrix * normal).normalize()
    }
}

/// Invert a CTM in double precision.
///
/// The `f32` determinant over- or underflows for strong but valid scales
/// (1e-5 uniform, 1e13 per axis), which would zero or blow up the inverse.
pub fn invert_ctm(ctm: Mat4) -> Mat4 {
    ctm.as_dmat4().inverse().as_mat4()
}

/// Ray-object intersection information.
#[derive(Debug, Clone, Copy)]
pub struct HitRecord {
    /// Index of the primitive that was hit
    pub index: usize,
    /// Ray parameter of the intersection
    pub t: f32,
    /// Intersection point in object space
    pub object_point: Vec3A,
    /// Intersection point in world space
    pub point: Vec3A,
    /// Unit world-space surface normal
    pub normal: Vec3A,
}

/// Read-only view of the primitives and their precomputed transforms.
///
/// Uses linear search: every query visits every primitive.
#[derive(Debug, Clone, Copy)]
pub struct HittableList<'a> {
    primitives: &'a [Primitive],
    transforms: &'a [ObjectTransform],
}

impl<'a> HittableList<'a> {
    /// Pair a primitive list with its transform table.
    ///
    /// Both slices must have the same length and order.
    pub fn new(primitives: &'a [Primitive], transforms: &'a [ObjectTransform]) -> Self {
        debug_assert_eq!(primitives.len(), transforms.len());
        Self {
            primitives,
            transforms,
        }
    }

    /// Primitive by index.
    pub fn primitive(&self, index: usize) -> &'a Primitive {
        &self.primitives[index]
    }

    /// Nearest intersection with `t > 0` across all primitives.
    ///
    /// Ties keep the earlier primitive.
    pub fn hit(&self, ray: &Ray) -> Option<HitRecord> {
        let mut closest: Option<(usize, f32, Ray)> = None;

        for (index, (primitive, transform)) in
            self.primitives.iter().zip(self.transforms).enumerate()
        {
            let object_ray = transform.to_object(ray);
            let Some(t) = primitive.shape().intersect(&object_ray) else {
                continue;
            };
            let closest_so_far = closest.map_or(f32::INFINITY, |(_, t, _)| t);
            if Interval::new(0.0, closest_so_far).surrounds(t) {
                closest = Some((index, t, object_ray));
            }
        }

        let (index, t, object_ray) = closest?;
        let transform = &self.transforms[index];
        let object_point = object_ray.at(t);
        let object_normal = self.primitives[index].shape().normal(object_point);
        Some(HitRecord {
            index,
            t,
            object_point,
            point: transform.point_to_world(object_point),
            normal: transform.normal_to_world(object_normal),
        })
    }

    /// Whether any primitive lies in front of the ray origin.
    ///
    /// Hits beyond a light are not excluded, so occlusion is binary and
    /// independent of distance.
    pub fn occluded(&self, ray: &Ray) -> bool {
        self.primitives
            .iter()
            .zip(self.transforms)
            .any(|(primitive, transform)| {
                primitive
                    .shape()
                    .intersect(&transform.to_object(ray))
                    .is_some_and(|t| Interval::FORWARD.surrounds(t))
            })
    }
}
