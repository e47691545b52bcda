//! Scene description input and the immutable scene aggregate.
//!
//! A [`SceneDescription`] is what a scene builder hands over: camera data,
//! global coefficients, lights and an already flattened shape list with baked
//! CTMs. [`Scene::build`] validates it once, and the resulting [`Scene`] is
//! only ever read by the tracer.

use glam::Mat4;
use log::{info, warn};

use crate::camera::{Camera, CameraData};
use crate::error::{RenderError, Result};
use crate::hittable::{invert_ctm, Primitive};
use crate::light::Light;
use crate::material::Material;
use crate::shapes::Shape;

/// Primitive kinds a scene file can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PrimitiveKind {
    /// Unit sphere.
    Sphere,
    /// Unit cube.
    Cube,
    /// Unit cone.
    Cone,
    /// Unit cylinder.
    Cylinder,
    /// Torus (not supported by the geometry kernel).
    Torus,
    /// Triangle mesh (not supported by the geometry kernel).
    Mesh,
}

impl TryFrom<PrimitiveKind> for Shape {
    type Error = PrimitiveKind;

    fn try_from(kind: PrimitiveKind) -> std::result::Result<Self, Self::Error> {
        match kind {
            PrimitiveKind::Sphere => Ok(Shape::Sphere),
            PrimitiveKind::Cube => Ok(Shape::Cube),
            PrimitiveKind::Cone => Ok(Shape::Cone),
            PrimitiveKind::Cylinder => Ok(Shape::Cylinder),
            PrimitiveKind::Torus | PrimitiveKind::Mesh => Err(kind),
        }
    }
}

/// Scene-wide scaling of the ambient, diffuse and specular terms.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalCoefficients {
    /// Ambient scale.
    pub ka: f32,
    /// Diffuse scale.
    pub kd: f32,
    /// Specular scale, also applied to reflected and refracted light.
    pub ks: f32,
}

impl Default for GlobalCoefficients {
    fn default() -> Self {
        Self {
            ka: 1.0,
            kd: 1.0,
            ks: 1.0,
        }
    }
}

/// One entry of the flattened shape list.
#[derive(Debug, Clone)]
pub struct ShapeData {
    /// What to draw.
    pub kind: PrimitiveKind,
    /// Surface material.
    pub material: Material,
    /// Accumulated object-to-world transform.
    pub ctm: Mat4,
}

/// Everything the scene builder supplies.
#[derive(Debug, Clone)]
pub struct SceneDescription {
    /// Camera placement and field of view.
    pub camera: CameraData,
    /// Global lighting coefficients.
    pub globals: GlobalCoefficients,
    /// Light list, in scene order.
    pub lights: Vec<Light>,
    /// Flattened shape list, in scene order.
    pub shapes: Vec<ShapeData>,
}

/// Validated, read-only scene.
#[derive(Debug, Clone)]
pub struct Scene {
    width: u32,
    height: u32,
    camera: Camera,
    globals: GlobalCoefficients,
    primitives: Vec<Primitive>,
    lights: Vec<Light>,
}

impl Scene {
    /// Validate a description and build the scene for a `width` x `height` image.
    ///
    /// Fails on empty images, unsupported primitive kinds and CTMs that
    /// cannot be inverted.
    pub fn build(width: u32, height: u32, description: &SceneDescription) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions { width, height });
        }

        let primitives = description
            .shapes
            .iter()
            .enumerate()
            .map(|(index, data)| build_primitive(index, data))
            .collect::<Result<Vec<_>>>()?;

        info!(
            "Scene built: {} primitives, {} lights, {}x{}",
            primitives.len(),
            description.lights.len(),
            width,
            height
        );

        Ok(Self {
            width,
            height,
            camera: Camera::new(&description.camera, width, height),
            globals: description.globals,
            primitives,
            lights: description.lights.clone(),
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Scene camera.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Global lighting coefficients.
    pub fn globals(&self) -> GlobalCoefficients {
        self.globals
    }

    /// Primitives in scene order.
    pub fn primitives(&self) -> &[Primitive] {
        &self.primitives
    }

    /// Lights in scene order.
    pub fn lights(&self) -> &[Light] {
        &self.lights
    }
}

fn build_primitive(index: usize, data: &ShapeData) -> Result<Primitive> {
    let shape = Shape::try_from(data.kind).map_err(|kind| {
        warn!("Rejecting primitive {}: {:?} is not supported", index, kind);
        RenderError::UnsupportedPrimitive { index, kind }
    })?;

    let determinant = data.ctm.as_dmat4().determinant();
    if !data.ctm.is_finite() || determinant == 0.0 || !invert_ctm(data.ctm).is_finite() {
        warn!("Rejecting primitive {}: singular transform", index);
        return Err(RenderError::DegenerateTransform {
            index,
            determinant: determinant as f32,
        });
    }

    Ok(Primitive::new(shape, data.material.clone(), data.ctm))
}
