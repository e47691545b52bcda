//! ChromaRay Whitted ray tracer
//!
//! Renders flattened scenes of transformed spheres, cubes, cones and
//! cylinders with Phong shading, hard shadows, mirror reflection and
//! refraction. The core is a pure function of the scene: it reads no files
//! while tracing and produces an 8-bit RGBA buffer.

#![warn(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod camera;
pub mod config;
pub mod error;
pub mod hittable;
pub mod interval;
pub mod light;
pub mod material;
pub mod ray;
pub mod scene;
pub mod scene_graph;
pub mod shading;
pub mod shapes;
pub mod texture;
pub mod tracer;

pub use camera::{Camera, CameraData};
pub use config::TracerConfig;
pub use error::{RenderError, Result};
pub use light::Light;
pub use material::{Color, Material};
pub use scene::{GlobalCoefficients, PrimitiveKind, Scene, SceneDescription, ShapeData};
pub use shapes::Shape;
pub use texture::{Texture, TextureMap};
pub use tracer::{RayTracer, TraceCounts};
