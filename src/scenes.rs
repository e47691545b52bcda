//! Built-in demo scenes.
//!
//! Every preset is assembled as a scene graph and flattened, the same path a
//! scene file loader would take.

use std::f32::consts::{FRAC_PI_2, FRAC_PI_4, FRAC_PI_6};

use glam::{Vec3, Vec3A, Vec4};

use chromaray::scene_graph::{flatten, SceneNode, Transformation};
use chromaray::{
    CameraData, Color, GlobalCoefficients, Light, Material, PrimitiveKind, SceneDescription,
    TextureMap,
};

use crate::cli::ScenePreset;

/// Build the description of `preset`. `texture` is applied to the floor.
pub fn build_scene(preset: ScenePreset, texture: Option<TextureMap>) -> SceneDescription {
    let (root, lights) = match preset {
        ScenePreset::Spheres => spheres(),
        ScenePreset::Shapes => shapes(),
        ScenePreset::Mirrors => mirrors(),
        ScenePreset::Glass => glass(),
    };

    let root = root.with_child(floor(texture));

    SceneDescription {
        camera: CameraData {
            position: Vec3A::new(0.0, 1.5, 6.0),
            look: Vec3A::new(0.0, -1.5, -6.0),
            up: Vec3A::Y,
            height_angle: FRAC_PI_4,
        },
        globals: GlobalCoefficients {
            ka: 0.5,
            kd: 0.5,
            ks: 0.5,
        },
        lights,
        shapes: flatten(&root),
    }
}

fn rgb(r: f32, g: f32, b: f32) -> Color {
    Vec4::new(r, g, b, 1.0)
}

fn matte(color: Color) -> Material {
    Material {
        ambient: color * 0.2,
        diffuse: color,
        specular: rgb(0.4, 0.4, 0.4),
        shininess: 20.0,
        ..Material::default()
    }
}

fn mirror(color: Color) -> Material {
    Material {
        reflective: rgb(0.7, 0.7, 0.7),
        shininess: 60.0,
        ..matte(color)
    }
}

fn sun() -> Light {
    Light::Directional {
        color: rgb(1.0, 1.0, 1.0),
        direction: Vec3A::new(-0.4, -1.0, -0.6).normalize(),
    }
}

fn floor(texture: Option<TextureMap>) -> SceneNode {
    let mut material = matte(rgb(0.6, 0.6, 0.6));
    if texture.is_some() {
        material.blend = 0.8;
        material.texture = texture;
    }

    SceneNode::new()
        .with_transform(Transformation::Translate(Vec3::new(0.0, -0.55, 0.0)))
        .with_transform(Transformation::Scale(Vec3::new(8.0, 0.1, 8.0)))
        .with_primitive(PrimitiveKind::Cube, material)
}

fn placed(offset: Vec3, kind: PrimitiveKind, material: Material) -> SceneNode {
    SceneNode::new()
        .with_transform(Transformation::Translate(offset))
        .with_primitive(kind, material)
}

fn spheres() -> (SceneNode, Vec<Light>) {
    let root = SceneNode::new()
        .with_child(placed(Vec3::ZERO, PrimitiveKind::Sphere, matte(rgb(0.9, 0.2, 0.2))))
        .with_child(
            SceneNode::new()
                .with_transform(Transformation::Translate(Vec3::new(-1.4, -0.2, 0.5)))
                .with_transform(Transformation::Scale(Vec3::splat(0.6)))
                .with_primitive(PrimitiveKind::Sphere, matte(rgb(0.2, 0.4, 0.9))),
        )
        .with_child(
            SceneNode::new()
                .with_transform(Transformation::Translate(Vec3::new(1.3, 0.0, -0.4)))
                .with_transform(Transformation::Scale(Vec3::new(0.6, 1.0, 0.6)))
                .with_primitive(PrimitiveKind::Sphere, matte(rgb(0.2, 0.8, 0.3))),
        );

    let lights = vec![Light::Directional {
        color: rgb(1.0, 1.0, 1.0),
        direction: Vec3A::NEG_Y,
    }];
    (root, lights)
}

fn shapes() -> (SceneNode, Vec<Light>) {
    let root = SceneNode::new()
        .with_child(placed(
            Vec3::new(-1.8, 0.0, 0.0),
            PrimitiveKind::Sphere,
            matte(rgb(0.9, 0.3, 0.2)),
        ))
        .with_child(
            SceneNode::new()
                .with_transform(Transformation::Translate(Vec3::new(-0.6, 0.0, 0.0)))
                .with_transform(Transformation::Rotate {
                    axis: Vec3::Y,
                    angle: FRAC_PI_6,
                })
                .with_primitive(PrimitiveKind::Cube, matte(rgb(0.9, 0.8, 0.2))),
        )
        .with_child(placed(
            Vec3::new(0.6, 0.0, 0.0),
            PrimitiveKind::Cone,
            matte(rgb(0.3, 0.8, 0.4)),
        ))
        .with_child(placed(
            Vec3::new(1.8, 0.0, 0.0),
            PrimitiveKind::Cylinder,
            matte(rgb(0.3, 0.4, 0.9)),
        ));

    let lights = vec![
        Light::Point {
            color: rgb(0.8, 0.8, 0.8),
            position: Vec3A::new(-3.0, 3.0, 3.0),
            attenuation: [1.0, 0.05, 0.01],
        },
        Light::Spot {
            color: rgb(1.0, 0.9, 0.7),
            position: Vec3A::new(2.0, 4.0, 2.0),
            direction: Vec3A::new(-0.4, -1.0, -0.4).normalize(),
            attenuation: [1.0, 0.0, 0.0],
            angle: FRAC_PI_6,
            penumbra: 0.15,
        },
    ];
    (root, lights)
}

fn mirrors() -> (SceneNode, Vec<Light>) {
    let root = SceneNode::new()
        .with_child(placed(
            Vec3::new(-0.6, 0.0, 0.0),
            PrimitiveKind::Sphere,
            mirror(rgb(0.2, 0.2, 0.25)),
        ))
        .with_child(placed(
            Vec3::new(0.6, 0.0, 0.0),
            PrimitiveKind::Sphere,
            mirror(rgb(0.25, 0.2, 0.2)),
        ))
        .with_child(placed(
            Vec3::new(0.0, 0.9, 0.0),
            PrimitiveKind::Sphere,
            mirror(rgb(0.2, 0.25, 0.2)),
        ))
        .with_child(
            SceneNode::new()
                .with_transform(Transformation::Translate(Vec3::new(0.0, 0.0, -2.0)))
                .with_transform(Transformation::Rotate {
                    axis: Vec3::X,
                    angle: FRAC_PI_2,
                })
                .with_transform(Transformation::Scale(Vec3::new(0.5, 3.0, 0.5)))
                .with_primitive(PrimitiveKind::Cylinder, matte(rgb(0.9, 0.5, 0.1))),
        );

    (root, vec![sun()])
}

fn glass() -> (SceneNode, Vec<Light>) {
    let glass = Material {
        ambient: rgb(0.02, 0.02, 0.02),
        specular: rgb(0.8, 0.8, 0.8),
        reflective: rgb(0.1, 0.1, 0.1),
        transparent: rgb(0.9, 0.9, 0.9),
        shininess: 80.0,
        ior: 1.5,
        ..Material::default()
    };

    let blocks = [
        (-1.0, rgb(0.9, 0.2, 0.2)),
        (0.0, rgb(0.2, 0.9, 0.2)),
        (1.0, rgb(0.2, 0.2, 0.9)),
    ];
    let mut backdrop = SceneNode::new()
        .with_transform(Transformation::Translate(Vec3::new(0.0, 0.0, -1.5)));
    for (x, color) in blocks {
        backdrop =
            backdrop.with_child(placed(Vec3::new(x, 0.0, 0.0), PrimitiveKind::Cube, matte(color)));
    }

    let root = SceneNode::new()
        .with_child(backdrop)
        .with_child(
            SceneNode::new()
                .with_transform(Transformation::Translate(Vec3::new(0.0, 0.1, 1.0)))
                .with_transform(Transformation::Scale(Vec3::splat(1.3)))
                .with_primitive(PrimitiveKind::Sphere, glass),
        );

    let lights = vec![
        sun(),
        Light::Point {
            color: rgb(0.5, 0.5, 0.5),
            position: Vec3A::new(0.0, 3.0, 4.0),
            attenuation: [1.0, 0.0, 0.02],
        },
    ];
    (root, lights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chromaray::Scene;

    #[test]
    fn every_preset_builds() {
        for preset in [
            ScenePreset::Spheres,
            ScenePreset::Shapes,
            ScenePreset::Mirrors,
            ScenePreset::Glass,
        ] {
            let description = build_scene(preset, None);
            assert!(!description.lights.is_empty());
            let scene = Scene::build(32, 24, &description).unwrap();
            assert_eq!(scene.primitives().len(), description.shapes.len());
        }
    }

    #[test]
    fn floor_is_last_and_untextured_without_texture() {
        let description = build_scene(ScenePreset::Spheres, None);
        let floor = description.shapes.last().unwrap();
        assert_eq!(floor.kind, PrimitiveKind::Cube);
        assert!(floor.material.texture.is_none());
        assert_eq!(floor.material.blend, 0.0);
    }
}
