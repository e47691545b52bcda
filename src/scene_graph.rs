//! Scene graph flattening.
//!
//! Scene files describe a tree of nodes, each with a list of transformations,
//! primitives and children. The tracer wants a flat list of shapes with their
//! composite transform already baked in; [`flatten`] produces it.

use glam::{Mat4, Vec3};

use crate::material::Material;
use crate::scene::{PrimitiveKind, ShapeData};

/// One transformation of a scene graph node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Transformation {
    /// Translation by a vector.
    Translate(Vec3),
    /// Non-uniform scale.
    Scale(Vec3),
    /// Rotation by `angle` radians about `axis`.
    Rotate {
        /// Rotation axis (normalized on use).
        axis: Vec3,
        /// Angle in radians.
        angle: f32,
    },
    /// Arbitrary affine matrix.
    Matrix(Mat4),
}

impl Transformation {
    /// Matrix form of the transformation.
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Transformation::Translate(offset) => Mat4::from_translation(offset),
            Transformation::Scale(factors) => Mat4::from_scale(factors),
            Transformation::Rotate { axis, angle } => Mat4::from_axis_angle(axis.normalize(), angle),
            Transformation::Matrix(matrix) => matrix,
        }
    }
}

/// A primitive attached to a scene graph node.
#[derive(Debug, Clone)]
pub struct ScenePrimitive {
    /// Shape kind.
    pub kind: PrimitiveKind,
    /// Surface material.
    pub material: Material,
}

/// Node of the scene graph.
#[derive(Debug, Clone, Default)]
pub struct SceneNode {
    /// Transformations applied in order to this node and its subtree.
    pub transformations: Vec<Transformation>,
    /// Primitives placed by this node.
    pub primitives: Vec<ScenePrimitive>,
    /// Child nodes, which inherit the node's transform.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// Empty node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a transformation.
    pub fn with_transform(mut self, transformation: Transformation) -> Self {
        self.transformations.push(transformation);
        self
    }

    /// Attach a primitive.
    pub fn with_primitive(mut self, kind: PrimitiveKind, material: Material) -> Self {
        self.primitives.push(ScenePrimitive { kind, material });
        self
    }

    /// Attach a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }
}

/// Flatten a scene graph into shapes with composite transforms.
///
/// Pre-order traversal: a node's transformations are right-multiplied onto
/// the inherited CTM in the order they are listed, so the last one listed is
/// applied to the geometry first.
pub fn flatten(root: &SceneNode) -> Vec<ShapeData> {
    let mut shapes = Vec::new();
    flatten_into(root, Mat4::IDENTITY, &mut shapes);
    shapes
}

fn flatten_into(node: &SceneNode, parent_ctm: Mat4, shapes: &mut Vec<ShapeData>) {
    let ctm = node
        .transformations
        .iter()
        .fold(parent_ctm, |ctm, transformation| ctm * transformation.matrix());

    shapes.extend(node.primitives.iter().map(|primitive| ShapeData {
        kind: primitive.kind,
        material: primitive.material.clone(),
        ctm,
    }));

    for child in &node.children {
        flatten_into(child, ctm, shapes);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_children_inherit_parent_transform() {
        let root = SceneNode::new()
            .with_transform(Transformation::Translate(Vec3::new(0.0, 2.0, 0.0)))
            .with_primitive(PrimitiveKind::Cube, Material::default())
            .with_child(
                SceneNode::new()
                    .with_transform(Transformation::Scale(Vec3::splat(2.0)))
                    .with_primitive(PrimitiveKind::Sphere, Material::default()),
            );
        let shapes = flatten(&root);
        assert_eq!(shapes.len(), 2);
        assert_eq!(shapes[0].kind, PrimitiveKind::Cube);
        assert_eq!(shapes[1].kind, PrimitiveKind::Sphere);

        let top = shapes[1].ctm.transform_point3(Vec3::new(0.0, 0.5, 0.0));
        assert!((top - Vec3::new(0.0, 3.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_transform_order_within_node() {
        // Listed translate-then-rotate: the point is rotated first, then moved
        let root = SceneNode::new()
            .with_transform(Transformation::Translate(Vec3::new(5.0, 0.0, 0.0)))
            .with_transform(Transformation::Rotate {
                axis: Vec3::Z,
                angle: FRAC_PI_2,
            })
            .with_primitive(PrimitiveKind::Cylinder, Material::default());
        let shapes = flatten(&root);
        let p = shapes[0].ctm.transform_point3(Vec3::new(1.0, 0.0, 0.0));
        assert!((p - Vec3::new(5.0, 1.0, 0.0)).length() < EPS);
    }

    #[test]
    fn test_pre_order() {
        let leaf = |kind| SceneNode::new().with_primitive(kind, Material::default());
        let root = SceneNode::new()
            .with_child(leaf(PrimitiveKind::Cone).with_child(leaf(PrimitiveKind::Cube)))
            .with_child(leaf(PrimitiveKind::Sphere));
        let kinds: Vec<_> = flatten(&root).iter().map(|s| s.kind).collect();
        assert_eq!(kinds, [PrimitiveKind::Cone, PrimitiveKind::Cube, PrimitiveKind::Sphere]);
    }

    #[test]
    fn test_raw_matrix() {
        let matrix = Mat4::from_cols_array(&[
            1.0, 0.0, 0.0, 0.0, //
            0.0, 1.0, 0.0, 0.0, //
            0.0, 0.0, 1.0, 0.0, //
            1.0, 2.0, 3.0, 1.0,
        ]);
        let root = SceneNode::new()
            .with_transform(Transformation::Matrix(matrix))
            .with_primitive(PrimitiveKind::Cube, Material::default());
        assert_eq!(flatten(&root)[0].ctm, matrix);
    }
}
