//! Light sources.
//!
//! Three kinds are supported: directional lights (infinitely far away), point
//! lights with distance attenuation, and spot lights that add an angular
//! falloff cone with a soft penumbra.

use glam::Vec3A;

use crate::material::Color;

/// Light source of the scene.
#[derive(Debug, Clone, PartialEq)]
pub enum Light {
    /// Parallel light arriving along `direction`.
    Directional {
        /// Light intensity.
        color: Color,
        /// Direction the light travels in.
        direction: Vec3A,
    },

    /// Omnidirectional light at `position`.
    Point {
        /// Light intensity.
        color: Color,
        /// World-space position.
        position: Vec3A,
        /// Constant, linear and quadratic attenuation coefficients.
        attenuation: [f32; 3],
    },

    /// Cone-limited light at `position` aimed along `direction`.
    Spot {
        /// Light intensity.
        color: Color,
        /// World-space position.
        position: Vec3A,
        /// Axis of the cone.
        direction: Vec3A,
        /// Constant, linear and quadratic attenuation coefficients.
        attenuation: [f32; 3],
        /// Half-angle of the outer cone in radians.
        angle: f32,
        /// Width of the falloff band inside the outer cone, in radians.
        penumbra: f32,
    },
}

impl Light {
    /// Light intensity.
    pub fn color(&self) -> Color {
        match self {
            Light::Directional { color, .. }
            | Light::Point { color, .. }
            | Light::Spot { color, .. } => *color,
        }
    }

    /// Unit vector from `point` toward the light.
    pub fn direction_to_light(&self, point: Vec3A) -> Vec3A {
        match self {
            Light::Directional { direction, .. } => -direction.normalize(),
            Light::Point { position, .. } | Light::Spot { position, .. } => {
                (*position - point).normalize()
            }
        }
    }

    /// Distance falloff `min(1, 1 / (c0 + c1 d + c2 d^2))`.
    ///
    /// Directional lights do not attenuate.
    pub fn distance_attenuation(&self, point: Vec3A) -> f32 {
        match self {
            Light::Directional { .. } => 1.0,
            Light::Point {
                position,
                attenuation,
                ..
            }
            | Light::Spot {
                position,
                attenuation,
                ..
            } => {
                let d = position.distance(point);
                let [c0, c1, c2] = *attenuation;
                (1.0 / (c0 + c1 * d + c2 * d * d)).min(1.0)
            }
        }
    }

    /// Angular falloff of a spot light at `point`; 1 for other kinds.
    ///
    /// Full intensity inside `angle - penumbra`, zero outside `angle`, and a
    /// cubic Hermite ramp `1 - (-2u^3 + 3u^2)` across the penumbra band.
    pub fn spot_falloff(&self, point: Vec3A) -> f32 {
        let Light::Spot {
            position,
            direction,
            angle,
            penumbra,
            ..
        } = self
        else {
            return 1.0;
        };
        let to_point = (point - *position).normalize();
        let cos_x = to_point.dot(direction.normalize()).clamp(-1.0, 1.0);
        let x = cos_x.acos();
        let outer = *angle;
        let inner = *angle - *penumbra;
        if x <= inner {
            1.0
        } else if x <= outer {
            let u = (x - inner) / (outer - inner);
            1.0 - (-2.0 * u.powi(3) + 3.0 * u.powi(2))
        } else {
            0.0
        }
    }
}
