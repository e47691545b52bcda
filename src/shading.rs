//! Phong local illumination.
//!
//! The ambient term is added once per hit with [`ambient`]; [`shade`] adds
//! the diffuse and specular contribution of one unobstructed light.

use glam::{Vec3A, Vec4};
use image::Rgba;

use crate::light::Light;
use crate::material::{Color, Material};
use crate::scene::GlobalCoefficients;

/// Shading geometry at a world-space hit.
#[derive(Debug, Clone, Copy)]
pub struct SurfacePoint {
    /// World-space position.
    pub position: Vec3A,
    /// Unit world-space normal.
    pub normal: Vec3A,
    /// Unit vector from the surface back toward the viewer.
    pub to_camera: Vec3A,
}

/// Ambient contribution of a material.
pub fn ambient(material: &Material, globals: GlobalCoefficients) -> Color {
    material.ambient * globals.ka
}

/// Diffuse and specular contribution of one light.
///
/// Point lights scale both terms by the distance attenuation. Spot lights
/// scale the diffuse term by the angular falloff only, while the specular
/// term gets the angular falloff times the distance attenuation.
pub fn shade(
    surface: &SurfacePoint,
    material: &Material,
    light: &Light,
    globals: GlobalCoefficients,
    texture_color: Rgba<u8>,
) -> Color {
    let to_light = light.direction_to_light(surface.position);
    let diffuse_factor = surface.normal.dot(to_light);
    let reflected = (2.0 * diffuse_factor * surface.normal - to_light).normalize();
    let specular_factor = reflected.dot(surface.to_camera);

    let (diffuse_attenuation, specular_attenuation) = match light {
        Light::Directional { .. } => (1.0, 1.0),
        Light::Point { .. } => {
            let fatt = light.distance_attenuation(surface.position);
            (fatt, fatt)
        }
        Light::Spot { .. } => {
            let fatt = light.distance_attenuation(surface.position);
            let falloff = light.spot_falloff(surface.position);
            (falloff, falloff * fatt)
        }
    };

    let mut illumination = Color::ZERO;
    if diffuse_factor > 0.0 {
        illumination += diffuse_factor
            * diffuse_color(material, texture_color)
            * globals.kd
            * light.color()
            * diffuse_attenuation;
    }
    if specular_factor > 0.0 {
        illumination += specular_factor.powf(material.shininess)
            * material.specular
            * globals.ks
            * light.color()
            * specular_attenuation;
    }
    illumination
}

/// Diffuse coefficient blended with the texture color.
///
/// The texture is brought to `[0, 2]` so a blend of 1 with a mid-gray texel
/// matches a diffuse coefficient of 1.
fn diffuse_color(material: &Material, texture_color: Rgba<u8>) -> Color {
    let [r, g, b, a] = texture_color.0;
    let texture = Vec4::new(r as f32, g as f32, b as f32, a as f32) / 255.0 * 2.0;
    material.blend * texture + (1.0 - material.blend) * material.diffuse
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::texture::NO_TEXTURE;

    const EPS: f32 = 1e-5;

    fn matte() -> Material {
        Material {
            ambient: Vec4::splat(0.1),
            diffuse: Vec4::new(0.5, 0.25, 1.0, 1.0),
            ..Material::default()
        }
    }

    fn shiny() -> Material {
        Material {
            specular: Vec4::ONE,
            shininess: 10.0,
            ..Material::default()
        }
    }

    fn facing_up() -> SurfacePoint {
        SurfacePoint {
            position: Vec3A::ZERO,
            normal: Vec3A::Y,
            to_camera: Vec3A::Y,
        }
    }

    fn sun() -> Light {
        Light::Directional {
            color: Vec4::ONE,
            direction: Vec3A::NEG_Y,
        }
    }

    #[test]
    fn test_ambient_scaled_by_ka() {
        let globals = GlobalCoefficients {
            ka: 0.5,
            ..GlobalCoefficients::default()
        };
        let a = ambient(&matte(), globals);
        assert!((a - Vec4::splat(0.05)).length() < EPS);
    }

    #[test]
    fn test_directional_head_on() {
        let c = shade(&facing_up(), &matte(), &sun(), GlobalCoefficients::default(), NO_TEXTURE);
        assert!((c - matte().diffuse).length() < EPS);
    }

    #[test]
    fn test_light_behind_surface_contributes_nothing() {
        let light = Light::Directional {
            color: Vec4::ONE,
            direction: Vec3A::Y,
        };
        let c = shade(&facing_up(), &matte(), &light, GlobalCoefficients::default(), NO_TEXTURE);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_specular_peak_and_falloff() {
        let peak = shade(&facing_up(), &shiny(), &sun(), GlobalCoefficients::default(), NO_TEXTURE);
        assert!((peak - Vec4::ONE).length() < EPS);

        let mut off_axis = facing_up();
        off_axis.to_camera = Vec3A::new(1.0, 1.0, 0.0).normalize();
        let dimmer = shade(&off_axis, &shiny(), &sun(), GlobalCoefficients::default(), NO_TEXTURE);
        let expected = std::f32::consts::FRAC_1_SQRT_2.powf(10.0);
        assert!((dimmer.x - expected).abs() < EPS);
    }

    #[test]
    fn test_point_light_attenuates() {
        let light = Light::Point {
            color: Vec4::ONE,
            position: Vec3A::new(0.0, 2.0, 0.0),
            attenuation: [0.0, 0.0, 1.0],
        };
        let c = shade(&facing_up(), &matte(), &light, GlobalCoefficients::default(), NO_TEXTURE);
        assert!((c - matte().diffuse * 0.25).length() < EPS);
    }

    #[test]
    fn test_spot_specular_also_gets_distance_attenuation() {
        let light = Light::Spot {
            color: Vec4::ONE,
            position: Vec3A::new(0.0, 2.0, 0.0),
            direction: Vec3A::NEG_Y,
            attenuation: [0.0, 0.0, 1.0],
            angle: 0.5,
            penumbra: 0.1,
        };
        let material = Material {
            diffuse: Vec4::ONE,
            specular: Vec4::ONE,
            shininess: 1.0,
            ..Material::default()
        };
        let diffuse_only = Material {
            specular: Vec4::ZERO,
            ..material.clone()
        };
        let globals = GlobalCoefficients::default();
        let diffuse = shade(&facing_up(), &diffuse_only, &light, globals, NO_TEXTURE);
        let total = shade(&facing_up(), &material, &light, globals, NO_TEXTURE);

        // Diffuse ignores the 1/d^2 falloff, specular does not
        assert!((diffuse - Vec4::ONE).length() < EPS);
        assert!((total - diffuse - Vec4::splat(0.25)).length() < EPS);
    }

    #[test]
    fn test_outside_spot_cone_is_dark() {
        let light = Light::Spot {
            color: Vec4::ONE,
            position: Vec3A::new(0.0, 2.0, 0.0),
            direction: Vec3A::X,
            attenuation: [1.0, 0.0, 0.0],
            angle: 0.3,
            penumbra: 0.1,
        };
        let c = shade(&facing_up(), &matte(), &light, GlobalCoefficients::default(), NO_TEXTURE);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_texture_blend() {
        let material = Material {
            diffuse: Vec4::ONE,
            blend: 1.0,
            ..Material::default()
        };
        let texel = Rgba([255, 0, 0, 255]);
        let c = shade(&facing_up(), &material, &sun(), GlobalCoefficients::default(), texel);
        assert!((c - Vec4::new(2.0, 0.0, 0.0, 2.0)).length() < EPS);

        let half = Material {
            blend: 0.5,
            ..material
        };
        let c = shade(&facing_up(), &half, &sun(), GlobalCoefficients::default(), texel);
        assert!((c - Vec4::new(1.5, 0.5, 0.5, 1.5)).length() < EPS);
    }
}
