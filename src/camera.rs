//! Pinhole camera for primary ray generation.

use glam::{Mat3, Mat4, Vec3A, Vec4};

use crate::error::{RenderError, Result};
use crate::ray::Ray;

/// Camera description supplied by the scene builder.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraData {
    /// Eye position in world coordinates.
    pub position: Vec3A,
    /// Viewing direction (need not be unit length).
    pub look: Vec3A,
    /// Approximate up direction; only its component orthogonal to `look` is used.
    pub up: Vec3A,
    /// Vertical field of view in radians.
    pub height_angle: f32,
}

/// Camera for ray generation.
///
/// Holds the world-to-camera view matrix and its inverse, both fixed at
/// construction together with the aspect ratio and vertical field of view.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Rendered image width in pixel count
    image_width: u32,
    /// Rendered image height in pixel count
    image_height: u32,
    /// World to camera transform
    view_matrix: Mat4,
    /// Camera to world transform
    inverse_view: Mat4,
    /// Image width over image height
    aspect_ratio: f32,
    /// Vertical field of view in radians
    height_angle: f32,
}

impl Camera {
    /// Build the view matrix for an image of `width` x `height` pixels.
    ///
    /// The camera frame is `w = -look`, `v = up` made orthogonal to `w`, and
    /// `u = v x w`. The view matrix rotates into that frame after
    /// translating the eye to the origin.
    pub fn new(data: &CameraData, width: u32, height: u32) -> Self {
        let w = -data.look.normalize();
        let v = (data.up - data.up.dot(w) * w).normalize();
        let u = v.cross(w);

        // Rows of the rotation are the camera basis vectors
        let rotate = Mat4::from_mat3(Mat3::from_cols(u.into(), v.into(), w.into()).transpose());
        let translate = Mat4::from_translation((-data.position).into());
        let view_matrix = rotate * translate;

        Self {
            image_width: width,
            image_height: height,
            view_matrix,
            inverse_view: view_matrix.inverse(),
            aspect_ratio: width as f32 / height as f32,
            height_angle: data.height_angle,
        }
    }

    /// Eye position, recovered by mapping the camera-space origin to world space.
    pub fn position(&self) -> Vec3A {
        self.inverse_view.transform_point3a(Vec3A::ZERO)
    }

    /// World to camera transform.
    pub fn view_matrix(&self) -> Mat4 {
        self.view_matrix
    }

    /// Camera to world transform.
    pub fn inverse_view_matrix(&self) -> Mat4 {
        self.inverse_view
    }

    /// Image width over image height.
    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Vertical field of view in radians.
    pub fn height_angle(&self) -> f32 {
        self.height_angle
    }

    /// Horizontal field of view in radians, `height_angle * aspect_ratio`.
    pub fn width_angle(&self) -> f32 {
        self.height_angle * self.aspect_ratio
    }

    /// Depth of field is not supported.
    pub fn focal_length(&self) -> Result<f32> {
        Err(RenderError::Unsupported("camera focal length"))
    }

    /// Depth of field is not supported.
    pub fn aperture(&self) -> Result<f32> {
        Err(RenderError::Unsupported("camera aperture"))
    }

    /// World-space ray through the center of pixel `(i, j)`.
    ///
    /// Pixel `(0, 0)` is the top-left corner of the image. The camera-space
    /// direction is `(2x tan(wa/2), 2y tan(ha/2), -1)` where `x` and `y` are
    /// the pixel center offsets in `[-0.5, 0.5]`.
    pub fn get_ray(&self, i: u32, j: u32) -> Ray {
        let width = self.image_width as f32;
        let height = self.image_height as f32;
        let x = (i as f32 + 0.5) / width - 0.5;
        let y = (height - 1.0 - j as f32 + 0.5) / height - 0.5;

        let direction = Vec4::new(
            2.0 * x * (self.width_angle() / 2.0).tan(),
            2.0 * y * (self.height_angle / 2.0).tan(),
            -1.0,
            0.0,
        );
        Ray::new(
            self.position(),
            Vec3A::from_vec4(self.inverse_view * direction),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    const EPS: f32 = 1e-5;

    fn looking_down_z(width: u32, height: u32) -> Camera {
        let data = CameraData {
            position: Vec3A::new(0.0, 0.0, 5.0),
            look: Vec3A::new(0.0, 0.0, -1.0),
            up: Vec3A::new(0.0, 1.0, 0.0),
            height_angle: FRAC_PI_2,
        };
        Camera::new(&data, width, height)
    }

    #[test]
    fn test_position_round_trip() {
        let camera = looking_down_z(4, 4);
        assert!((camera.position() - Vec3A::new(0.0, 0.0, 5.0)).length() < EPS);
        let eye = camera.view_matrix().transform_point3a(camera.position());
        assert!(eye.length() < EPS);
    }

    #[test]
    fn test_view_matrix_is_rigid() {
        let data = CameraData {
            position: Vec3A::new(3.0, -2.0, 1.0),
            look: Vec3A::new(-1.0, 0.5, -2.0),
            up: Vec3A::new(0.3, 1.0, 0.1),
            height_angle: 0.8,
        };
        let camera = Camera::new(&data, 10, 10);
        let rotation = Mat3::from_mat4(camera.view_matrix());
        let product = rotation * rotation.transpose();
        assert!(product.abs_diff_eq(Mat3::IDENTITY, 1e-5));
        assert!((rotation.determinant() - 1.0).abs() < 1e-5);

        // The look direction maps onto -z in camera space
        let look = camera.view_matrix().transform_vector3a(data.look.normalize());
        assert!((look - Vec3A::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_angles() {
        let camera = looking_down_z(200, 100);
        assert!((camera.aspect_ratio() - 2.0).abs() < EPS);
        assert!((camera.width_angle() - 2.0 * FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_depth_of_field_unsupported() {
        let camera = looking_down_z(4, 4);
        assert!(matches!(camera.focal_length(), Err(RenderError::Unsupported(_))));
        assert!(matches!(camera.aperture(), Err(RenderError::Unsupported(_))));
    }

    #[test]
    fn test_center_ray_looks_forward() {
        // Odd dimensions put a pixel center exactly on the optical axis
        let camera = looking_down_z(3, 3);
        let ray = camera.get_ray(1, 1);
        assert!((ray.origin - Vec3A::new(0.0, 0.0, 5.0)).length() < EPS);
        assert!((ray.direction.normalize() - Vec3A::NEG_Z).length() < EPS);
    }

    #[test]
    fn test_top_row_points_up() {
        let camera = looking_down_z(4, 4);
        assert!(camera.get_ray(1, 0).direction.y > 0.0);
        assert!(camera.get_ray(1, 3).direction.y < 0.0);
        assert!(camera.get_ray(0, 1).direction.x < 0.0);
        assert!(camera.get_ray(3, 1).direction.x > 0.0);
    }
}
