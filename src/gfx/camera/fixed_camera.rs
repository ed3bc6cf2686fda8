//! Stationary perspective camera
//!
//! The desk is viewed from one configured vantage point; only the aspect
//! ratio follows the window.

use cgmath::*;

use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use crate::config::CameraConfig;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

#[derive(Debug, Clone, Copy)]
pub struct FixedCamera {
    pub eye: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub aspect: f32,
    pub fovy: Deg<f32>,
    pub znear: f32,
    pub zfar: f32,
}

impl Camera for FixedCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let view = Matrix4::look_at_rh(self.eye, self.target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl FixedCamera {
    pub fn from_config(config: &CameraConfig, width: u32, height: u32) -> Self {
        let mut camera = Self {
            eye: Point3::from(config.eye),
            target: Point3::from(config.target),
            up: Vector3::unit_y(),
            aspect: 1.0,
            fovy: Deg(config.fov_y_degrees),
            znear: config.near,
            zfar: config.far,
        };
        camera.resize(width, height);
        camera
    }

    /// Tracks the surface aspect ratio; zero-sized surfaces are ignored
    pub fn resize(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect = width as f32 / height as f32;
        }
    }

    pub fn uniform(&self) -> CameraUniform {
        CameraUniform {
            view_position: self.eye.to_homogeneous().into(),
            view_proj: convert_matrix4_to_array(self.build_view_projection_matrix()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_target_projects_to_screen_centre() {
        let camera = FixedCamera::from_config(&CameraConfig::default(), 1280, 720);
        let clip = camera.build_view_projection_matrix() * camera.target.to_homogeneous();
        let ndc = clip.truncate() / clip.w;

        assert_relative_eq!(ndc.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(ndc.y, 0.0, epsilon = 1e-5);
        assert!(ndc.z > 0.0 && ndc.z < 1.0);
    }

    #[test]
    fn test_resize_ignores_zero_height() {
        let mut camera = FixedCamera::from_config(&CameraConfig::default(), 800, 400);
        camera.resize(800, 0);
        assert_relative_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_uniform_carries_eye_position() {
        let camera = FixedCamera::from_config(&CameraConfig::default(), 100, 100);
        assert_eq!(camera.uniform().view_position, [0.0, 12.0, 26.0, 1.0]);
    }
}
