use cgmath::{Deg, Matrix4, Vector3};

/// Scale, per-axis rotation and position of one drawn object
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub scale: [f32; 3],
    /// Rotation about X, Y and Z in degrees
    pub rotation_degrees: [f32; 3],
    pub position: [f32; 3],
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            scale: [1.0, 1.0, 1.0],
            rotation_degrees: [0.0, 0.0, 0.0],
            position: [0.0, 0.0, 0.0],
        }
    }
}

impl Transform {
    pub fn new(scale: [f32; 3], rotation_degrees: [f32; 3], position: [f32; 3]) -> Self {
        Self {
            scale,
            rotation_degrees,
            position,
        }
    }

    /// `T * Rx * Ry * Rz * S`: scale first, then rotate about Z, Y and X, then translate
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let [sx, sy, sz] = self.scale;
        let [rx, ry, rz] = self.rotation_degrees;

        let scale = Matrix4::from_nonuniform_scale(sx, sy, sz);
        let rotation = Matrix4::from_angle_x(Deg(rx))
            * Matrix4::from_angle_y(Deg(ry))
            * Matrix4::from_angle_z(Deg(rz));
        let translation = Matrix4::from_translation(Vector3::from(self.position));

        translation * rotation * scale
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{SquareMatrix, Vector4};

    #[test]
    fn test_unit_scale_no_rotation_is_pure_translation() {
        let transform = Transform::new([1.0; 3], [0.0; 3], [2.0, -3.0, 4.5]);
        let expected = Matrix4::from_translation(Vector3::new(2.0, -3.0, 4.5));
        assert_relative_eq!(transform.model_matrix(), expected);
    }

    #[test]
    fn test_default_is_identity() {
        assert_relative_eq!(Transform::default().model_matrix(), Matrix4::identity());
    }

    #[test]
    fn test_scale_applies_before_translation() {
        let transform = Transform::new([2.0, 1.0, 1.0], [0.0; 3], [0.0; 3]);
        let mapped = transform.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(mapped, Vector4::new(2.0, 0.0, 0.0, 1.0));

        let moved = Transform::new([2.0, 1.0, 1.0], [0.0; 3], [1.0, 0.0, 0.0]);
        let mapped = moved.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 1.0);
        assert_relative_eq!(mapped, Vector4::new(3.0, 0.0, 0.0, 1.0));
    }

    #[test]
    fn test_rotation_order_is_z_then_y_then_x() {
        // Z first takes +X to +Y, then X by 90 takes +Y to +Z
        let transform = Transform::new([1.0; 3], [90.0, 0.0, 90.0], [0.0; 3]);
        let mapped = transform.model_matrix() * Vector4::new(1.0, 0.0, 0.0, 0.0);
        assert_relative_eq!(mapped, Vector4::new(0.0, 0.0, 1.0, 0.0), epsilon = 1e-6);
    }
}
