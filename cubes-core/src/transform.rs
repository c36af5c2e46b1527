/// Object transforms and rotation state
use nalgebra::{Matrix3, Matrix4, Rotation3, Vector3};

/// Euler rotation around three axes (in radians), applied in X, Y, Z order
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl RotationState {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    /// Rotation matrix for intrinsic X-then-Y-then-Z Euler angles
    pub fn matrix(&self) -> Matrix3<f32> {
        let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), self.x);
        let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), self.y);
        let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), self.z);
        (rx * ry * rz).into_inner()
    }
}

/// Position plus rotation of one object in the scene
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub position: Vector3<f32>,
    pub rotation: RotationState,
}

impl Transform {
    pub fn at(position: Vector3<f32>) -> Self {
        Self {
            position,
            rotation: RotationState::zero(),
        }
    }

    /// Model matrix: rotate about the local origin, then translate.
    pub fn model_matrix(&self) -> Matrix4<f32> {
        let mut model = self.rotation.matrix().to_homogeneous();
        model.fixed_view_mut::<3, 1>(0, 3).copy_from(&self.position);
        model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_rotation() {
        let rotation = RotationState::zero();
        assert!((rotation.matrix() - Matrix3::identity()).norm() < 1e-6);
    }

    #[test]
    fn test_model_matrix_translates() {
        let transform = Transform::at(Vector3::new(-2.0, 0.0, 0.0));
        let model = transform.model_matrix();
        let moved = model.transform_point(&nalgebra::Point3::origin());
        assert!((moved.x + 2.0).abs() < 1e-6);
        assert!(moved.y.abs() < 1e-6 && moved.z.abs() < 1e-6);
    }

    #[test]
    fn test_rotation_order_is_x_then_y() {
        let quarter = std::f32::consts::FRAC_PI_2;
        let rotation = RotationState::new(quarter, quarter, 0.0);
        let z = rotation.matrix() * Vector3::z();
        assert!((z - Vector3::x()).norm() < 1e-5);
    }
}
