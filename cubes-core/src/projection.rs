/// Perspective camera and projection utilities
use nalgebra::{Matrix4, Point3, Vector3, Vector4};

use crate::config::CameraConfig;

/// A vertex after projection into drawing-buffer space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenPoint {
    pub x: f32,
    pub y: f32,
    /// Normalised device depth in `[-1, 1]`, smaller is closer
    pub depth: f32,
}

/// Perspective camera. `fov` is the vertical field of view in degrees.
#[derive(Debug, Clone)]
pub struct Camera {
    pub position: Point3<f32>,
    pub target: Point3<f32>,
    pub up: Vector3<f32>,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Matrix4<f32>,
}

impl Camera {
    pub fn new(fov: f32, aspect: f32, near: f32, far: f32) -> Self {
        let mut camera = Self {
            position: Point3::origin(),
            target: Point3::new(0.0, 0.0, -1.0),
            up: Vector3::y(),
            fov,
            aspect,
            near,
            far,
            projection: Matrix4::identity(),
        };
        camera.update_projection_matrix();
        camera
    }

    pub fn from_config(config: &CameraConfig) -> Self {
        let mut camera = Self::new(config.fov, config.aspect, config.near, config.far);
        camera.position = Point3::from(config.position);
        camera.target = Point3::from(config.target);
        camera
    }

    /// Set a new aspect ratio and rebuild the projection.
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
        self.update_projection_matrix();
    }

    /// Rebuild the cached projection from `fov`, `aspect`, `near` and `far`.
    pub fn update_projection_matrix(&mut self) {
        self.projection =
            Matrix4::new_perspective(self.aspect, self.fov.to_radians(), self.near, self.far);
    }

    /// Create the view matrix (camera transformation)
    pub fn view_matrix(&self) -> Matrix4<f32> {
        Matrix4::look_at_rh(&self.position, &self.target, &self.up)
    }

    pub fn projection_matrix(&self) -> &Matrix4<f32> {
        &self.projection
    }

    pub fn view_projection(&self) -> Matrix4<f32> {
        self.projection * self.view_matrix()
    }

    /// Homogeneous clip-space position of a world-space point
    pub fn clip_space(view_projection: &Matrix4<f32>, point: &Point3<f32>) -> Vector4<f32> {
        view_projection * point.to_homogeneous()
    }

    /// Perspective divide and viewport mapping into a `width` x `height`
    /// pixel buffer whose origin is the top-left corner.
    ///
    /// Returns `None` for positions on or behind the camera plane.
    pub fn clip_to_screen(clip: &Vector4<f32>, width: u32, height: u32) -> Option<ScreenPoint> {
        // Prevent division by near-zero depth values
        if clip.w < 1e-6 {
            return None;
        }

        let ndc_x = clip.x / clip.w;
        let ndc_y = clip.y / clip.w;

        Some(ScreenPoint {
            x: (ndc_x + 1.0) * 0.5 * width as f32,
            y: (1.0 - ndc_y) * 0.5 * height as f32,
            depth: clip.z / clip.w,
        })
    }

    /// Project a world-space point straight into a pixel buffer.
    pub fn project_to_screen(
        view_projection: &Matrix4<f32>,
        point: &Point3<f32>,
        width: u32,
        height: u32,
    ) -> Option<ScreenPoint> {
        Self::clip_to_screen(&Self::clip_space(view_projection, point), width, height)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}
