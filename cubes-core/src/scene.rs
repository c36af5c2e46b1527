/// The three-cube scene: shared box mesh, per-cube material and transform,
/// and a single directional light
use nalgebra::{Point3, Vector3};

use crate::animation::{rotation_angle, AnimationState};
use crate::config::SceneConfig;
use crate::geometry::Mesh;
use crate::transform::Transform;

/// Linear RGB colour with components in `[0, 1]`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const BLACK: Color = Color { r: 0.0, g: 0.0, b: 0.0 };

    pub fn from_hex(hex: u32) -> Self {
        let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
        Self {
            r: channel(16),
            g: channel(8),
            b: channel(0),
        }
    }

    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }

    pub fn as_vector(&self) -> Vector3<f32> {
        Vector3::new(self.r, self.g, self.b)
    }
}

/// Phong material parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    pub color: Color,
    pub specular: Color,
    pub shininess: f32,
}

/// Light shining from `position` toward `target`, like the sun
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    pub color: Color,
    pub intensity: f32,
    pub position: Point3<f32>,
    pub target: Point3<f32>,
}

impl DirectionalLight {
    /// Unit vector from the lit surface toward the light
    pub fn direction(&self) -> Vector3<f32> {
        (self.position - self.target).normalize()
    }
}

#[derive(Debug, Clone)]
pub struct CubeInstance {
    pub material: Material,
    pub transform: Transform,
}

#[derive(Debug, Clone)]
pub struct Scene {
    pub mesh: Mesh,
    pub cubes: Vec<CubeInstance>,
    pub light: DirectionalLight,
    pub clear_color: Color,
    pub speed_step: f64,
}

impl Scene {
    pub fn from_config(config: &SceneConfig) -> Self {
        let specular = Color::from_hex(config.material.specular);
        let cubes = config
            .cubes
            .iter()
            .map(|cube| CubeInstance {
                material: Material {
                    color: Color::from_hex(cube.color),
                    specular,
                    shininess: config.material.shininess,
                },
                transform: Transform::at(Vector3::new(cube.x, 0.0, 0.0)),
            })
            .collect();

        Self {
            mesh: Mesh::box_geometry(1.0, 1.0, 1.0),
            cubes,
            light: DirectionalLight {
                color: Color::from_hex(config.light.color),
                intensity: config.light.intensity,
                position: Point3::from(config.light.position),
                target: Point3::origin(),
            },
            clear_color: Color::from_hex(config.clear_color),
            speed_step: config.speed_step,
        }
    }

    /// Pose every cube for the stored animation time. Both X and Y get the
    /// same angle, and later cubes spin slightly faster.
    pub fn apply_animation(&mut self, state: &AnimationState) {
        let t = state.seconds();
        for (index, cube) in self.cubes.iter_mut().enumerate() {
            let angle = rotation_angle(t, index, self.speed_step);
            cube.transform.rotation.x = angle;
            cube.transform.rotation.y = angle;
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}
