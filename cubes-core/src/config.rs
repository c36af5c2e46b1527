/// Scene configuration, loadable from TOML
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::Result;

/// Every field has a default, so an empty document yields the stock
/// three-cube scene and a partial one overrides only what it names.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub light: LightConfig,
    #[serde(default)]
    pub material: MaterialConfig,
    #[serde(default = "default_cubes")]
    pub cubes: Vec<CubeConfig>,
    /// Per-index speed increment: cube `i` spins at `1 + i * speed_step`
    #[serde(default = "default_speed_step")]
    pub speed_step: f64,
    #[serde(default)]
    pub clear_color: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov: f32,
    #[serde(default = "default_aspect")]
    pub aspect: f32,
    #[serde(default = "default_near")]
    pub near: f32,
    #[serde(default = "default_far")]
    pub far: f32,
    #[serde(default = "default_camera_position")]
    pub position: [f32; 3],
    #[serde(default)]
    pub target: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightConfig {
    #[serde(default = "default_white")]
    pub color: u32,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
    #[serde(default = "default_light_position")]
    pub position: [f32; 3],
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialConfig {
    #[serde(default = "default_specular")]
    pub specular: u32,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CubeConfig {
    pub color: u32,
    pub x: f32,
}

fn default_fov() -> f32 {
    75.0
}

fn default_aspect() -> f32 {
    2.0
}

fn default_near() -> f32 {
    0.1
}

fn default_far() -> f32 {
    5.0
}

fn default_camera_position() -> [f32; 3] {
    [0.0, 0.0, 2.0]
}

fn default_white() -> u32 {
    0xffffff
}

fn default_intensity() -> f32 {
    1.0
}

fn default_light_position() -> [f32; 3] {
    [-1.0, 2.0, 4.0]
}

fn default_specular() -> u32 {
    0x111111
}

fn default_shininess() -> f32 {
    30.0
}

fn default_speed_step() -> f64 {
    0.1
}

fn default_cubes() -> Vec<CubeConfig> {
    vec![
        CubeConfig {
            color: 0x44aa88,
            x: 0.0,
        },
        CubeConfig {
            color: 0x8844aa,
            x: -2.0,
        },
        CubeConfig {
            color: 0xaa8844,
            x: 2.0,
        },
    ]
}

impl SceneConfig {
    pub fn from_toml_str(source: &str) -> Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera: CameraConfig::default(),
            light: LightConfig::default(),
            material: MaterialConfig::default(),
            cubes: default_cubes(),
            speed_step: default_speed_step(),
            clear_color: 0x000000,
        }
    }
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov: default_fov(),
            aspect: default_aspect(),
            near: default_near(),
            far: default_far(),
            position: default_camera_position(),
            target: [0.0; 3],
        }
    }
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            color: default_white(),
            intensity: default_intensity(),
            position: default_light_position(),
        }
    }
}

impl Default for MaterialConfig {
    fn default() -> Self {
        Self {
            specular: default_specular(),
            shininess: default_shininess(),
        }
    }
}
