/// Cubes Core Library - Scene, animation and frame logic shared by every backend
///
/// This library holds everything that does not touch a window or a browser:
/// camera and transform math, the three-cube scene, the animation clock,
/// resize detection, render orchestration, a software rasterizer and
/// screenshot encoding.

pub mod animation;
pub mod capture;
pub mod config;
pub mod error;
pub mod geometry;
pub mod projection;
pub mod raster;
pub mod render;
pub mod scene;
pub mod surface;
pub mod transform;

// Re-export commonly used types
pub use animation::AnimationState;
pub use capture::screenshot_file_name;
pub use config::SceneConfig;
pub use error::{Error, Result};
pub use geometry::{Mesh, Triangle, Vertex};
pub use projection::Camera;
pub use raster::{Frame, Rasterizer};
pub use render::{render, RenderTarget, Stage};
pub use scene::{Color, Scene};
pub use surface::{DisplaySize, PixelSize};
pub use transform::{RotationState, Transform};
