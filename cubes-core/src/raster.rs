/// Software rasterizer producing RGBA frames of the cube scene
use nalgebra::{Matrix4, Point3, Vector3, Vector4};
use std::convert::Infallible;

use crate::projection::{Camera, ScreenPoint};
use crate::render::RenderTarget;
use crate::scene::{Color, CubeInstance, DirectionalLight, Scene};
use crate::surface::{DisplaySize, PixelSize};

/// Bytes per RGBA8 pixel
pub const BYTES_PER_PIXEL: usize = 4;

/// An RGBA8 image, rows top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    size: PixelSize,
    pixels: Vec<u8>,
}

impl Frame {
    pub fn new(size: PixelSize) -> Self {
        Self {
            size,
            pixels: vec![0; size.area() * BYTES_PER_PIXEL],
        }
    }

    pub fn size(&self) -> PixelSize {
        self.size
    }

    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// RGBA at (`x`, `y`), `None` outside the frame
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        let i = (y as usize * self.size.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut rgba = [0; 4];
        rgba.copy_from_slice(&self.pixels[i..i + BYTES_PER_PIXEL]);
        Some(rgba)
    }

    fn fill(&mut self, rgba: [u8; 4]) {
        for px in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            px.copy_from_slice(&rgba);
        }
    }

    fn put(&mut self, index: usize, rgba: [u8; 4]) {
        let i = index * BYTES_PER_PIXEL;
        self.pixels[i..i + BYTES_PER_PIXEL].copy_from_slice(&rgba);
    }
}

fn to_rgba(color: Vector3<f32>) -> [u8; 4] {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// CPU render target with a depth buffer.
///
/// Faces are flat shaded with Lambert diffuse plus a Blinn-Phong highlight
/// from the scene's directional light. Back faces are culled.
pub struct Rasterizer {
    display: DisplaySize,
    frame: Frame,
    depth_buffer: Vec<f32>,
}

impl Rasterizer {
    pub fn new(display: DisplaySize) -> Self {
        Self {
            display,
            frame: Frame::default(),
            depth_buffer: Vec::new(),
        }
    }

    /// Change how large the surface is displayed; the buffer follows on the
    /// next render.
    pub fn set_display_size(&mut self, display: DisplaySize) {
        self.display = display;
    }

    pub fn frame(&self) -> &Frame {
        &self.frame
    }

    fn clear(&mut self, color: Color) {
        self.frame.fill(to_rgba(color.as_vector()));
        self.depth_buffer.fill(f32::INFINITY);
    }

    fn render_cube(
        &mut self,
        cube: &CubeInstance,
        scene: &Scene,
        camera: &Camera,
        view_projection: &Matrix4<f32>,
    ) {
        let model = cube.transform.model_matrix();
        let rotation = cube.transform.rotation.matrix();
        let mvp = view_projection * model;
        let size = self.frame.size();

        for triangle in &scene.mesh.triangles {
            let clip = triangle.vertices.map(|v| Camera::clip_space(&mvp, &v.position));
            let polygon = clip_near(clip);
            let Some(screen) = polygon
                .iter()
                .map(|c| Camera::clip_to_screen(c, size.width, size.height))
                .collect::<Option<Vec<_>>>()
            else {
                continue;
            };
            if screen.len() < 3 {
                continue;
            }

            let normal = (rotation * triangle.calculate_normal()).normalize();
            let centroid = triangle
                .vertices
                .iter()
                .fold(Vector3::zeros(), |acc, v| acc + v.position.coords)
                / 3.0;
            let world_centroid = model.transform_point(&Point3::from(centroid));
            let to_eye = camera.position - world_centroid;
            let rgba = to_rgba(shade(cube, &scene.light, normal, to_eye));

            for i in 1..screen.len() - 1 {
                let fan = [screen[0], screen[i], screen[i + 1]];
                // Counter-clockwise in NDC turns clockwise once y points down.
                if signed_area(&fan) >= 0.0 {
                    continue;
                }
                self.rasterize_triangle(&fan, rgba);
            }
        }
    }

    fn rasterize_triangle(&mut self, coords: &[ScreenPoint; 3], rgba: [u8; 4]) {
        let [v0, v1, v2] = *coords;
        let width = self.frame.size().width as i32;
        let height = self.frame.size().height as i32;

        // Bounding box clipped to the buffer
        let min_x = (v0.x.min(v1.x).min(v2.x).floor() as i32).max(0);
        let max_x = (v0.x.max(v1.x).max(v2.x).ceil() as i32).min(width - 1);
        let min_y = (v0.y.min(v1.y).min(v2.y).floor() as i32).max(0);
        let max_y = (v0.y.max(v1.y).max(v2.y).ceil() as i32).min(height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = (x as f32 + 0.5, y as f32 + 0.5);
                // Degenerate triangles cover nothing
                let corners = ((v0.x, v0.y), (v1.x, v1.y), (v2.x, v2.y));
                let Some((w0, w1, w2)) = barycentric(corners.0, corners.1, corners.2, p) else {
                    return;
                };
                if w0 < 0.0 || w1 < 0.0 || w2 < 0.0 {
                    continue;
                }

                let depth = w0 * v0.depth + w1 * v1.depth + w2 * v2.depth;
                if !(-1.0..=1.0).contains(&depth) {
                    continue;
                }

                let idx = y as usize * width as usize + x as usize;
                if depth < self.depth_buffer[idx] {
                    self.depth_buffer[idx] = depth;
                    self.frame.put(idx, rgba);
                }
            }
        }
    }
}

impl RenderTarget for Rasterizer {
    type Error = Infallible;

    fn display_size(&self) -> DisplaySize {
        self.display
    }

    fn buffer_size(&self) -> PixelSize {
        self.frame.size()
    }

    fn set_buffer_size(&mut self, size: PixelSize) {
        self.frame = Frame::new(size);
        self.depth_buffer = vec![f32::INFINITY; size.area()];
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Infallible> {
        self.clear(scene.clear_color);
        let view_projection = camera.view_projection();
        for cube in &scene.cubes {
            self.render_cube(cube, scene, camera, &view_projection);
        }
        Ok(())
    }
}

/// Lambert diffuse plus Blinn-Phong specular for one face.
fn shade(
    cube: &CubeInstance,
    light: &DirectionalLight,
    normal: Vector3<f32>,
    to_eye: Vector3<f32>,
) -> Vector3<f32> {
    let to_light = light.direction();
    let n_dot_l = normal.dot(&to_light);
    if n_dot_l <= 0.0 {
        return Vector3::zeros();
    }

    let radiance = light.color.as_vector() * light.intensity;
    let material = &cube.material;
    let diffuse = material.color.as_vector() * n_dot_l;

    let half = (to_light + to_eye.normalize()).normalize();
    let highlight = normal.dot(&half).max(0.0).powf(material.shininess);
    let specular = material.specular.as_vector() * highlight;

    (diffuse + specular).component_mul(&radiance)
}

/// Clip a triangle against the near plane (`z >= -w`). The result is a
/// convex polygon with 0, 3 or 4 vertices in the triangle's winding order.
fn clip_near(clip: [Vector4<f32>; 3]) -> Vec<Vector4<f32>> {
    let mut polygon = Vec::with_capacity(4);
    for i in 0..3 {
        let a = clip[i];
        let b = clip[(i + 1) % 3];
        let da = a.z + a.w;
        let db = b.z + b.w;
        if da >= 0.0 {
            polygon.push(a);
        }
        if (da >= 0.0) != (db >= 0.0) {
            let t = da / (da - db);
            polygon.push(a + (b - a) * t);
        }
    }
    polygon
}

fn signed_area(coords: &[ScreenPoint; 3]) -> f32 {
    let [a, b, c] = coords;
    (b.x - a.x) * (c.y - a.y) - (c.x - a.x) * (b.y - a.y)
}

/// Calculate barycentric coordinates for a point in a triangle
fn barycentric(
    v0: (f32, f32),
    v1: (f32, f32),
    v2: (f32, f32),
    p: (f32, f32),
) -> Option<(f32, f32, f32)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-6 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CameraConfig, CubeConfig, SceneConfig};
    use crate::render::Stage;

    fn render_at(timestamp_ms: f64, display: DisplaySize) -> Frame {
        let mut stage = Stage::default();
        let mut raster = Rasterizer::new(display);
        stage.frame(timestamp_ms, &mut raster).unwrap();
        raster.frame().clone()
    }

    #[test]
    fn test_buffer_follows_display() {
        let frame = render_at(0.0, DisplaySize::new(120.0, 60.0, 1.0));
        assert_eq!(frame.size(), PixelSize::new(120, 60));
        assert_eq!(frame.pixels().len(), 120 * 60 * BYTES_PER_PIXEL);
    }

    #[test]
    fn test_corner_is_clear_color() {
        let frame = render_at(0.0, DisplaySize::new(120.0, 60.0, 1.0));
        assert_eq!(frame.pixel(0, 0), Some([0, 0, 0, 255]));
        assert_eq!(frame.pixel(120, 0), None);
    }

    #[test]
    fn test_centre_cube_is_lit_green() {
        // At t = 0 the middle cube shows its +z face to the camera.
        let frame = render_at(0.0, DisplaySize::new(120.0, 60.0, 1.0));
        let [r, g, b, a] = frame.pixel(60, 30).unwrap();
        assert_eq!(a, 255);
        assert!(g > r && g > b, "expected the 0x44aa88 cube, got {r} {g} {b}");
    }

    #[test]
    fn test_side_cubes_are_visible() {
        let frame = render_at(0.0, DisplaySize::new(120.0, 60.0, 1.0));
        // Cube centres at x = -2 and x = 2 land left and right of the middle
        let left = frame.pixel(10, 30).unwrap();
        let right = frame.pixel(110, 30).unwrap();
        assert_ne!(left, [0, 0, 0, 255]);
        assert_ne!(right, [0, 0, 0, 255]);
    }

    #[test]
    fn test_face_crossing_camera_plane_is_clipped_not_dropped() {
        // Camera beside the cube, level with it: the lit -x face runs from in
        // front of the camera to behind it.
        let config = SceneConfig {
            cubes: vec![CubeConfig {
                color: 0x44aa88,
                x: 0.0,
            }],
            camera: CameraConfig {
                position: [-0.9, 0.0, 0.3],
                target: [-0.9, 0.0, -1.0],
                near: 0.01,
                ..CameraConfig::default()
            },
            ..SceneConfig::default()
        };
        let mut stage = Stage::new(&config);
        let mut raster = Rasterizer::new(DisplaySize::new(200.0, 100.0, 1.0));
        stage.render(&mut raster).unwrap();

        let clear = [0, 0, 0, 255];
        let frame = raster.frame();
        let drawn = frame
            .pixels()
            .chunks_exact(BYTES_PER_PIXEL)
            .filter(|px| *px != clear)
            .count();
        assert!(drawn > 1000, "only {drawn} pixels drawn");
        // The face sits to the right of the view axis
        assert_eq!(frame.pixel(10, 50), Some(clear));
        assert_ne!(frame.pixel(190, 50), Some(clear));
    }

    #[test]
    fn test_triangle_behind_camera_is_clipped_away() {
        let behind = [
            Vector4::new(0.0, 0.0, -2.0, 1.0),
            Vector4::new(1.0, 0.0, -2.0, 1.0),
            Vector4::new(0.0, 1.0, -2.0, 1.0),
        ];
        assert!(clip_near(behind).is_empty());
    }

    #[test]
    fn test_clip_near_splits_straddling_triangle() {
        let straddling = [
            Vector4::new(0.0, 0.0, -2.0, 1.0),
            Vector4::new(1.0, 0.0, 0.0, 1.0),
            Vector4::new(0.0, 1.0, 0.0, 1.0),
        ];
        let polygon = clip_near(straddling);
        assert_eq!(polygon.len(), 4);
        for v in &polygon {
            assert!(v.z + v.w >= -1e-6);
        }
    }

    #[test]
    fn test_barycentric_degenerate() {
        assert!(barycentric((0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.5, 0.5)).is_none());
    }
}
