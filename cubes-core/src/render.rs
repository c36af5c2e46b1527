/// Frame orchestration shared by every backend
use crate::animation::AnimationState;
use crate::config::SceneConfig;
use crate::projection::Camera;
use crate::scene::Scene;
use crate::surface::{DisplaySize, PixelSize};

/// A surface that can be sized and drawn into.
pub trait RenderTarget {
    type Error;

    /// How large the surface is currently shown
    fn display_size(&self) -> DisplaySize;

    /// Current drawing-buffer size
    fn buffer_size(&self) -> PixelSize;

    fn set_buffer_size(&mut self, size: PixelSize);

    /// Clear and draw the whole scene once.
    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), Self::Error>;
}

/// Match the drawing buffer to the displayed size. Returns the new buffer
/// size if a resize happened.
pub fn resize_to_display_size<T: RenderTarget>(target: &mut T) -> Option<PixelSize> {
    let current = target.buffer_size();
    let resized = target.display_size().resize_from(current)?;
    target.set_buffer_size(resized);
    Some(resized)
}

/// Resize if needed, pose the cubes for `state`, and draw one frame.
///
/// Returns `true` when the buffer was resized (and the camera aspect
/// recomputed) before drawing. The animation clock is only read, so an
/// extra frame for a screenshot leaves the animation where it was.
pub fn render<T: RenderTarget>(
    target: &mut T,
    scene: &mut Scene,
    camera: &mut Camera,
    state: &AnimationState,
) -> Result<bool, T::Error> {
    let resized = resize_to_display_size(target);
    if let Some(size) = resized {
        // A hidden element has no height; keep the last usable aspect.
        if let Some(aspect) = target.display_size().aspect() {
            camera.set_aspect(aspect);
        }
        log::debug!("drawing buffer resized to {size}, aspect {:.3}", camera.aspect);
    }

    scene.apply_animation(state);
    target.draw(scene, camera)?;
    Ok(resized.is_some())
}

/// Scene, camera and animation clock owned together by a frame driver.
/// [`Stage::frame`] is the only place the clock advances.
#[derive(Debug, Clone)]
pub struct Stage {
    pub scene: Scene,
    pub camera: Camera,
    state: AnimationState,
}

impl Stage {
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            scene: Scene::from_config(config),
            camera: Camera::from_config(&config.camera),
            state: AnimationState::new(),
        }
    }

    pub fn state(&self) -> &AnimationState {
        &self.state
    }

    /// Draw with the stored time. Safe to call any number of times.
    pub fn render<T: RenderTarget>(&mut self, target: &mut T) -> Result<bool, T::Error> {
        render(target, &mut self.scene, &mut self.camera, &self.state)
    }

    /// One display refresh: store the timestamp, then render.
    pub fn frame<T: RenderTarget>(
        &mut self,
        timestamp_ms: f64,
        target: &mut T,
    ) -> Result<(), T::Error> {
        self.state.advance(timestamp_ms);
        self.render(target).map(|_| ())
    }
}

impl Default for Stage {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Records draws instead of rasterizing
    struct FakeCanvas {
        display: DisplaySize,
        buffer: PixelSize,
        resizes: usize,
        draws: Vec<f32>,
    }

    impl FakeCanvas {
        fn new(display: DisplaySize, buffer: PixelSize) -> Self {
            Self {
                display,
                buffer,
                resizes: 0,
                draws: Vec::new(),
            }
        }
    }

    impl RenderTarget for FakeCanvas {
        type Error = ();

        fn display_size(&self) -> DisplaySize {
            self.display
        }

        fn buffer_size(&self) -> PixelSize {
            self.buffer
        }

        fn set_buffer_size(&mut self, size: PixelSize) {
            self.buffer = size;
            self.resizes += 1;
        }

        fn draw(&mut self, scene: &Scene, _camera: &Camera) -> Result<(), ()> {
            self.draws.push(scene.cubes[0].transform.rotation.x);
            Ok(())
        }
    }

    #[test]
    fn test_default_canvas_scenario() {
        let display = DisplaySize::new(300.0, 150.0, 1.0);
        let mut canvas = FakeCanvas::new(display, PixelSize::new(0, 0));
        let mut stage = Stage::default();
        stage.camera.set_aspect(1.0);

        assert_eq!(stage.render(&mut canvas), Ok(true));
        assert_eq!(canvas.buffer, PixelSize::new(300, 150));
        assert!((stage.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_aspect_uses_css_size_not_buffer() {
        let display = DisplaySize::new(400.0, 100.0, 2.0);
        let mut canvas = FakeCanvas::new(display, PixelSize::new(300, 150));
        let mut stage = Stage::default();
        stage.render(&mut canvas).unwrap();
        assert_eq!(canvas.buffer, PixelSize::new(800, 200));
        assert!((stage.camera.aspect - 4.0).abs() < 1e-6);
    }

    #[test]
    fn test_no_resize_keeps_camera() {
        let display = DisplaySize::new(300.0, 150.0, 1.0);
        let mut canvas = FakeCanvas::new(display, PixelSize::new(300, 150));
        let mut stage = Stage::default();
        stage.camera.set_aspect(1.5);

        assert_eq!(stage.render(&mut canvas), Ok(false));
        assert_eq!(canvas.resizes, 0);
        assert!((stage.camera.aspect - 1.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_height_keeps_aspect() {
        let display = DisplaySize::new(300.0, 0.0, 1.0);
        let mut canvas = FakeCanvas::new(display, PixelSize::new(300, 150));
        let mut stage = Stage::default();
        assert_eq!(stage.render(&mut canvas), Ok(true));
        assert_eq!(canvas.buffer, PixelSize::new(300, 0));
        assert!(stage.camera.aspect.is_finite());
        assert!((stage.camera.aspect - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_render_does_not_advance_time() {
        let display = DisplaySize::new(300.0, 150.0, 1.0);
        let mut canvas = FakeCanvas::new(display, PixelSize::new(300, 150));
        let mut stage = Stage::default();
        stage.frame(1500.0, &mut canvas).unwrap();
        stage.render(&mut canvas).unwrap();
        stage.render(&mut canvas).unwrap();

        assert_eq!(stage.state().seconds(), 1.5);
        assert_eq!(canvas.draws, vec![1.5, 1.5, 1.5]);
    }

    #[test]
    fn test_frame_advances_time() {
        let display = DisplaySize::new(300.0, 150.0, 1.0);
        let mut canvas = FakeCanvas::new(display, PixelSize::new(300, 150));
        let mut stage = Stage::default();
        stage.frame(1000.0, &mut canvas).unwrap();
        stage.frame(2000.0, &mut canvas).unwrap();
        assert_eq!(canvas.draws, vec![1.0, 2.0]);
    }
}
