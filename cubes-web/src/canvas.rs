/// Canvas render target backed by a WebGL2 context
use cubes_core::{Camera, DisplaySize, PixelSize, RenderTarget, Scene};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{HtmlCanvasElement, WebGl2RenderingContext as GL, Window};

use crate::gl::CubeProgram;

/// A `<canvas>` with a WebGL2 context, drawn into as a render target
pub struct CanvasTarget {
    window: Window,
    canvas: HtmlCanvasElement,
    gl: GL,
    program: CubeProgram,
}

impl CanvasTarget {
    pub fn new(window: Window, canvas: HtmlCanvasElement, scene: &Scene) -> Result<Self, JsValue> {
        let gl: GL = canvas
            .get_context("webgl2")?
            .ok_or("WebGL2 not supported")?
            .dyn_into()?;

        let program = CubeProgram::new(&gl, &scene.mesh)?;
        gl.enable(GL::DEPTH_TEST);
        gl.enable(GL::CULL_FACE);

        Ok(Self {
            window,
            canvas,
            gl,
            program,
        })
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl RenderTarget for CanvasTarget {
    type Error = JsValue;

    fn display_size(&self) -> DisplaySize {
        DisplaySize::new(
            f64::from(self.canvas.client_width()),
            f64::from(self.canvas.client_height()),
            self.window.device_pixel_ratio(),
        )
    }

    fn buffer_size(&self) -> PixelSize {
        PixelSize::new(self.canvas.width(), self.canvas.height())
    }

    fn set_buffer_size(&mut self, size: PixelSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn draw(&mut self, scene: &Scene, camera: &Camera) -> Result<(), JsValue> {
        let gl = &self.gl;
        if gl.is_context_lost() {
            return Err(JsValue::from_str("WebGL context lost"));
        }
        let size = self.buffer_size();
        gl.viewport(0, 0, size.width as i32, size.height as i32);

        let clear = scene.clear_color;
        gl.clear_color(clear.r, clear.g, clear.b, 1.0);
        gl.clear(GL::COLOR_BUFFER_BIT | GL::DEPTH_BUFFER_BIT);

        let program = &self.program;
        let uniforms = &program.uniforms;
        gl.use_program(Some(&program.program));
        gl.bind_vertex_array(Some(&program.vao));

        let view_projection = camera.view_projection();
        gl.uniform_matrix4fv_with_f32_array(
            Some(&uniforms.view_projection),
            false,
            view_projection.as_slice(),
        );
        gl.uniform3fv_with_f32_array(Some(&uniforms.eye), camera.position.coords.as_slice());

        let light = &scene.light;
        let radiance = light.color.as_vector() * light.intensity;
        gl.uniform3fv_with_f32_array(Some(&uniforms.light_color), radiance.as_slice());
        gl.uniform3fv_with_f32_array(Some(&uniforms.light_dir), light.direction().as_slice());

        for cube in &scene.cubes {
            let model = cube.transform.model_matrix();
            gl.uniform_matrix4fv_with_f32_array(Some(&uniforms.model), false, model.as_slice());
            gl.uniform3fv_with_f32_array(Some(&uniforms.color), &cube.material.color.to_array());
            let specular = cube.material.specular.to_array();
            gl.uniform3fv_with_f32_array(Some(&uniforms.specular), &specular);
            gl.uniform1f(Some(&uniforms.shininess), cube.material.shininess);
            gl.draw_arrays(GL::TRIANGLES, 0, program.vertex_count);
        }

        gl.bind_vertex_array(None);
        Ok(())
    }
}
