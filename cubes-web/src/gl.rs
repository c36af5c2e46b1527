/// WebGL2 shader program and cube vertex upload
use cubes_core::geometry::FLOATS_PER_VERTEX;
use cubes_core::Mesh;
use wasm_bindgen::JsValue;
use web_sys::{
    WebGl2RenderingContext as GL, WebGlBuffer, WebGlProgram, WebGlShader, WebGlUniformLocation,
    WebGlVertexArrayObject,
};

const VERTEX_SHADER: &str = r#"#version 300 es
in vec3 a_position;
in vec3 a_normal;

uniform mat4 u_model;
uniform mat4 u_view_projection;

out vec3 v_normal;
out vec3 v_world;

void main() {
    vec4 world = u_model * vec4(a_position, 1.0);
    v_world = world.xyz;
    // Model matrices carry rotation and translation only
    v_normal = mat3(u_model) * a_normal;
    gl_Position = u_view_projection * world;
}
"#;

const FRAGMENT_SHADER: &str = r#"#version 300 es
precision highp float;

in vec3 v_normal;
in vec3 v_world;

uniform vec3 u_color;
uniform vec3 u_specular;
uniform float u_shininess;
uniform vec3 u_light_color;
uniform vec3 u_light_dir;
uniform vec3 u_eye;

out vec4 out_color;

void main() {
    vec3 n = normalize(v_normal);
    float n_dot_l = dot(n, u_light_dir);
    vec3 color = vec3(0.0);
    if (n_dot_l > 0.0) {
        vec3 h = normalize(u_light_dir + normalize(u_eye - v_world));
        float highlight = pow(max(dot(n, h), 0.0), u_shininess);
        color = (u_color * n_dot_l + u_specular * highlight) * u_light_color;
    }
    out_color = vec4(color, 1.0);
}
"#;

fn compile_shader(gl: &GL, kind: u32, source: &str) -> Result<WebGlShader, JsValue> {
    let shader = gl
        .create_shader(kind)
        .ok_or("unable to create shader object")?;
    gl.shader_source(&shader, source);
    gl.compile_shader(&shader);

    if gl
        .get_shader_parameter(&shader, GL::COMPILE_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(shader)
    } else {
        let log = gl.get_shader_info_log(&shader).unwrap_or_default();
        gl.delete_shader(Some(&shader));
        Err(JsValue::from_str(&format!("shader compile failed: {log}")))
    }
}

fn link_program(
    gl: &GL,
    vertex: &WebGlShader,
    fragment: &WebGlShader,
) -> Result<WebGlProgram, JsValue> {
    let program = gl.create_program().ok_or("unable to create program")?;
    gl.attach_shader(&program, vertex);
    gl.attach_shader(&program, fragment);
    gl.link_program(&program);

    if gl
        .get_program_parameter(&program, GL::LINK_STATUS)
        .as_bool()
        .unwrap_or(false)
    {
        Ok(program)
    } else {
        let log = gl.get_program_info_log(&program).unwrap_or_default();
        gl.delete_program(Some(&program));
        Err(JsValue::from_str(&format!("program link failed: {log}")))
    }
}

/// Uniform locations of the Phong program
pub struct Uniforms {
    pub model: WebGlUniformLocation,
    pub view_projection: WebGlUniformLocation,
    pub color: WebGlUniformLocation,
    pub specular: WebGlUniformLocation,
    pub shininess: WebGlUniformLocation,
    pub light_color: WebGlUniformLocation,
    pub light_dir: WebGlUniformLocation,
    pub eye: WebGlUniformLocation,
}

fn uniform(gl: &GL, program: &WebGlProgram, name: &str) -> Result<WebGlUniformLocation, JsValue> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| JsValue::from_str(&format!("missing uniform {name}")))
}

/// Phong shader program plus the uploaded box mesh
pub struct CubeProgram {
    pub program: WebGlProgram,
    pub uniforms: Uniforms,
    pub vao: WebGlVertexArrayObject,
    _vertices: WebGlBuffer,
    pub vertex_count: i32,
}

impl CubeProgram {
    pub fn new(gl: &GL, mesh: &Mesh) -> Result<Self, JsValue> {
        let vertex = compile_shader(gl, GL::VERTEX_SHADER, VERTEX_SHADER)?;
        let fragment = compile_shader(gl, GL::FRAGMENT_SHADER, FRAGMENT_SHADER)?;
        let program = link_program(gl, &vertex, &fragment)?;
        // Linked programs keep their own copy of the shader code
        gl.delete_shader(Some(&vertex));
        gl.delete_shader(Some(&fragment));

        let uniforms = Uniforms {
            model: uniform(gl, &program, "u_model")?,
            view_projection: uniform(gl, &program, "u_view_projection")?,
            color: uniform(gl, &program, "u_color")?,
            specular: uniform(gl, &program, "u_specular")?,
            shininess: uniform(gl, &program, "u_shininess")?,
            light_color: uniform(gl, &program, "u_light_color")?,
            light_dir: uniform(gl, &program, "u_light_dir")?,
            eye: uniform(gl, &program, "u_eye")?,
        };

        let vao = gl
            .create_vertex_array()
            .ok_or("unable to create vertex array")?;
        gl.bind_vertex_array(Some(&vao));

        let vertices = gl.create_buffer().ok_or("unable to create buffer")?;
        gl.bind_buffer(GL::ARRAY_BUFFER, Some(&vertices));
        let data = js_sys::Float32Array::from(mesh.interleaved().as_slice());
        gl.buffer_data_with_array_buffer_view(GL::ARRAY_BUFFER, &data, GL::STATIC_DRAW);

        let stride = (FLOATS_PER_VERTEX * std::mem::size_of::<f32>()) as i32;
        let normal_offset = 3 * std::mem::size_of::<f32>() as i32;
        for (name, offset) in [("a_position", 0), ("a_normal", normal_offset)] {
            let location = gl.get_attrib_location(&program, name);
            if location < 0 {
                return Err(JsValue::from_str(&format!("missing attribute {name}")));
            }
            gl.enable_vertex_attrib_array(location as u32);
            gl.vertex_attrib_pointer_with_i32(location as u32, 3, GL::FLOAT, false, stride, offset);
        }
        gl.bind_vertex_array(None);

        Ok(Self {
            program,
            uniforms,
            vao,
            _vertices: vertices,
            vertex_count: mesh.vertex_count() as i32,
        })
    }
}
