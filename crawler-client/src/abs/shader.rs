//! Shader compilation from asset files and typed uniform upload.

use std::{path::Path, sync::Arc};

use glam::{Mat4, Vec3, Vec4};
use glow::HasContext;

/// Represents an individual OpenGL shader.
pub struct Shader {
    gl: Arc<glow::Context>,
    id: glow::Shader,
}

impl Shader {
    /// Compiles a new shader from the given source code.
    pub fn new(gl: &Arc<glow::Context>, shader_type: u32, source: &str) -> Result<Self, String> {
        unsafe {
            let shader = gl.create_shader(shader_type).map_err(|e| e.to_string())?;
            gl.shader_source(shader, source);
            gl.compile_shader(shader);

            if !gl.get_shader_compile_status(shader) {
                let log = gl.get_shader_info_log(shader);
                gl.delete_shader(shader);
                return Err(log);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: shader,
            })
        }
    }

    /// Reads a shader source file and compiles it.
    pub fn from_file(
        gl: &Arc<glow::Context>,
        shader_type: u32,
        path: impl AsRef<Path>,
    ) -> Result<Self, String> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read shader {}: {e}", path.display()))?;
        Self::new(gl, shader_type, &source)
            .map_err(|log| format!("Failed to compile shader {}: {log}", path.display()))
    }
}

impl Drop for Shader {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_shader(self.id);
        }
    }
}

/// A value that can be written to a named uniform of a linked program.
///
/// Names the program does not use are skipped, the driver is free to strip
/// uniforms that never reach an output.
pub trait Uniform {
    fn set_uniform(&self, gl: &glow::Context, program: glow::Program, name: &str);
}

macro_rules! uniform {
    ($ty:ty, |$gl:ident, $loc:ident, $v:ident| $body:expr) => {
        impl Uniform for $ty {
            fn set_uniform(&self, $gl: &glow::Context, program: glow::Program, name: &str) {
                let $v = self;
                unsafe {
                    if let Some(loc) = $gl.get_uniform_location(program, name) {
                        let $loc = Some(&loc);
                        $body;
                    }
                }
            }
        }
    };
}

uniform!(bool, |gl, loc, v| gl.uniform_1_i32(loc, *v as i32));
uniform!(i32, |gl, loc, v| gl.uniform_1_i32(loc, *v));
uniform!(f32, |gl, loc, v| gl.uniform_1_f32(loc, *v));
uniform!(Vec3, |gl, loc, v| gl.uniform_3_f32(loc, v.x, v.y, v.z));
uniform!(Vec4, |gl, loc, v| gl.uniform_4_f32(loc, v.x, v.y, v.z, v.w));
uniform!(Mat4, |gl, loc, v| gl.uniform_matrix_4_f32_slice(loc, false, v.as_ref()));

/// Represents an OpenGL shader program composed of multiple shaders.
pub struct ShaderProgram {
    gl: Arc<glow::Context>,
    id: glow::Program,
}

impl ShaderProgram {
    /// Links a new shader program from the given shaders.
    pub fn new(gl: &Arc<glow::Context>, shaders: &[&Shader]) -> Result<Self, String> {
        unsafe {
            let program = gl.create_program().map_err(|e| e.to_string())?;

            for shader in shaders {
                gl.attach_shader(program, shader.id);
            }

            gl.link_program(program);

            if !gl.get_program_link_status(program) {
                let log = gl.get_program_info_log(program);
                gl.delete_program(program);
                return Err(log);
            }

            for shader in shaders {
                gl.detach_shader(program, shader.id);
            }

            Ok(Self {
                gl: Arc::clone(gl),
                id: program,
            })
        }
    }

    /// Compiles a vertex and a fragment shader from files and links them.
    pub fn from_files(
        gl: &Arc<glow::Context>,
        vert: impl AsRef<Path>,
        frag: impl AsRef<Path>,
    ) -> Result<Self, String> {
        let vert = Shader::from_file(gl, glow::VERTEX_SHADER, vert)?;
        let frag = Shader::from_file(gl, glow::FRAGMENT_SHADER, frag)?;
        let program = Self::new(gl, &[&vert, &frag])
            .map_err(|log| format!("Failed to link shader program: {log}"))?;
        log::debug!("Linked shader program {:?}", program.id);
        Ok(program)
    }

    /// Binds the shader program for use.
    pub fn use_program(&self) {
        unsafe {
            self.gl.use_program(Some(self.id));
        }
    }

    /// Sets a uniform variable in the shader program.
    pub fn set_uniform<T: Uniform>(&self, name: &str, value: T) {
        value.set_uniform(&self.gl, self.id, name);
    }
}

impl Drop for ShaderProgram {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.id);
        }
    }
}
