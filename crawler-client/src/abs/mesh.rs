//! Mesh management module.
//!
//! This module defines the [`Mesh`] struct for managing mesh data on the GPU side.
//! Vertices should implement the [`Vertex`] trait.

use std::sync::Arc;

use glow::HasContext;

/// Trait that defines the necessary methods for a vertex.
pub trait Vertex {
    /// Sets up the vertex attribute pointers for the vertex.
    fn vertex_attribs(gl: &glow::Context);
}

/// Enables a float attribute of `size` components at byte `offset` of `V`.
///
/// # Safety
/// A vertex array and the array buffer holding `V`s must be bound.
pub unsafe fn float_attrib<V>(gl: &glow::Context, index: u32, size: i32, offset: usize) {
    unsafe {
        gl.enable_vertex_attrib_array(index);
        gl.vertex_attrib_pointer_f32(
            index,
            size,
            glow::FLOAT,
            false,
            std::mem::size_of::<V>() as i32,
            offset as i32,
        );
    }
}

fn as_bytes<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, std::mem::size_of_val(data)) }
}

/// Represents a mesh stored on the GPU side.
pub struct Mesh {
    gl: Arc<glow::Context>,
    draw_mode: u32,
    vao: glow::VertexArray,
    vbo: glow::Buffer,
    ebo: Option<glow::Buffer>,
    count: usize,
}

impl Mesh {
    /// Creates a new indexed mesh from the given vertex and index data.
    pub fn new<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: &[u32],
        draw_mode: u32,
    ) -> Result<Self, String> {
        Self::build(gl, vertices, Some(indices), draw_mode)
    }

    /// Creates a new mesh that is drawn straight from its vertex list.
    pub fn new_arrays<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        draw_mode: u32,
    ) -> Result<Self, String> {
        Self::build(gl, vertices, None, draw_mode)
    }

    fn build<V: Vertex>(
        gl: &Arc<glow::Context>,
        vertices: &[V],
        indices: Option<&[u32]>,
        draw_mode: u32,
    ) -> Result<Self, String> {
        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = gl.create_buffer()?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, as_bytes(vertices), glow::STATIC_DRAW);

            let ebo = match indices {
                Some(indices) => {
                    let ebo = gl.create_buffer()?;
                    gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
                    gl.buffer_data_u8_slice(
                        glow::ELEMENT_ARRAY_BUFFER,
                        as_bytes(indices),
                        glow::STATIC_DRAW,
                    );
                    Some(ebo)
                }
                None => None,
            };

            V::vertex_attribs(gl);

            // The element buffer binding is part of the VAO state, so the VAO goes first.
            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);
            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, None);

            Ok(Self {
                gl: Arc::clone(gl),
                draw_mode,
                vao,
                vbo,
                ebo,
                count: indices.map_or(vertices.len(), <[u32]>::len),
            })
        }
    }

    /// Draws the mesh.
    pub fn draw(&self) {
        unsafe {
            self.gl.bind_vertex_array(Some(self.vao));
            if self.ebo.is_some() {
                self.gl
                    .draw_elements(self.draw_mode, self.count as i32, glow::UNSIGNED_INT, 0);
            } else {
                self.gl.draw_arrays(self.draw_mode, 0, self.count as i32);
            }
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_buffer(self.vbo);
            if let Some(ebo) = self.ebo {
                self.gl.delete_buffer(ebo);
            }
            self.gl.delete_vertex_array(self.vao);
        }
    }
}
