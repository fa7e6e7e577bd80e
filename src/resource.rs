//! Owned GL object names.
//!
//! Each handle keeps the shared [`glow::Context`] alive and deletes its name on drop, so GL
//! objects are released before the context that created them.

use std::rc::Rc;

use anyhow::anyhow;
use glow::HasContext;

#[derive(Debug)]
pub struct VertexArray {
    gl: Rc<glow::Context>,
    name: glow::VertexArray,
}
impl VertexArray {
    pub fn new(gl: &Rc<glow::Context>) -> anyhow::Result<Self> {
        let name = unsafe { gl.create_vertex_array() }.map_err(|e| anyhow!(e))?;
        Ok(Self {
            gl: Rc::clone(gl),
            name,
        })
    }

    pub fn bind(&self) -> VertexArrayBinding<'_> {
        unsafe { self.gl.bind_vertex_array(Some(self.name)) };
        VertexArrayBinding { vertex_array: self }
    }
}
impl Drop for VertexArray {
    fn drop(&mut self) {
        tracing::debug!(name = ?self.name, "delete vertex array");
        unsafe { self.gl.delete_vertex_array(self.name) };
    }
}

/// Unbinds the vertex array when dropped.
#[derive(Debug)]
pub struct VertexArrayBinding<'a> {
    vertex_array: &'a VertexArray,
}
impl Drop for VertexArrayBinding<'_> {
    fn drop(&mut self) {
        unsafe { self.vertex_array.gl.bind_vertex_array(None) };
    }
}

#[derive(Debug)]
pub struct VertexBuffer {
    gl: Rc<glow::Context>,
    name: glow::Buffer,
    len: usize,
}
impl VertexBuffer {
    /// Uploads `contents` into a new `ARRAY_BUFFER` with static usage.
    ///
    /// The buffer stays bound to `ARRAY_BUFFER`, so a vertex array bound by the caller picks it
    /// up for the following attribute declarations.
    pub fn new_static(gl: &Rc<glow::Context>, contents: &[u8]) -> anyhow::Result<Self> {
        let name = unsafe { gl.create_buffer() }.map_err(|e| anyhow!(e))?;
        unsafe {
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(name));
            gl.buffer_data_u8_slice(glow::ARRAY_BUFFER, contents, glow::STATIC_DRAW);
        }
        Ok(Self {
            gl: Rc::clone(gl),
            name,
            len: contents.len(),
        })
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}
impl Drop for VertexBuffer {
    fn drop(&mut self) {
        tracing::debug!(name = ?self.name, "delete vertex buffer");
        unsafe { self.gl.delete_buffer(self.name) };
    }
}

#[derive(Debug)]
pub struct ShaderProgram {
    gl: Rc<glow::Context>,
    name: glow::Program,
}
impl ShaderProgram {
    pub fn new(gl: &Rc<glow::Context>) -> anyhow::Result<Self> {
        let name = unsafe { gl.create_program() }.map_err(|e| anyhow!(e))?;
        Ok(Self {
            gl: Rc::clone(gl),
            name,
        })
    }

    pub fn name(&self) -> glow::Program {
        self.name
    }

    pub fn activate(&self) -> ActiveProgram<'_> {
        unsafe { self.gl.use_program(Some(self.name)) };
        ActiveProgram { program: self }
    }
}
impl Drop for ShaderProgram {
    fn drop(&mut self) {
        tracing::debug!(name = ?self.name, "delete shader program");
        unsafe { self.gl.delete_program(self.name) };
    }
}

/// Deactivates the program when dropped.
#[derive(Debug)]
pub struct ActiveProgram<'a> {
    program: &'a ShaderProgram,
}
impl Drop for ActiveProgram<'_> {
    fn drop(&mut self) {
        unsafe { self.program.gl.use_program(None) };
    }
}

/// A shader object that only lives until its program is linked.
#[derive(Debug)]
pub struct ShaderObject {
    gl: Rc<glow::Context>,
    name: glow::Shader,
}
impl ShaderObject {
    pub fn new(gl: &Rc<glow::Context>, shader_type: u32) -> anyhow::Result<Self> {
        let name = unsafe { gl.create_shader(shader_type) }.map_err(|e| anyhow!(e))?;
        Ok(Self {
            gl: Rc::clone(gl),
            name,
        })
    }

    pub fn name(&self) -> glow::Shader {
        self.name
    }
}
impl Drop for ShaderObject {
    fn drop(&mut self) {
        unsafe { self.gl.delete_shader(self.name) };
    }
}
