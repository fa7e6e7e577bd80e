use bytemuck_derive::{Pod, Zeroable};
use glow::HasContext;

use crate::{
    config::{FRAME_CLEAR_COLOR, SETUP_CLEAR_COLOR},
    resource::{ShaderProgram, VertexArray, VertexBuffer},
    shader::load_shaders,
    view::{Draw, DrawArgs, InitArgs},
};

const VERTEX_SHADER: &str = include_str!("triangle.vert");
const FRAGMENT_SHADER: &str = include_str!("triangle.frag");

/// NDC positions of the one triangle
pub const VERTICES: [Vertex; 3] = [
    Vertex {
        position: [0., 0., 0.],
    },
    Vertex {
        position: [1., 0., 0.],
    },
    Vertex {
        position: [0., 1., 0.],
    },
];

#[derive(Debug)]
pub struct DrawTriangle {
    pipeline: Option<Pipeline>,
}
impl DrawTriangle {
    pub fn new() -> Self {
        Self { pipeline: None }
    }
}
impl Default for DrawTriangle {
    fn default() -> Self {
        Self::new()
    }
}
impl Draw for DrawTriangle {
    fn init(&mut self, args: InitArgs<'_>) -> anyhow::Result<()> {
        self.pipeline = Some(Pipeline::new(args)?);
        Ok(())
    }

    fn draw(&mut self, args: DrawArgs<'_>) {
        let Some(pipeline) = self.pipeline.as_ref() else {
            return;
        };
        pipeline.draw(args);
    }
}

#[derive(Debug)]
struct Pipeline {
    program: Option<ShaderProgram>,
    vertex_array: VertexArray,
    _vertex_buffer: VertexBuffer,
}
impl Pipeline {
    pub fn new(args: InitArgs<'_>) -> anyhow::Result<Self> {
        let size = args.wnd_size;
        unsafe { args.gl.viewport(0, 0, size.width as i32, size.height as i32) };

        let vertex_array = VertexArray::new(args.gl)?;
        let vertex_buffer = {
            let _binding = vertex_array.bind();
            let vertex_buffer =
                VertexBuffer::new_static(args.gl, bytemuck::cast_slice(&VERTICES))?;
            unsafe { VertexLayout::position().declare(args.gl) };
            vertex_buffer
        };
        tracing::info!(bytes = vertex_buffer.len(), "vertex buffer uploaded");

        // A broken program leaves the frame cleared but empty.
        let program = match load_shaders(args.gl, VERTEX_SHADER, FRAGMENT_SHADER) {
            Ok(program) => Some(program),
            Err(e) => {
                tracing::error!("{e:#}");
                None
            }
        };

        unsafe { SETUP_CLEAR_COLOR.apply(args.gl) };
        Ok(Self {
            program,
            vertex_array,
            _vertex_buffer: vertex_buffer,
        })
    }

    pub fn draw(&self, args: DrawArgs<'_>) {
        unsafe {
            FRAME_CLEAR_COLOR.apply(args.gl);
            args.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }
        let Some(program) = self.program.as_ref() else {
            return;
        };
        let _program = program.activate();
        let _binding = self.vertex_array.bind();
        unsafe { args.gl.draw_arrays(glow::TRIANGLES, 0, VERTICES.len() as i32) };
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    pub position: [f32; 3],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VertexLayout {
    pub location: u32,
    pub components: i32,
    pub data_type: u32,
    pub normalized: bool,
    pub stride: i32,
    pub offset: i32,
}
impl VertexLayout {
    pub fn position() -> Self {
        Self {
            location: 0,
            components: 3,
            data_type: glow::FLOAT,
            normalized: false,
            stride: core::mem::size_of::<Vertex>() as i32,
            offset: core::mem::offset_of!(Vertex, position) as i32,
        }
    }

    /// # Safety
    ///
    /// A vertex array and the source `ARRAY_BUFFER` must be bound on a current context.
    unsafe fn declare(&self, gl: &glow::Context) {
        gl.vertex_attrib_pointer_f32(
            self.location,
            self.components,
            self.data_type,
            self.normalized,
            self.stride,
            self.offset,
        );
        gl.enable_vertex_attrib_array(self.location);
    }
}
