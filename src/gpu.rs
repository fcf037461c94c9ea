use crate::error::ResourceError;
use crate::shaders::UniformValue;

mod miniquad_gpu;
#[cfg(test)]
pub mod recording;

pub use miniquad_gpu::{Miniquad, MiniquadGpu};

/// A uniform location as resolved against one linked program.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct UniformLocation(pub u32);

/// The handle types a kind of gpu hands out. Kept apart from `Gpu` so that resources can outlive
/// the short borrow of a context that a `Gpu` implementation usually wraps.
pub trait Backend {
    type Program;
    type Quad;
    type Texture;
}

/// The handful of GPU operations the viewer needs. Everything above this trait is plain data and
/// logic, which lets it be driven by a real context or a recording one in tests.
pub trait Gpu<B: Backend> {
    /// Compile both stages and link them into a program.
    fn compile_program(&mut self, vertex: &str, fragment: &str) -> Result<B::Program, ResourceError>;

    /// Look up a uniform by name in a linked program. Names the program doesn't know resolve to
    /// `None`, never an error.
    fn resolve_uniform(&mut self, program: &B::Program, name: &str) -> Option<UniformLocation>;

    fn delete_program(&mut self, program: B::Program);

    /// Upload a triangle list of 2-float vertices.
    fn create_quad(&mut self, vertices: &[[f32; 2]]) -> B::Quad;

    fn delete_quad(&mut self, quad: B::Quad);

    /// Upload tightly packed RGBA8 rows, bottom row first.
    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> B::Texture;

    fn delete_texture(&mut self, texture: B::Texture);

    /// Start a frame by clearing the color and depth buffers.
    fn begin_frame(&mut self);

    fn use_program(&mut self, program: &B::Program);

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue);

    fn draw_quad(&mut self, quad: &B::Quad, vertex_count: usize);

    fn end_frame(&mut self);
}
