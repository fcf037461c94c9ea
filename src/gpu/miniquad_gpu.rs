use miniquad::{
    Bindings, Buffer, BufferLayout, BufferType, Context, FilterMode, PassAction, Pipeline, Shader,
    ShaderError, ShaderType, Texture, TextureFormat, TextureParams, TextureWrap, VertexAttribute,
    VertexFormat,
};

use super::{Backend, Gpu, UniformLocation};
use crate::error::{ResourceError, ShaderStage};
use crate::shaders::{quad, UniformSlot, UniformValue};

/// A linked viewer program. miniquad pairs shaders with their vertex layout in a pipeline, so that
/// is what we hold on to.
pub struct MiniquadProgram {
    pipeline: Pipeline,
}

/// A `Gpu` backed by a miniquad context. Uniform writes are staged in a CPU-side block and
/// uploaded in one go when the quad is drawn, which is how miniquad wants uniforms applied.
pub struct MiniquadGpu<'a> {
    ctx: &'a mut Context,
    uniforms: quad::Uniforms,
}

impl<'a> MiniquadGpu<'a> {
    pub fn new(ctx: &'a mut Context) -> Self {
        Self {
            ctx,
            uniforms: Default::default(),
        }
    }
}

impl From<ShaderError> for ResourceError {
    fn from(err: ShaderError) -> Self {
        match err {
            ShaderError::CompilationError { shader_type, error_message } => ResourceError::Compile {
                stage: match shader_type {
                    ShaderType::Vertex => ShaderStage::Vertex,
                    ShaderType::Fragment => ShaderStage::Fragment,
                },
                log: error_message,
            },
            ShaderError::LinkError(log) => ResourceError::Link(log),
            other => ResourceError::Link(format!("{other:?}")),
        }
    }
}

/// Handle types for miniquad.
pub struct Miniquad;

impl Backend for Miniquad {
    type Program = MiniquadProgram;
    type Quad = Bindings;
    type Texture = Texture;
}

impl<'a> Gpu<Miniquad> for MiniquadGpu<'a> {
    fn compile_program(&mut self, vertex: &str, fragment: &str) -> Result<MiniquadProgram, ResourceError> {
        let shader = Shader::new(self.ctx, vertex, fragment, quad::meta())?;

        let pipeline = Pipeline::new(
            self.ctx,
            &[BufferLayout::default()],
            &[VertexAttribute::new(quad::POSITION_ATTRIBUTE, VertexFormat::Float2)],
            shader,
        );

        Ok(MiniquadProgram { pipeline })
    }

    fn resolve_uniform(&mut self, _program: &MiniquadProgram, name: &str) -> Option<UniformLocation> {
        // Every known slot is part of the uniform block. miniquad itself skips block members the
        // linked program doesn't actually use.
        UniformSlot::from_name(name).map(|slot| UniformLocation(slot.index() as u32))
    }

    fn delete_program(&mut self, _program: MiniquadProgram) {
        // miniquad 0.3 keeps shaders and pipelines alive for the lifetime of the context.
        log::debug!("Dropping shader program handle");
    }

    fn create_quad(&mut self, vertices: &[[f32; 2]]) -> Bindings {
        let vertex_buffer = Buffer::immutable(self.ctx, BufferType::VertexBuffer, vertices);

        let indices: Vec<u16> = (0..vertices.len() as u16).collect();
        let index_buffer = Buffer::immutable(self.ctx, BufferType::IndexBuffer, &indices);

        Bindings {
            vertex_buffers: vec![vertex_buffer],
            index_buffer,
            images: Vec::new(),
        }
    }

    fn delete_quad(&mut self, quad: Bindings) {
        for buffer in &quad.vertex_buffers {
            buffer.delete();
        }
        quad.index_buffer.delete();
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Texture {
        Texture::from_data_and_format(
            self.ctx,
            rgba,
            TextureParams {
                width,
                height,
                format: TextureFormat::RGBA8,
                wrap: TextureWrap::Mirror,
                filter: FilterMode::Linear,
            })
    }

    fn delete_texture(&mut self, texture: Texture) {
        texture.delete();
    }

    fn begin_frame(&mut self) {
        self.ctx.begin_default_pass(PassAction::clear_color(0.0, 0.0, 0.0, 1.0));
    }

    fn use_program(&mut self, program: &MiniquadProgram) {
        self.ctx.apply_pipeline(&program.pipeline);
        self.uniforms = Default::default();
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        match UniformSlot::from_index(location.0 as usize) {
            Some(slot) => {
                if !self.uniforms.set(slot, value) {
                    log::warn!("Ignoring {value:?} written to uniform {}", slot.name());
                }
            },
            None => log::warn!("Ignoring write to unknown uniform location {location:?}"),
        }
    }

    fn draw_quad(&mut self, quad: &Bindings, vertex_count: usize) {
        self.ctx.apply_bindings(quad);
        self.ctx.apply_uniforms(&self.uniforms);
        self.ctx.draw(0, vertex_count as i32, 1);
    }

    fn end_frame(&mut self) {
        self.ctx.end_render_pass();
        self.ctx.commit_frame();
    }
}
