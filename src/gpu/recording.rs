//! A `Gpu` that records every call instead of talking to a driver, for tests.

use std::collections::HashMap;

use super::{Backend, Gpu, UniformLocation};
use crate::error::{ResourceError, ShaderStage};
use crate::shaders::UniformValue;

#[derive(Clone, Debug, PartialEq)]
pub enum GpuCall {
    CompileProgram(u32),
    DeleteProgram(u32),
    CreateQuad { id: u32, vertices: Vec<[f32; 2]> },
    DeleteQuad(u32),
    CreateTexture { id: u32, width: u32, height: u32, rgba: Vec<u8> },
    DeleteTexture(u32),
    BeginFrame,
    UseProgram(u32),
    SetUniform(UniformLocation, UniformValue),
    DrawQuad { id: u32, vertex_count: usize },
    EndFrame,
}

/// Handle type for every object the recording gpu hands out.
#[derive(Debug, PartialEq, Eq)]
pub struct Handle(pub u32);

/// Records calls in order. A fragment source containing `#error` fails to compile, and a linked
/// program knows exactly the uniforms its sources declare with a `uniform <type> <name>;` line.
#[derive(Default)]
pub struct RecordingGpu {
    pub calls: Vec<GpuCall>,
    next_id: u32,
    program_uniforms: HashMap<u32, Vec<String>>,
}

impl RecordingGpu {
    pub fn new() -> Self {
        Self::default()
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }

    /// The number of recorded calls matching the predicate.
    pub fn count(&self, f: impl Fn(&GpuCall) -> bool) -> usize {
        self.calls.iter().filter(|call| f(call)).count()
    }

    /// Every uniform write recorded so far.
    pub fn uniform_writes(&self) -> Vec<(UniformLocation, UniformValue)> {
        self.calls.iter().filter_map(|call| match call {
            GpuCall::SetUniform(location, value) => Some((*location, *value)),
            _ => None,
        }).collect()
    }

    fn declared_uniforms(source: &str) -> Vec<String> {
        source.lines()
            .map(str::trim)
            .filter(|line| line.starts_with("uniform "))
            .filter_map(|line| line.trim_end_matches(';').split_whitespace().last())
            .map(str::to_owned)
            .collect()
    }
}

impl Backend for RecordingGpu {
    type Program = Handle;
    type Quad = Handle;
    type Texture = Handle;
}

impl Gpu<RecordingGpu> for RecordingGpu {
    fn compile_program(&mut self, vertex: &str, fragment: &str) -> Result<Handle, ResourceError> {
        if fragment.contains("#error") {
            return Err(ResourceError::Compile {
                stage: ShaderStage::Fragment,
                log: "0:1: '#error' : user error".to_owned(),
            });
        }

        let id = self.next_id();
        let mut uniforms = Self::declared_uniforms(vertex);
        uniforms.extend(Self::declared_uniforms(fragment));
        self.program_uniforms.insert(id, uniforms);
        self.calls.push(GpuCall::CompileProgram(id));
        Ok(Handle(id))
    }

    fn resolve_uniform(&mut self, program: &Handle, name: &str) -> Option<UniformLocation> {
        self.program_uniforms.get(&program.0)?
            .iter()
            .position(|declared| declared == name)
            .map(|index| UniformLocation(index as u32))
    }

    fn delete_program(&mut self, program: Handle) {
        self.program_uniforms.remove(&program.0);
        self.calls.push(GpuCall::DeleteProgram(program.0));
    }

    fn create_quad(&mut self, vertices: &[[f32; 2]]) -> Handle {
        let id = self.next_id();
        self.calls.push(GpuCall::CreateQuad { id, vertices: vertices.to_vec() });
        Handle(id)
    }

    fn delete_quad(&mut self, quad: Handle) {
        self.calls.push(GpuCall::DeleteQuad(quad.0));
    }

    fn create_texture(&mut self, width: u32, height: u32, rgba: &[u8]) -> Handle {
        let id = self.next_id();
        self.calls.push(GpuCall::CreateTexture { id, width, height, rgba: rgba.to_vec() });
        Handle(id)
    }

    fn delete_texture(&mut self, texture: Handle) {
        self.calls.push(GpuCall::DeleteTexture(texture.0));
    }

    fn begin_frame(&mut self) {
        self.calls.push(GpuCall::BeginFrame);
    }

    fn use_program(&mut self, program: &Handle) {
        self.calls.push(GpuCall::UseProgram(program.0));
    }

    fn set_uniform(&mut self, location: UniformLocation, value: UniformValue) {
        self.calls.push(GpuCall::SetUniform(location, value));
    }

    fn draw_quad(&mut self, quad: &Handle, vertex_count: usize) {
        self.calls.push(GpuCall::DrawQuad { id: quad.0, vertex_count });
    }

    fn end_frame(&mut self) {
        self.calls.push(GpuCall::EndFrame);
    }
}
