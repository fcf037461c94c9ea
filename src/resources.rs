use std::fs;
use std::path::Path;

use crate::error::ResourceError;
use crate::gpu::{Backend, Gpu, UniformLocation};
use crate::shaders::{quad, UniformSlot, UniformValue};
use crate::texture::{image_to_linear_bytes, ArgbImage};

/// The unit square as two triangles.
pub const QUAD_VERTICES: [[f32; 2]; 6] = [
    [0.0, 0.0],
    [0.0, 1.0],
    [1.0, 1.0],
    [0.0, 0.0],
    [1.0, 0.0],
    [1.0, 1.0],
];

/// A linked program together with the locations of every uniform slot, resolved once at link time.
pub struct ShaderProgram<B: Backend> {
    handle: B::Program,
    locations: [Option<UniformLocation>; UniformSlot::COUNT],
}

impl<B: Backend> ShaderProgram<B> {
    /// Compile the fixed vertex stage with `fragment` and resolve the uniform slots.
    pub fn compile<G: Gpu<B>>(gpu: &mut G, fragment: &str) -> Result<Self, ResourceError> {
        let handle = gpu.compile_program(quad::VERTEX, fragment)?;

        let mut locations = [None; UniformSlot::COUNT];
        for slot in UniformSlot::ALL {
            locations[slot.index()] = gpu.resolve_uniform(&handle, slot.name());
            if locations[slot.index()].is_none() {
                log::debug!("Uniform {} is not used by the fragment shader", slot.name());
            }
        }

        Ok(Self { handle, locations })
    }

    pub fn handle(&self) -> &B::Program {
        &self.handle
    }

    pub fn location(&self, slot: UniformSlot) -> Option<UniformLocation> {
        self.locations[slot.index()]
    }

    /// Write a uniform. Slots the program doesn't use are skipped without touching the gpu.
    pub fn write<G: Gpu<B>>(&self, gpu: &mut G, slot: UniformSlot, value: UniformValue) {
        if let Some(location) = self.location(slot) {
            gpu.set_uniform(location, value);
        }
    }
}

/// Read a shader source file.
pub fn read_shader(path: &Path) -> Result<String, ResourceError> {
    fs::read_to_string(path).map_err(|source| ResourceError::ShaderRead {
        path: path.to_owned(),
        source,
    })
}

/// All GPU objects the viewer owns: the shader program, the quad, and the textures.
pub struct ResourceSet<B: Backend> {
    program: ShaderProgram<B>,
    quad: B::Quad,
    textures: Vec<B::Texture>,
}

impl<B: Backend> ResourceSet<B> {
    /// Load the fragment shader and images from disk and build everything. Nothing is uploaded
    /// unless every file could be read.
    pub fn build<G: Gpu<B>, P: AsRef<Path>>(gpu: &mut G, fragment_path: &Path, image_paths: &[P]) -> Result<Self, ResourceError> {
        let fragment = read_shader(fragment_path)?;

        let images = image_paths.iter()
            .map(|path| ArgbImage::load(path.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;

        Self::build_from_sources(gpu, &fragment, &images)
    }

    /// Build from an already loaded fragment source and decoded images. Image `i` goes in
    /// texture unit `i`.
    pub fn build_from_sources<G: Gpu<B>>(gpu: &mut G, fragment: &str, images: &[ArgbImage]) -> Result<Self, ResourceError> {
        let program = ShaderProgram::compile(gpu, fragment)?;

        let quad = gpu.create_quad(&QUAD_VERTICES);

        let textures = images.iter().map(|image| {
            log::debug!("Uploading {}x{} texture", image.width, image.height);
            gpu.create_texture(image.width, image.height, &image_to_linear_bytes(image))
        }).collect();

        Ok(Self { program, quad, textures })
    }

    /// Swap in a new fragment shader read from `fragment_path`.
    pub fn reload<G: Gpu<B>>(&mut self, gpu: &mut G, fragment_path: &Path) -> Result<(), ResourceError> {
        let fragment = read_shader(fragment_path)?;
        self.reload_from_source(gpu, &fragment)
    }

    /// Recompile against the same vertex stage and relink. The old program is only released once
    /// the new one linked, so a broken shader leaves the working one in place.
    pub fn reload_from_source<G: Gpu<B>>(&mut self, gpu: &mut G, fragment: &str) -> Result<(), ResourceError> {
        let program = ShaderProgram::compile(gpu, fragment)?;
        let old = std::mem::replace(&mut self.program, program);
        gpu.delete_program(old.handle);
        Ok(())
    }

    pub fn program(&self) -> &ShaderProgram<B> {
        &self.program
    }

    pub fn quad(&self) -> &B::Quad {
        &self.quad
    }

    pub fn texture_count(&self) -> usize {
        self.textures.len()
    }

    /// Release every GPU object. Consumes the set, so this can only happen once.
    pub fn destroy<G: Gpu<B>>(self, gpu: &mut G) {
        for texture in self.textures {
            gpu.delete_texture(texture);
        }
        gpu.delete_quad(self.quad);
        gpu.delete_program(self.program.handle);
    }
}
