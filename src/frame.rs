use std::path::Path;

use crate::camera::CameraState;
use crate::clock::ClockState;
use crate::error::ResourceError;
use crate::gpu::{Backend, Gpu};
use crate::input::MouseState;
use crate::resources::{ResourceSet, QUAD_VERTICES};
use crate::shaders::{UniformSlot, UniformValue};

/// Where the driver is in its lifecycle. Frames are only drawn while `Running`.
pub enum DriverState<B: Backend> {
    Uninitialized,
    Running(ResourceSet<B>),
    Destroyed,
}

/// Owns everything that changes from frame to frame and turns it into uniforms and a draw call.
pub struct FrameDriver<B: Backend> {
    state: DriverState<B>,
    pub camera: CameraState,
    pub mouse: MouseState,
    clock: ClockState,
    aspect_ratio: f32,
}

impl<B: Backend> FrameDriver<B> {
    pub fn new(tick_rate: u32) -> Self {
        Self {
            state: DriverState::Uninitialized,
            camera: CameraState::new(),
            mouse: MouseState::default(),
            clock: ClockState::new(tick_rate),
            aspect_ratio: 1.0,
        }
    }

    /// Build resources from disk. On failure the driver stays uninitialized and the error is
    /// handed back for reporting.
    pub fn init<G: Gpu<B>, P: AsRef<Path>>(&mut self, gpu: &mut G, fragment_path: &Path, image_paths: &[P]) -> Result<(), ResourceError> {
        if !matches!(self.state, DriverState::Uninitialized) {
            log::warn!("Ignoring init, resources already built or destroyed");
            return Ok(());
        }

        let resources = ResourceSet::build(gpu, fragment_path, image_paths)?;
        self.attach(resources);
        Ok(())
    }

    /// Start running with an already built resource set.
    pub fn attach(&mut self, resources: ResourceSet<B>) {
        log::info!(":: Resources ready, {} texture(s)", resources.texture_count());
        self.state = DriverState::Running(resources);
    }

    pub fn state(&self) -> &DriverState<B> {
        &self.state
    }

    pub fn is_running(&self) -> bool {
        matches!(self.state, DriverState::Running(_))
    }

    pub fn clock(&self) -> &ClockState {
        &self.clock
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Recompute the aspect ratio. A zero height gives a non-finite ratio, which is passed on to
    /// the shader as-is.
    pub fn on_resize(&mut self, width: f32, height: f32) {
        self.aspect_ratio = width / height;
    }

    /// Re-read and replace the fragment shader. A failed reload keeps the current program.
    pub fn reload<G: Gpu<B>>(&mut self, gpu: &mut G, fragment_path: &Path) -> Result<(), ResourceError> {
        match &mut self.state {
            DriverState::Running(resources) => resources.reload(gpu, fragment_path),
            _ => {
                log::warn!("Ignoring shader reload, no resources to reload");
                Ok(())
            },
        }
    }

    /// Replace the fragment shader. A failed reload keeps the current program.
    pub fn reload_from_source<G: Gpu<B>>(&mut self, gpu: &mut G, fragment: &str) -> Result<(), ResourceError> {
        match &mut self.state {
            DriverState::Running(resources) => resources.reload_from_source(gpu, fragment),
            _ => {
                log::warn!("Ignoring shader reload, no resources to reload");
                Ok(())
            },
        }
    }

    /// Advance one tick and draw. Returns false, without touching the gpu, if the driver isn't
    /// running.
    pub fn render_frame<G: Gpu<B>>(&mut self, gpu: &mut G) -> bool {
        if !self.is_running() {
            return false;
        }

        self.camera.tick();
        self.clock.advance();
        self.paint(gpu)
    }

    /// Draw the current state without advancing time or moving the camera.
    pub fn paint<G: Gpu<B>>(&mut self, gpu: &mut G) -> bool {
        let DriverState::Running(resources) = &self.state else {
            return false;
        };

        let view = self.camera.view_matrix();

        gpu.begin_frame();

        let program = resources.program();
        gpu.use_program(program.handle());

        program.write(gpu, UniformSlot::AspectRatio, UniformValue::Float(self.aspect_ratio));
        program.write(gpu, UniformSlot::Time, UniformValue::Float(self.clock.seconds()));
        program.write(gpu, UniformSlot::View, UniformValue::Mat4(view.to_cols_array()));
        program.write(gpu, UniformSlot::Tex0, UniformValue::Int(0));
        program.write(gpu, UniformSlot::Tex1, UniformValue::Int(1));
        program.write(gpu, UniformSlot::MousePos, UniformValue::Vec2(self.mouse.position.to_array()));
        program.write(gpu, UniformSlot::MouseClicked, UniformValue::Int(self.mouse.button_down as i32));

        // Textures are uploaded at init but not bound here, so the samplers read whatever is
        // bound to units 0 and 1.
        gpu.draw_quad(resources.quad(), QUAD_VERTICES.len());

        gpu.end_frame();
        true
    }

    /// Release all GPU resources. Later frames are refused.
    pub fn destroy<G: Gpu<B>>(&mut self, gpu: &mut G) {
        match std::mem::replace(&mut self.state, DriverState::Destroyed) {
            DriverState::Running(resources) => {
                log::info!(":: Releasing GPU resources after {} ticks", self.clock.ticks());
                resources.destroy(gpu);
            },
            DriverState::Uninitialized => {},
            DriverState::Destroyed => log::debug!("Resources already released"),
        }
    }
}
