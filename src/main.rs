mod camera;
mod clock;
mod config;
mod error;
mod frame;
mod gpu;
mod input;
mod reload;
mod resources;
mod shaders;
mod texture;

use glam::Vec2;
use miniquad::{conf, date, Context, EventHandler, KeyCode, KeyMods, MouseButton};

use crate::clock::FixedTicker;
use crate::config::ViewerConfig;
use crate::frame::FrameDriver;
use crate::gpu::{Gpu, Miniquad, MiniquadGpu};
use crate::input::Direction;
use crate::reload::ShaderWatcher;

/// The oddly named 'Stage', which is actually just an event handler that forwards miniquad's
/// callbacks to the frame driver and camera.
pub struct Stage {
    config: ViewerConfig,
    driver: FrameDriver<Miniquad>,
    ticker: FixedTicker,
    watcher: ShaderWatcher,

    /// Set by `update` when the ticker fires, consumed by the next `draw`.
    tick_due: bool,
}

impl Stage {
    pub fn new(ctx: &mut Context, config: ViewerConfig) -> Stage {
        let mut driver = FrameDriver::new(config.tick_rate);

        // miniquad doesn't send a resize for the initial window size.
        let (width, height) = ctx.screen_size();
        driver.on_resize(width, height);

        let mut stage = Stage {
            ticker: FixedTicker::new(config.tick_interval()),
            watcher: ShaderWatcher::new(config.fragment_shader.clone(), config.reload_interval_ticks),
            driver,
            config,
            tick_due: false,
        };
        stage.init(ctx);
        stage
    }

    /// Build resources. If this fails the window stays blank until the shader is fixed.
    fn init(&mut self, ctx: &mut Context) {
        log::info!(":: Loading {}", self.config.fragment_shader.display());

        // Remember what we tried to load so the watcher only retries after an edit.
        if let Err(err) = self.watcher.read_now() {
            log::debug!("{err}");
        }

        let mut gpu = MiniquadGpu::new(ctx);
        if let Err(err) = self.driver.init(&mut gpu, &self.config.fragment_shader, self.config.images.as_slice()) {
            log::error!("Failed to build resources: {err}");
        }
    }

    fn apply_shader_source(&mut self, ctx: &mut Context, source: &str) {
        if !self.driver.is_running() {
            self.init(ctx);
            return;
        }

        let mut gpu = MiniquadGpu::new(ctx);
        match self.driver.reload_from_source(&mut gpu, source) {
            Ok(()) => log::info!(":: Reloaded {}", self.watcher.path().display()),
            Err(err) => log::error!("Shader reload failed, keeping the previous program: {err}"),
        }
    }

    /// Reload the fragment shader whether or not it changed.
    fn force_reload(&mut self, ctx: &mut Context) {
        if !self.driver.is_running() {
            self.init(ctx);
            return;
        }

        match self.watcher.read_now() {
            Ok(source) => self.apply_shader_source(ctx, &source),
            Err(err) => log::error!("Shader reload failed, keeping the previous program: {err}"),
        }
    }

    fn shutdown(&mut self, ctx: &mut Context) {
        let mut gpu = MiniquadGpu::new(ctx);
        self.driver.destroy(&mut gpu);
    }
}

impl EventHandler for Stage {
    fn update(&mut self, ctx: &mut Context) {
        if !self.ticker.poll(date::now()) {
            return;
        }
        self.tick_due = true;

        match self.watcher.tick() {
            Some(Ok(source)) => self.apply_shader_source(ctx, &source),
            Some(Err(err)) => log::warn!("{err}"),
            None => {},
        }
    }

    fn draw(&mut self, ctx: &mut Context) {
        let mut gpu = MiniquadGpu::new(ctx);

        let drawn = if std::mem::take(&mut self.tick_due) {
            self.driver.render_frame(&mut gpu)
        }
        else {
            self.driver.paint(&mut gpu)
        };

        // Without a program there is nothing to draw, but the frame still needs clearing.
        if !drawn {
            gpu.begin_frame();
            gpu.end_frame();
        }
    }

    fn resize_event(&mut self, _ctx: &mut Context, width: f32, height: f32) {
        self.driver.on_resize(width, height);
    }

    fn key_down_event(&mut self, ctx: &mut Context, keycode: KeyCode, _keymods: KeyMods, repeat: bool) {
        if !repeat {
            log::debug!("{keycode:?} pressed");
        }

        match keycode {
            KeyCode::Escape => {
                self.shutdown(ctx);
                ctx.quit();
            },
            KeyCode::F5 | KeyCode::R => {
                if !repeat {
                    self.force_reload(ctx);
                }
            },
            _ => {
                if let Some(direction) = Direction::from_keycode(keycode) {
                    self.driver.camera.on_key_down(direction);
                }
            },
        }
    }

    fn key_up_event(&mut self, _ctx: &mut Context, keycode: KeyCode, _keymods: KeyMods) {
        if let Some(direction) = Direction::from_keycode(keycode) {
            self.driver.camera.on_key_up(direction);
        }
    }

    fn mouse_button_down_event(&mut self, _ctx: &mut Context, button: MouseButton, x: f32, y: f32) {
        log::debug!("Mouse button pressed: {button:?}");
        let pos = Vec2::new(x, y);
        self.driver.mouse.position = pos;
        self.driver.mouse.button_down = true;
        self.driver.camera.on_mouse_down(pos);
    }

    fn mouse_button_up_event(&mut self, _ctx: &mut Context, button: MouseButton, _x: f32, _y: f32) {
        log::debug!("Mouse button released: {button:?}");
        self.driver.mouse.button_down = false;
        self.driver.camera.on_mouse_up();
    }

    fn mouse_motion_event(&mut self, _ctx: &mut Context, x: f32, y: f32) {
        let pos = Vec2::new(x, y);
        self.driver.mouse.position = pos;
        self.driver.camera.on_mouse_move(pos);
    }

    fn quit_requested_event(&mut self, ctx: &mut Context) {
        self.shutdown(ctx);
    }
}

fn main() {
    // Initialize logging.
    env_logger::init();

    let config = ViewerConfig::from_args(std::env::args().skip(1));
    log::info!("Starting with {config:?}");

    // Create window config.
    let conf = conf::Conf {
        window_title: config.window_title.clone(),
        window_width: config.window_width,
        window_height: config.window_height,
        ..Default::default()
    };

    miniquad::start(conf, move |ctx| {
        Box::new(Stage::new(ctx, config))
    });
}
