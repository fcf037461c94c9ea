use std::path::PathBuf;

/// The window title.
const WINDOW_TITLE: &str = "Quad View";

/// The window width.
const WINDOW_WIDTH: i32 = 800;

/// The window height.
const WINDOW_HEIGHT: i32 = 600;

/// Ticks per second. Game time and camera movement advance once per tick.
const TICK_RATE: u32 = 60;

/// How many ticks between checks of the fragment shader file for edits.
const RELOAD_INTERVAL_TICKS: u32 = 60;

/// The fragment shader used when none is given on the command line.
const DEFAULT_FRAGMENT_SHADER: &str = "assets/shaders/fragshader.glsl";

/// Viewer settings. Defaults come from the constants above, and the fragment shader and images
/// can be overridden with positional arguments: `quadview [FRAGMENT_SHADER] [IMAGE...]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ViewerConfig {
    pub window_title: String,
    pub window_width: i32,
    pub window_height: i32,
    pub tick_rate: u32,
    pub reload_interval_ticks: u32,
    pub fragment_shader: PathBuf,
    pub images: Vec<PathBuf>,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window_title: WINDOW_TITLE.to_owned(),
            window_width: WINDOW_WIDTH,
            window_height: WINDOW_HEIGHT,
            tick_rate: TICK_RATE,
            reload_interval_ticks: RELOAD_INTERVAL_TICKS,
            fragment_shader: PathBuf::from(DEFAULT_FRAGMENT_SHADER),
            images: Vec::new(),
        }
    }
}

impl ViewerConfig {
    /// Build a config from process arguments, not including the program name.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Self {
        let mut config = Self::default();
        let mut args = args.into_iter();

        if let Some(fragment_shader) = args.next() {
            config.fragment_shader = PathBuf::from(fragment_shader);
        }
        config.images = args.map(PathBuf::from).collect();

        config
    }

    /// The length of one tick in seconds.
    pub fn tick_interval(&self) -> f64 {
        1.0 / self.tick_rate.max(1) as f64
    }
}
