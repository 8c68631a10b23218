//! Multi-window demo application
//!
//! Opens every window listed in the configuration (two by default), clears
//! each one to its own colour every frame and exits once all are closed.
//!
//! Usage: `window_app [config.toml|config.ron]`

use gl_window::foundation::logging;
use gl_window::prelude::*;

const CLEAR_COLORS: [[f32; 4]; 3] = [
    [0.2, 0.3, 0.3, 1.0],
    [1.0, 0.5, 0.0, 0.5],
    [0.5, 0.5, 0.9, 1.0],
];

fn load_config() -> Result<AppConfig, Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::load_from_file(&path)?,
        None => AppConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

fn open_window(
    subsystem: &SharedSubsystem<GlfwBackend>,
    config: &WindowConfig,
    color: [f32; 4],
) -> WindowResult<Window<GlfwBackend>> {
    let width = i32::try_from(config.width).unwrap_or(i32::MAX);
    let height = i32::try_from(config.height).unwrap_or(i32::MAX);
    let title = config.title.clone();
    let closing = config.title.clone();

    WindowBuilder::from_config(config)
        .on_create(move || {
            logging::info!("Context ready for '{title}'");
            // SAFETY: the window's context is current and its functions are loaded
            unsafe {
                gl::Viewport(0, 0, width, height);
            }
        })
        .on_render(move || {
            let [r, g, b, a] = color;
            // SAFETY: the window's context is current and its functions are loaded
            unsafe {
                gl::ClearColor(r, g, b, a);
                gl::Clear(gl::COLOR_BUFFER_BIT);
            }
        })
        .on_destroy(move || logging::info!("Releasing '{closing}'"))
        .build(subsystem)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config()?;
    if logging::init_with_level(&config.log_level).is_err() {
        eprintln!("Logger already installed");
    }

    let subsystem = Subsystem::shared(GlfwBackend::new(), config.context.clone());

    let mut windows = Vec::with_capacity(config.windows.len());
    for (index, window_config) in config.windows.iter().enumerate() {
        let color = CLEAR_COLORS[index % CLEAR_COLORS.len()];
        match open_window(&subsystem, window_config, color) {
            Ok(window) => windows.push(window),
            Err(e) => logging::error!("Window failure for '{}': {e}", window_config.title),
        }
    }

    if let Err(e) = gl_window::driver::run(&subsystem, &mut windows) {
        logging::error!("Window failure: {e}");
        return Err(e.into());
    }

    Ok(())
}
