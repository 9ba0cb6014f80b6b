use std::path::PathBuf;

use orbit_core::config::Config;
use sdl2::event::{Event, WindowEvent};

use crate::{
    abs::*,
    error::OrbitError,
    frame::FramePump,
    render::scene::SceneRenderer,
};

mod abs;
mod error;
mod frame;
mod logging;
mod render;

fn main() {
    let explicit = std::env::args_os().nth(1).map(PathBuf::from);
    let config = match Config::resolve(explicit.as_deref()) {
        Ok(config) => config,
        Err(err) => {
            if let Err(log_err) = logging::init_logging("info") {
                eprintln!("Failed to initialize logging: {log_err}");
            }
            fatal(&err.into());
        }
    };

    if let Err(err) = logging::init_logging(&config.log_level) {
        eprintln!("Failed to initialize logging: {err}");
    }

    if let Err(err) = run(&config) {
        fatal(&err);
    }
}

/// Reports an initialization failure and exits.
fn fatal(err: &OrbitError) -> ! {
    log::error!("{err}");
    if let Err(e) = sdl2::messagebox::show_simple_message_box(
        sdl2::messagebox::MessageBoxFlag::ERROR,
        "Orbit View",
        &err.to_string(),
        None::<&sdl2::video::Window>,
    ) {
        log::warn!("Could not show error dialog: {e}");
    }
    std::process::exit(1);
}

fn run(config: &Config) -> Result<(), OrbitError> {
    let mut app = App::new(&config.window.title, config.window.width, config.window.height)?;
    let loader = TextureLoader::new(&app.gl)?;
    let mut scene = SceneRenderer::new(&app.gl, &loader, config, app.drawable_size())?;
    let pump = FramePump::start();

    'running: loop {
        let mut resized = false;
        for event in app.event_pump.poll_iter() {
            match event {
                Event::Quit { .. } => break 'running,
                Event::Window {
                    win_event: WindowEvent::Resized(..),
                    ..
                } => resized = true,
                _ => {}
            }
        }

        // A resize rebuilds every GPU resource instead of adjusting in place.
        if resized {
            let size = app.drawable_size();
            log::info!("Surface resized to {}x{}, reinitializing", size.0, size.1);
            drop(scene);
            scene = SceneRenderer::new(&app.gl, &loader, config, size)?;
        }

        scene.render(pump.tick());
        app.window.gl_swap_window();
    }

    Ok(())
}
