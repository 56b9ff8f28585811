use std::time::Instant;

use glow::HasContext;

use crate::{
    abs::App,
    other::{InputState, UpdateContext},
    scenes::{SceneKind, SceneManager},
    settings::Settings,
};

mod abs;
mod other;
mod render;
mod scenes;
mod settings;

/// Environment variable that overrides the configured log level.
const LOG_ENV: &str = "CRAWLER_LOG";

fn setup_logger(level: log::LevelFilter) -> Result<(), fern::InitError> {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(level);

    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(std::io::stdout())
        .apply()?;
    Ok(())
}

fn main() {
    let (settings, warning) = Settings::load();
    if let Err(e) = setup_logger(settings.log_filter()) {
        eprintln!("Failed to set up logging: {e}");
    }
    if let Some(warning) = warning {
        log::warn!("{warning}");
    }

    let kind = SceneKind::from_args(std::env::args().skip(1));

    let mut app = match App::new(
        kind.title(),
        settings.window_width,
        settings.window_height,
        settings.fullscreen,
    ) {
        Ok(app) => app,
        Err(e) => {
            log::error!("Failed to create window: {e}");
            std::process::exit(1);
        }
    };

    unsafe {
        app.gl.enable(glow::DEPTH_TEST);
        app.gl.depth_func(glow::LESS);
    }
    app.sdl.mouse().set_relative_mouse_mode(true);

    let (width, height) = app.size();
    unsafe {
        app.gl.viewport(0, 0, width as i32, height as i32);
    }

    let scene = match kind.build(&app.gl, &settings, (width, height)) {
        Ok(scene) => scene,
        Err(e) => {
            log::error!("Failed to set up the {kind:?} scene: {e}");
            std::process::exit(1);
        }
    };
    log::info!("Running the {kind:?} scene");
    let mut scene_manager = SceneManager::new(scene);

    let mut input = InputState::default();
    let start = Instant::now();
    let mut last_frame_time = start;

    'running: loop {
        let now = Instant::now();
        let delta_time = now.duration_since(last_frame_time).as_secs_f32();
        last_frame_time = now;

        input.begin_frame();
        for event in app.event_pump.poll_iter() {
            input.handle_event(&event);
            scene_manager.handle_event(&event);
            match event {
                sdl2::event::Event::Quit { .. } => break 'running,
                sdl2::event::Event::Window {
                    win_event: sdl2::event::WindowEvent::SizeChanged(..),
                    ..
                } => {
                    let (width, height) = app.window.drawable_size();
                    unsafe {
                        app.gl.viewport(0, 0, width as i32, height as i32);
                    }
                    scene_manager.resize(width, height);
                }
                _ => {}
            }
        }

        let update_ctx =
            UpdateContext::new(&input, delta_time, now.duration_since(start).as_secs_f32());
        if !scene_manager.update(&update_ctx) {
            break 'running;
        }

        scene_manager.render(&app.gl);
        app.window.gl_swap_window();
    }

    log::info!("Shutting down");
}
