//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    pub sdl: sdl2::Sdl,
    // Only held so that it outlives the window.
    _video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    // Only held so that the GL context stays current.
    _gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a new [`App`] instance with the specified title, width, and height.
    /// The width and height options are ignored if `fullscreen` is set to `true`.
    ///
    /// Any failure while bringing up SDL, the window or the GL context is
    /// returned as a message; there is nothing to fall back to.
    pub fn new(title: &str, width: u32, height: u32, fullscreen: bool) -> Result<Self, String> {
        let sdl = sdl2::init()?;
        let video_subsystem = sdl.video()?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        let (width, height) = if fullscreen {
            let display_mode = video_subsystem.current_display_mode(0)?;
            (display_mode.w as u32, display_mode.h as u32)
        } else {
            (width, height)
        };
        let mut window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| e.to_string())?;
        window.set_fullscreen(if fullscreen {
            sdl2::video::FullscreenType::Desktop
        } else {
            sdl2::video::FullscreenType::Off
        })?;
        let gl_context = window.gl_create_context()?;
        window.gl_make_current(&gl_context)?;
        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        let event_pump = sdl.event_pump()?;
        let gl = Arc::new(gl);

        log::info!("Created {width}x{height} window with an OpenGL 3.3 core context");

        Ok(Self {
            sdl,
            _video_subsystem: video_subsystem,
            window,
            _gl_context: gl_context,
            gl,
            event_pump,
        })
    }

    /// Current drawable size of the window in pixels.
    pub fn size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}
