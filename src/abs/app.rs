//! SDL2 and OpenGL application management.
//!
//! This module defines the [`App`] struct which encapsulates the SDL2
//! and OpenGL context necessary for creating a windowed application.

use std::sync::Arc;

use glow::HasContext;

use crate::error::OrbitError;

/// The [`App`] struct encapsulates the SDL2 and OpenGL context.
pub struct App {
    _sdl: sdl2::Sdl,
    _video_subsystem: sdl2::VideoSubsystem,
    pub window: sdl2::video::Window,
    _gl_context: sdl2::video::GLContext,
    pub gl: Arc<glow::Context>,
    pub event_pump: sdl2::EventPump,
}

impl App {
    /// Creates a new [`App`] instance with the specified title, width, and height.
    ///
    /// Any failure to obtain a window or an OpenGL 3.3 core context is reported as
    /// [`OrbitError::ContextUnavailable`].
    pub fn new(title: &str, width: u32, height: u32) -> Result<Self, OrbitError> {
        let sdl = sdl2::init().map_err(OrbitError::ContextUnavailable)?;
        let video_subsystem = sdl.video().map_err(OrbitError::ContextUnavailable)?;
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(sdl2::video::GLProfile::Core);
        gl_attr.set_context_version(3, 3);
        gl_attr.set_depth_size(24);

        let window = video_subsystem
            .window(title, width, height)
            .opengl()
            .resizable()
            .build()
            .map_err(|e| OrbitError::ContextUnavailable(e.to_string()))?;
        let gl_context = window
            .gl_create_context()
            .map_err(OrbitError::ContextUnavailable)?;
        window
            .gl_make_current(&gl_context)
            .map_err(OrbitError::ContextUnavailable)?;

        if let Err(err) = video_subsystem.gl_set_swap_interval(sdl2::video::SwapInterval::VSync) {
            log::warn!("VSync unavailable: {err}");
        }

        let gl = unsafe {
            glow::Context::from_loader_function(|s| {
                video_subsystem.gl_get_proc_address(s) as *const _
            })
        };
        unsafe {
            log::info!(
                "OpenGL {} on {}",
                gl.get_parameter_string(glow::VERSION),
                gl.get_parameter_string(glow::RENDERER)
            );
        }
        let event_pump = sdl.event_pump().map_err(OrbitError::ContextUnavailable)?;
        let gl = Arc::new(gl);

        Ok(Self {
            _sdl: sdl,
            _video_subsystem: video_subsystem,
            window,
            _gl_context: gl_context,
            gl,
            event_pump,
        })
    }

    /// Returns the drawable size in pixels.
    pub fn drawable_size(&self) -> (u32, u32) {
        self.window.drawable_size()
    }
}
