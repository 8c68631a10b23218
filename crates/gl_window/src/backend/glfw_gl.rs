//! GLFW windows with an OpenGL context
//!
//! The `glfw::Glfw` handle exists only between `init` and `terminate`, and
//! every window lives in a slot map keyed by [`SurfaceKey`]. Windows are
//! always destroyed before the handle is dropped, since the subsystem only
//! terminates once the last window has released it.

use super::{BackendError, NativeBackend, SurfaceKey};
use crate::config::ContextConfig;
use glfw::Context;
use slotmap::SlotMap;

struct GlfwSurface {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, glfw::WindowEvent)>,
}

/// GLFW + OpenGL [`NativeBackend`]
#[derive(Default)]
pub struct GlfwBackend {
    glfw: Option<glfw::Glfw>,
    surfaces: SlotMap<SurfaceKey, GlfwSurface>,
}

impl GlfwBackend {
    /// Create an uninitialized backend
    pub fn new() -> Self {
        Self::default()
    }
}

impl NativeBackend for GlfwBackend {
    fn init(&mut self, context: &ContextConfig) -> Result<(), BackendError> {
        let mut glfw = glfw::init(glfw::log_errors)
            .map_err(|e| BackendError::new(format!("Unable to initialize GLFW: {e:?}")))?;

        glfw.window_hint(glfw::WindowHint::ContextVersion(context.major, context.minor));
        let profile = if context.core_profile {
            glfw::OpenGlProfileHint::Core
        } else {
            glfw::OpenGlProfileHint::Compat
        };
        glfw.window_hint(glfw::WindowHint::OpenGlProfile(profile));
        #[cfg(target_os = "macos")]
        glfw.window_hint(glfw::WindowHint::OpenGlForwardCompat(true));

        log::debug!("GLFW initialized, requesting OpenGL {}.{}", context.major, context.minor);
        self.glfw = Some(glfw);
        Ok(())
    }

    fn terminate(&mut self) {
        self.surfaces.clear();
        // Dropping the last handle terminates the library
        self.glfw = None;
        log::debug!("GLFW terminated");
    }

    fn create_surface(&mut self, width: u32, height: u32, title: &str) -> Result<SurfaceKey, BackendError> {
        let glfw = self
            .glfw
            .as_mut()
            .ok_or_else(|| BackendError::new("GLFW is not initialized"))?;
        // glfw converts the title to a C string and panics on interior NULs
        if title.contains('\0') {
            return Err(BackendError::new("Window title contains a NUL byte"));
        }

        let (window, events) = glfw
            .create_window(width, height, title, glfw::WindowMode::Windowed)
            .ok_or_else(|| BackendError::new("Unable to create GLFW window"))?;

        Ok(self.surfaces.insert(GlfwSurface { window, events }))
    }

    fn destroy_surface(&mut self, surface: SurfaceKey) {
        // PWindow destroys the native window on drop
        self.surfaces.remove(surface);
    }

    fn make_current(&mut self, surface: SurfaceKey) -> Result<(), BackendError> {
        let target = self
            .surfaces
            .get_mut(surface)
            .ok_or_else(|| BackendError::new("Unknown GLFW surface"))?;

        target.window.make_current();
        if !target.window.is_current() {
            return Err(BackendError::new("Unable to make GL context current"));
        }

        // The table is process-global; reload it for whichever context is current
        gl::load_with(|symbol| target.window.get_proc_address(symbol) as *const _);
        if gl::Clear::is_loaded() && gl::ClearColor::is_loaded() && gl::Viewport::is_loaded() {
            Ok(())
        } else {
            Err(BackendError::new("Unable to load GL functions"))
        }
    }

    fn swap_buffers(&mut self, surface: SurfaceKey) {
        if let Some(target) = self.surfaces.get_mut(surface) {
            target.window.swap_buffers();
        }
    }

    fn should_close(&self, surface: SurfaceKey) -> bool {
        self.surfaces.get(surface).map_or(true, |s| s.window.should_close())
    }

    fn set_should_close(&mut self, surface: SurfaceKey, should_close: bool) {
        if let Some(target) = self.surfaces.get_mut(surface) {
            target.window.set_should_close(should_close);
        }
    }

    fn poll_events(&mut self) {
        if let Some(glfw) = self.glfw.as_mut() {
            glfw.poll_events();
        }
        // No event polling is enabled, but keep the receivers drained
        for surface in self.surfaces.values() {
            glfw::flush_messages(&surface.events).for_each(drop);
        }
    }
}
