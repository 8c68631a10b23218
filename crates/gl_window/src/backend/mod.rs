//! Native windowing backends
//!
//! The window core talks to the platform only through [`NativeBackend`]. This
//! keeps the lifecycle rules (reference counting, unwinding, hook ordering)
//! independent of GLFW so they can run against [`HeadlessBackend`] in tests.
//!
//! - **`headless`**: in-memory backend that records every call
//! - **`glfw_gl`**: GLFW windows with an OpenGL context (feature `glfw-backend`)

mod headless;
#[cfg(feature = "glfw-backend")]
mod glfw_gl;

pub use headless::{BackendCall, CallLog, HeadlessBackend};
#[cfg(feature = "glfw-backend")]
pub use glfw_gl::GlfwBackend;

use crate::config::ContextConfig;
use thiserror::Error;

slotmap::new_key_type! {
    /// Identifies one native surface inside its backend
    pub struct SurfaceKey;
}

/// Failure reported by a native backend call
///
/// The window layer decides which [`crate::WindowError`] kind it maps to,
/// depending on the lifecycle step that failed.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BackendError(pub String);

impl BackendError {
    /// Create a backend error from a message
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Process-wide native windowing subsystem
///
/// Implementations are driven exclusively by [`crate::Subsystem`] and
/// [`crate::Window`], which guarantee that `init`/`terminate` alternate and
/// that surfaces only exist between them.
///
/// # Thread Safety
/// Native context APIs bind a single "current context" per thread. Backends
/// are used from one thread only.
pub trait NativeBackend {
    /// Start the native subsystem and apply context hints
    fn init(&mut self, context: &ContextConfig) -> Result<(), BackendError>;

    /// Shut the native subsystem down
    fn terminate(&mut self);

    /// Create one native surface
    fn create_surface(&mut self, width: u32, height: u32, title: &str) -> Result<SurfaceKey, BackendError>;

    /// Destroy a surface created by [`NativeBackend::create_surface`]
    fn destroy_surface(&mut self, surface: SurfaceKey);

    /// Make the surface's context current and load the GL function table
    ///
    /// Called before every use of the context, never cached.
    fn make_current(&mut self, surface: SurfaceKey) -> Result<(), BackendError>;

    /// Present the back buffer
    fn swap_buffers(&mut self, surface: SurfaceKey);

    /// Whether a close was requested for the surface
    fn should_close(&self, surface: SurfaceKey) -> bool;

    /// Set or clear the surface's close request
    fn set_should_close(&mut self, surface: SurfaceKey, should_close: bool);

    /// Process pending events for all surfaces
    fn poll_events(&mut self);
}
