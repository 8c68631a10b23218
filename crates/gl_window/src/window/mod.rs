//! Window resource
//!
//! A [`Window`] uniquely owns one native surface and keeps the shared
//! subsystem alive through its [`Lease`]. It goes through
//! `Live → Destroyed` exactly once: [`Window::destroy`] or `Drop` runs the
//! destroy hook, destroys the surface and releases the lease. A destroyed
//! window and an empty one (see [`Window::take`]) are indistinguishable.
//!
//! Contexts are not tracked as "current". Several windows share one thread,
//! so each render and each destroy hook re-binds its own context first.

mod builder;
mod hook;

pub use builder::WindowBuilder;
pub use hook::Hook;

use crate::backend::{NativeBackend, SurfaceKey};
use crate::error::{WindowError, WindowResult};
use crate::subsystem::{Lease, SharedSubsystem};
use std::fmt;

struct LiveSurface<B: NativeBackend> {
    subsystem: SharedSubsystem<B>,
    key: SurfaceKey,
    lease: Lease,
}

/// Move-only handle to one native window and its GL context
pub struct Window<B: NativeBackend> {
    surface: Option<LiveSurface<B>>,
    width: u32,
    height: u32,
    title: String,
    on_render: Hook,
    on_destroy: Hook,
}

impl<B: NativeBackend> Window<B> {
    /// Bind the context, run the render hook and present
    ///
    /// Fails with [`WindowError::InvalidState`] once destroyed, or
    /// [`WindowError::ContextBindFailed`] if the context cannot be bound. The
    /// window stays live after a bind failure.
    pub fn render(&mut self) -> WindowResult<()> {
        let surface = self.surface.as_ref().ok_or(WindowError::InvalidState)?;

        let bound = surface.subsystem.borrow_mut().backend_mut().make_current(surface.key);
        bound.map_err(|e| WindowError::ContextBindFailed(e.to_string()))?;

        self.on_render.invoke("render");

        surface.subsystem.borrow_mut().backend_mut().swap_buffers(surface.key);
        Ok(())
    }

    /// Whether the window is gone or the user asked to close it
    pub fn should_close(&self) -> bool {
        self.surface
            .as_ref()
            .map_or(true, |s| s.subsystem.borrow().backend().should_close(s.key))
    }

    /// Flag the native window for closing; no-op once destroyed
    pub fn request_close(&mut self) {
        if let Some(surface) = &self.surface {
            surface.subsystem.borrow_mut().backend_mut().set_should_close(surface.key, true);
        }
    }

    /// Tear the window down; calling it again is a no-op
    ///
    /// The destroy hook only runs if the context can be re-bound. When it
    /// cannot, the hook is skipped with a warning and teardown continues.
    pub fn destroy(&mut self) {
        let Some(LiveSurface { subsystem, key, lease }) = self.surface.take() else {
            return;
        };
        let mut on_destroy = std::mem::take(&mut self.on_destroy);
        self.on_render = Hook::Absent;

        if on_destroy.is_present() {
            let bound = subsystem.borrow_mut().backend_mut().make_current(key);
            match bound {
                Ok(()) => on_destroy.invoke("destroy"),
                Err(e) => log::warn!("Skipping destroy hook for '{}': {e}", self.title),
            }
        }

        let mut shared = subsystem.borrow_mut();
        shared.backend_mut().destroy_surface(key);
        shared.release(lease);
        log::debug!("Destroyed window '{}'", self.title);
    }

    /// Move the resource out, leaving `self` empty
    #[must_use]
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Move-assign from `source`
    ///
    /// The resource previously held by `self` is destroyed exactly once and
    /// `source` is left empty.
    pub fn assign_from(&mut self, source: &mut Self) {
        let mut previous = source.take();
        std::mem::swap(self, &mut previous);
    }

    /// Whether this window still owns a native surface
    pub const fn is_live(&self) -> bool {
        self.surface.is_some()
    }

    /// Width given at construction; 0 once moved out
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height given at construction; 0 once moved out
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Title given at construction
    pub fn title(&self) -> &str {
        &self.title
    }
}

impl<B: NativeBackend> Default for Window<B> {
    fn default() -> Self {
        Self {
            surface: None,
            width: 0,
            height: 0,
            title: String::new(),
            on_render: Hook::Absent,
            on_destroy: Hook::Absent,
        }
    }
}

impl<B: NativeBackend> Drop for Window<B> {
    fn drop(&mut self) {
        self.destroy();
    }
}

impl<B: NativeBackend> fmt::Debug for Window<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Window")
            .field("live", &self.is_live())
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .field("on_render", &self.on_render)
            .field("on_destroy", &self.on_destroy)
            .finish()
    }
}
