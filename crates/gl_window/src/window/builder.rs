//! Window construction

use super::hook::{run_guarded, Hook};
use super::{LiveSurface, Window};
use crate::backend::{NativeBackend, SurfaceKey};
use crate::config::WindowConfig;
use crate::error::{WindowError, WindowResult};
use crate::subsystem::{Lease, SharedSubsystem};
use std::fmt;
use std::rc::Rc;

/// Collects construction parameters and hooks for a [`Window`]
///
/// Dimensions and title are passed to the native layer as given.
pub struct WindowBuilder {
    width: u32,
    height: u32,
    title: String,
    on_create: Option<Box<dyn FnOnce()>>,
    on_render: Hook,
    on_destroy: Hook,
}

impl WindowBuilder {
    /// Start a window description
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self {
            width,
            height,
            title: title.into(),
            on_create: None,
            on_render: Hook::Absent,
            on_destroy: Hook::Absent,
        }
    }

    /// Start a window description from configuration
    pub fn from_config(config: &WindowConfig) -> Self {
        Self::new(config.width, config.height, config.title.clone())
    }

    /// Run once at construction with the new context bound; not stored
    #[must_use]
    pub fn on_create(mut self, f: impl FnOnce() + 'static) -> Self {
        self.on_create = Some(Box::new(f));
        self
    }

    /// Run on every [`Window::render`] with the context bound
    #[must_use]
    pub fn on_render(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_render = Hook::new(f);
        self
    }

    /// Run at most once at destruction, if the context can still be bound
    #[must_use]
    pub fn on_destroy(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_destroy = Hook::new(f);
        self
    }

    /// Create the window
    ///
    /// Each step unwinds the ones before it on failure, and also when the
    /// backend panics part way through:
    ///
    /// 1. acquire the subsystem → [`WindowError::InitializationFailed`]
    /// 2. create the surface → [`WindowError::SurfaceCreationFailed`]
    /// 3. bind its context → [`WindowError::ContextBindFailed`]
    /// 4. run the create hook
    pub fn build<B: NativeBackend>(self, subsystem: &SharedSubsystem<B>) -> WindowResult<Window<B>> {
        let lease = subsystem.borrow_mut().acquire()?;
        let mut pending = Rollback { subsystem, lease: Some(lease), surface: None };

        let created = subsystem
            .borrow_mut()
            .backend_mut()
            .create_surface(self.width, self.height, &self.title);
        let key = created.map_err(|e| WindowError::SurfaceCreationFailed(e.to_string()))?;
        pending.surface = Some(key);

        let bound = subsystem.borrow_mut().backend_mut().make_current(key);
        bound.map_err(|e| WindowError::ContextBindFailed(e.to_string()))?;

        log::debug!("Created window '{}' ({}x{})", self.title, self.width, self.height);

        if let Some(on_create) = self.on_create {
            run_guarded("create", on_create);
        }

        let lease = pending.disarm().ok_or(WindowError::InvalidState)?;
        Ok(Window {
            surface: Some(LiveSurface { subsystem: Rc::clone(subsystem), key, lease }),
            width: self.width,
            height: self.height,
            title: self.title,
            on_render: self.on_render,
            on_destroy: self.on_destroy,
        })
    }
}

/// Undoes a partly built window when dropped, on error returns and panics alike
struct Rollback<'a, B: NativeBackend> {
    subsystem: &'a SharedSubsystem<B>,
    lease: Option<Lease>,
    surface: Option<SurfaceKey>,
}

impl<B: NativeBackend> Rollback<'_, B> {
    /// Hand the lease over to the finished window
    fn disarm(mut self) -> Option<Lease> {
        self.surface = None;
        self.lease.take()
    }
}

impl<B: NativeBackend> Drop for Rollback<'_, B> {
    fn drop(&mut self) {
        let Some(lease) = self.lease.take() else {
            return;
        };
        let Ok(mut shared) = self.subsystem.try_borrow_mut() else {
            log::error!("Subsystem still borrowed; cannot roll back window construction");
            return;
        };
        if let Some(key) = self.surface.take() {
            shared.backend_mut().destroy_surface(key);
        }
        shared.release(lease);
    }
}

impl fmt::Debug for WindowBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowBuilder")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("title", &self.title)
            .field("on_create", &self.on_create.is_some())
            .field("on_render", &self.on_render)
            .field("on_destroy", &self.on_destroy)
            .finish()
    }
}
