//! In-memory backend without a display
//!
//! Every call is appended to a shared [`CallLog`] so tests can assert exact
//! lifecycle ordering. Failures can be switched on at runtime to exercise the
//! unwinding paths of window construction, rendering and teardown.

use super::{BackendError, NativeBackend, SurfaceKey};
use crate::config::ContextConfig;
use slotmap::SlotMap;
use std::cell::RefCell;
use std::rc::Rc;

/// One recorded backend call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCall {
    /// Subsystem started with these hints
    Init(ContextConfig),
    /// Subsystem shut down
    Terminate,
    /// Surface created
    CreateSurface {
        /// New surface
        surface: SurfaceKey,
        /// Title passed at creation
        title: String,
    },
    /// Surface destroyed
    DestroySurface(SurfaceKey),
    /// Context made current (successfully or not)
    MakeCurrent(SurfaceKey),
    /// Buffers swapped
    SwapBuffers(SurfaceKey),
    /// Events polled
    PollEvents,
}

/// Shared, clonable record of backend calls
#[derive(Debug, Clone, Default)]
pub struct CallLog {
    calls: Rc<RefCell<Vec<BackendCall>>>,
}

impl CallLog {
    fn record(&self, call: BackendCall) {
        self.calls.borrow_mut().push(call);
    }

    /// Snapshot of all calls so far
    pub fn calls(&self) -> Vec<BackendCall> {
        self.calls.borrow().clone()
    }

    /// Number of recorded calls matching `predicate`
    pub fn count(&self, predicate: impl Fn(&BackendCall) -> bool) -> usize {
        self.calls.borrow().iter().filter(|call| predicate(call)).count()
    }

    /// Forget all recorded calls
    pub fn clear(&self) {
        self.calls.borrow_mut().clear();
    }
}

#[derive(Debug, Default)]
struct HeadlessSurface {
    close_requested: bool,
}

/// Display-less [`NativeBackend`]
///
/// Enforces the native ordering rules strictly: initializing twice, or
/// creating a surface before init, is reported as an error.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
    initialized: bool,
    surfaces: SlotMap<SurfaceKey, HeadlessSurface>,
    log: CallLog,
    fail_init: bool,
    fail_create: bool,
    fail_bind: bool,
    panic_create: bool,
}

impl HeadlessBackend {
    /// Create a backend with no failures armed
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle onto the call log; stays valid after the backend is moved
    pub fn log(&self) -> CallLog {
        self.log.clone()
    }

    /// Make subsequent `init` calls fail
    pub fn set_init_failure(&mut self, fail: bool) {
        self.fail_init = fail;
    }

    /// Make subsequent `create_surface` calls fail
    pub fn set_surface_failure(&mut self, fail: bool) {
        self.fail_create = fail;
    }

    /// Make subsequent `create_surface` calls panic
    pub fn set_surface_panic(&mut self, panic: bool) {
        self.panic_create = panic;
    }

    /// Make subsequent `make_current` calls fail
    pub fn set_bind_failure(&mut self, fail: bool) {
        self.fail_bind = fail;
    }

    /// Whether the simulated subsystem is up
    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Number of surfaces currently alive
    pub fn live_surfaces(&self) -> usize {
        self.surfaces.len()
    }
}

impl NativeBackend for HeadlessBackend {
    fn init(&mut self, context: &ContextConfig) -> Result<(), BackendError> {
        if self.fail_init {
            return Err(BackendError::new("headless init failure"));
        }
        if self.initialized {
            return Err(BackendError::new("subsystem already initialized"));
        }
        self.initialized = true;
        self.log.record(BackendCall::Init(context.clone()));
        Ok(())
    }

    fn terminate(&mut self) {
        self.initialized = false;
        self.surfaces.clear();
        self.log.record(BackendCall::Terminate);
    }

    fn create_surface(&mut self, _width: u32, _height: u32, title: &str) -> Result<SurfaceKey, BackendError> {
        if !self.initialized {
            return Err(BackendError::new("subsystem not initialized"));
        }
        if self.fail_create {
            return Err(BackendError::new("headless surface failure"));
        }
        if title.contains('\0') {
            return Err(BackendError::new("Window title contains a NUL byte"));
        }
        assert!(!self.panic_create, "headless surface panic");
        let surface = self.surfaces.insert(HeadlessSurface::default());
        self.log.record(BackendCall::CreateSurface { surface, title: title.to_string() });
        Ok(surface)
    }

    fn destroy_surface(&mut self, surface: SurfaceKey) {
        self.surfaces.remove(surface);
        self.log.record(BackendCall::DestroySurface(surface));
    }

    fn make_current(&mut self, surface: SurfaceKey) -> Result<(), BackendError> {
        self.log.record(BackendCall::MakeCurrent(surface));
        if self.fail_bind {
            return Err(BackendError::new("headless bind failure"));
        }
        if !self.surfaces.contains_key(surface) {
            return Err(BackendError::new("unknown surface"));
        }
        Ok(())
    }

    fn swap_buffers(&mut self, surface: SurfaceKey) {
        self.log.record(BackendCall::SwapBuffers(surface));
    }

    fn should_close(&self, surface: SurfaceKey) -> bool {
        self.surfaces.get(surface).map_or(true, |s| s.close_requested)
    }

    fn set_should_close(&mut self, surface: SurfaceKey, should_close: bool) {
        if let Some(s) = self.surfaces.get_mut(surface) {
            s.close_requested = should_close;
        }
    }

    fn poll_events(&mut self) {
        self.log.record(BackendCall::PollEvents);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_init_is_an_error() {
        let mut backend = HeadlessBackend::new();
        backend.init(&ContextConfig::default()).unwrap();
        assert!(backend.init(&ContextConfig::default()).is_err());
    }

    #[test]
    fn test_surface_requires_init() {
        let mut backend = HeadlessBackend::new();
        assert!(backend.create_surface(800, 600, "Test").is_err());
    }

    #[test]
    fn test_nul_title_rejected() {
        let mut backend = HeadlessBackend::new();
        backend.init(&ContextConfig::default()).unwrap();
        assert!(backend.create_surface(800, 600, "Bad\0Title").is_err());
        assert_eq!(backend.live_surfaces(), 0);
    }

    #[test]
    fn test_close_request_round_trip() {
        let mut backend = HeadlessBackend::new();
        backend.init(&ContextConfig::default()).unwrap();
        let surface = backend.create_surface(800, 600, "Test").unwrap();

        assert!(!backend.should_close(surface));
        backend.set_should_close(surface, true);
        assert!(backend.should_close(surface));

        backend.destroy_surface(surface);
        assert!(backend.should_close(surface));
    }

    #[test]
    fn test_log_survives_move() {
        let backend = HeadlessBackend::new();
        let log = backend.log();
        let mut moved = backend;
        moved.poll_events();
        assert_eq!(log.calls(), vec![BackendCall::PollEvents]);
    }
}
