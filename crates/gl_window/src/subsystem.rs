//! Reference-counted native subsystem
//!
//! One [`Subsystem`] is created by the top-level code and handed to every
//! window as a [`SharedSubsystem`]. It counts live windows: the first
//! successful acquire initializes the native library and the release that
//! brings the count back to zero terminates it.
//!
//! Every successful acquire yields a [`Lease`], and `release` consumes one.
//! Only window construction and destruction pair the two calls. Leases
//! cannot be cloned or built outside this module, and each one is stamped
//! with the subsystem that issued it; a foreign lease is rejected, so the
//! count never drops below the number of live windows.

use crate::backend::NativeBackend;
use crate::config::ContextConfig;
use crate::error::{WindowError, WindowResult};
use std::cell::RefCell;
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_SUBSYSTEM_ID: AtomicU64 = AtomicU64::new(0);

/// Subsystem shared by every window on the thread
pub type SharedSubsystem<B> = Rc<RefCell<Subsystem<B>>>;

/// Proof of one successful acquire, held by a live window
#[derive(Debug)]
#[must_use = "dropping a lease without releasing it keeps the subsystem alive"]
pub struct Lease {
    issuer: u64,
}

/// Native subsystem plus its live-window count
#[derive(Debug)]
pub struct Subsystem<B: NativeBackend> {
    id: u64,
    backend: B,
    context: ContextConfig,
    live_windows: usize,
}

impl<B: NativeBackend> Subsystem<B> {
    /// Wrap a backend; nothing is initialized until the first acquire
    pub fn new(backend: B, context: ContextConfig) -> Self {
        let id = NEXT_SUBSYSTEM_ID.fetch_add(1, Ordering::Relaxed);
        Self { id, backend, context, live_windows: 0 }
    }

    /// Create a subsystem ready to be handed to windows
    pub fn shared(backend: B, context: ContextConfig) -> SharedSubsystem<B> {
        Rc::new(RefCell::new(Self::new(backend, context)))
    }

    /// Register one more live window, initializing on the 0 → 1 transition
    ///
    /// On init failure the count is left untouched.
    pub(crate) fn acquire(&mut self) -> WindowResult<Lease> {
        if self.live_windows == 0 {
            self.backend
                .init(&self.context)
                .map_err(|e| WindowError::InitializationFailed(e.to_string()))?;
            log::debug!("Native subsystem initialized");
        }
        self.live_windows += 1;
        Ok(Lease { issuer: self.id })
    }

    /// Unregister a live window, terminating on the 1 → 0 transition
    ///
    /// A lease issued by another subsystem is rejected and logged.
    pub(crate) fn release(&mut self, lease: Lease) {
        let Lease { issuer } = lease;
        if issuer != self.id || self.live_windows == 0 {
            log::error!("Rejected lease from subsystem {issuer} in subsystem {}", self.id);
            return;
        }
        self.live_windows -= 1;
        if self.live_windows == 0 {
            self.backend.terminate();
            log::debug!("Native subsystem terminated");
        }
    }

    /// Process pending events for every window; no-op while uninitialized
    pub fn poll_events(&mut self) {
        if self.is_initialized() {
            self.backend.poll_events();
        }
    }

    /// Number of windows currently holding a lease
    pub const fn live_windows(&self) -> usize {
        self.live_windows
    }

    /// Whether the native subsystem is up
    pub const fn is_initialized(&self) -> bool {
        self.live_windows > 0
    }

    /// Context hints applied on init
    pub const fn context(&self) -> &ContextConfig {
        &self.context
    }

    /// Borrow the backend
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }
}
