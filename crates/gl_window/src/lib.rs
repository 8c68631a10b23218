//! # GL Window
//!
//! Lifecycle management for on-screen OpenGL windows that share one
//! process-wide native windowing subsystem.
//!
//! ## Features
//!
//! - **Reference-counted subsystem**: the native library is initialized when the
//!   first window is created and terminated after the last one is destroyed
//! - **Move-only windows**: each [`Window`] uniquely owns one native surface
//! - **Per-call context binding**: the window's context is made current before
//!   every render and before the destroy hook
//! - **Lifecycle hooks**: optional create, render and destroy closures
//! - **Pluggable backends**: GLFW for real windows, headless for tests
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use gl_window::prelude::*;
//!
//! fn main() -> Result<(), WindowError> {
//!     let subsystem = Subsystem::shared(HeadlessBackend::new(), ContextConfig::default());
//!
//!     let window = WindowBuilder::new(640, 480, "Hello World")
//!         .on_render(|| { /* draw calls */ })
//!         .build(&subsystem)?;
//!
//!     let mut windows = vec![window];
//!     gl_window::driver::run(&subsystem, &mut windows)
//! }
//! ```

pub mod foundation;
pub mod config;
pub mod backend;
pub mod subsystem;
pub mod window;
pub mod driver;

mod error;

pub use error::{WindowError, WindowResult};
pub use subsystem::{Lease, SharedSubsystem, Subsystem};
pub use window::{Hook, Window, WindowBuilder};

/// Common imports for crate users
pub mod prelude {
    pub use crate::{
        WindowError, WindowResult,
        Subsystem, SharedSubsystem,
        Window, WindowBuilder, Hook,
        backend::{NativeBackend, HeadlessBackend},
        config::{AppConfig, Config, ContextConfig, WindowConfig},
    };

    #[cfg(feature = "glfw-backend")]
    pub use crate::backend::GlfwBackend;
}
