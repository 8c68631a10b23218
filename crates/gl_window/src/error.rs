//! Window lifecycle errors

use thiserror::Error;

/// Errors surfaced by window construction and rendering
///
/// Destruction never produces one of these; cleanup is best-effort and total.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WindowError {
    /// The native windowing subsystem could not start
    #[error("Subsystem initialization failed: {0}")]
    InitializationFailed(String),

    /// The native surface could not be created
    #[error("Surface creation failed: {0}")]
    SurfaceCreationFailed(String),

    /// The context could not be made current or its function table did not load
    #[error("Context bind failed: {0}")]
    ContextBindFailed(String),

    /// The operation needs a live window but this one is destroyed or empty
    #[error("Window has been destroyed")]
    InvalidState,
}

/// Result alias for window operations
pub type WindowResult<T> = Result<T, WindowError>;
