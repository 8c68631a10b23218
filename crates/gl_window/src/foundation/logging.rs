//! Logging utilities and structured logging support

pub use log::{debug, info, warn, error, trace};

use env_logger::Env;
use log::SetLoggerError;

/// Initialize logging with `level` as the default filter
///
/// `RUST_LOG` still wins when set. Fails if a logger is already installed.
pub fn init_with_level(level: &str) -> Result<(), SetLoggerError> {
    env_logger::Builder::from_env(Env::default().default_filter_or(level)).try_init()
}
