//! # Configuration System
//!
//! Serializable settings for the OpenGL context, the windows an application
//! opens, and logging. Files are read and written as TOML or RON, selected by
//! extension.
//!
//! The window core itself never validates dimensions or titles; they are
//! passed straight to the native layer. [`WindowConfig::validate`] exists for
//! applications that want to reject obviously broken config files early.

pub use serde::{Serialize, Deserialize};

use std::path::Path;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = extension(path)
            .filter(|ext| matches!(*ext, "toml" | "ron"))
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        if format == "toml" {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match extension(path) {
            Some("toml") => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            Some("ron") => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
            _ => return Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

fn extension(path: &Path) -> Option<&str> {
    path.extension().and_then(|ext| ext.to_str())
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Semantically invalid value
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// # OpenGL Context Configuration
///
/// Hints applied once, right after the native subsystem starts, and used for
/// every window created while it stays up.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextConfig {
    /// Requested OpenGL major version
    pub major: u32,
    /// Requested OpenGL minor version
    pub minor: u32,
    /// Request a core profile context instead of compatibility
    pub core_profile: bool,
}

impl ContextConfig {
    /// Create a context configuration for the given GL version
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor, core_profile: true }
    }

    /// Select core or compatibility profile
    #[must_use]
    pub const fn with_core_profile(mut self, core: bool) -> Self {
        self.core_profile = core;
        self
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self::new(3, 3)
    }
}

/// # Window Configuration
///
/// Construction parameters for one window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Width in screen coordinates
    pub width: u32,
    /// Height in screen coordinates
    pub height: u32,
    /// Title bar text
    pub title: String,
}

impl WindowConfig {
    /// Create a window configuration
    pub fn new(width: u32, height: u32, title: impl Into<String>) -> Self {
        Self { width, height, title: title.into() }
    }

    /// Reject zero-sized windows
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Invalid(format!(
                "window '{}' has zero size {}x{}",
                self.title, self.width, self.height
            )));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new(640, 480, "Hello World")
    }
}

/// # Complete Application Configuration
///
/// Top-level configuration read by the demo application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default log filter, overridden by `RUST_LOG`
    pub log_level: String,
    /// Context hints shared by every window
    pub context: ContextConfig,
    /// Windows to open at startup
    pub windows: Vec<WindowConfig>,
}

impl AppConfig {
    /// Set log level
    #[must_use]
    pub fn with_log_level(mut self, level: impl Into<String>) -> Self {
        self.log_level = level.into();
        self
    }

    /// Add a window to open at startup
    #[must_use]
    pub fn with_window(mut self, window: WindowConfig) -> Self {
        self.windows.push(window);
        self
    }

    /// Validate every configured window
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.windows.iter().try_for_each(WindowConfig::validate)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            context: ContextConfig::default(),
            windows: vec![
                WindowConfig::new(640, 480, "Hello World"),
                WindowConfig::new(600, 900, "Hello World 2"),
            ],
        }
    }
}

impl Config for AppConfig {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_context_is_gl33_core() {
        let context = ContextConfig::default();
        assert_eq!((context.major, context.minor), (3, 3));
        assert!(context.core_profile);
    }

    #[test]
    fn test_partial_toml_falls_back_to_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            log_level = "debug"

            [[windows]]
            width = 1280
            height = 720
            title = "Main"
            "#,
        )
        .unwrap();

        assert_eq!(config.log_level, "debug");
        assert_eq!(config.context, ContextConfig::default());
        assert_eq!(config.windows, vec![WindowConfig::new(1280, 720, "Main")]);
    }

    #[test]
    fn test_ron_context_override() {
        let config: AppConfig = ron::from_str(
            "(context: (major: 4, minor: 1, core_profile: false), windows: [])",
        )
        .unwrap();

        assert_eq!(config.context, ContextConfig::new(4, 1).with_core_profile(false));
        assert!(config.windows.is_empty());
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_zero_sized_window_rejected() {
        let config = AppConfig::default().with_window(WindowConfig::new(0, 480, "Broken"));
        assert!(matches!(config.validate(), Err(ConfigError::Invalid(_))));
    }

    fn temp_path(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("gl_window_{}_{name}", std::process::id()))
    }

    #[test]
    fn test_pretty_toml_parses_back() {
        let config = AppConfig::default().with_log_level("debug");
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: AppConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_save_and_load_toml_file() {
        let path = temp_path("app.toml");
        let config = AppConfig::default().with_window(WindowConfig::new(1024, 768, "Third"));

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_save_and_load_ron_file() {
        let path = temp_path("app.ron");
        let mut config = AppConfig::default();
        config.context = ContextConfig::new(4, 6).with_core_profile(false);

        config.save_to_file(&path).unwrap();
        let loaded = AppConfig::load_from_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), config);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = AppConfig::load_from_file(temp_path("missing.toml"));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_save_to_unsupported_extension() {
        let result = AppConfig::default().save_to_file(temp_path("app.ini"));
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let result = AppConfig::load_from_file("settings.ini");
        assert!(matches!(result, Err(ConfigError::UnsupportedFormat(_))));
    }
}
