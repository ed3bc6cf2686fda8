//! # Application Configuration
//!
//! Window, asset, camera and logging settings, read from a TOML file.
//! Every section and field has a default, so an empty file (or no file at
//! all) yields a usable configuration.
//!
//! ```toml
//! [window]
//! title = "Desk Scene"
//! width = 1280
//! height = 720
//! vsync = true
//!
//! [assets]
//! texture_dir = "textures"
//!
//! [camera]
//! eye = [0.0, 12.0, 26.0]
//! target = [3.0, 4.0, 0.0]
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::logging::LoggingConfig;

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub assets: AssetConfig,
    pub camera: CameraConfig,
    pub logging: LogConfig,
}

/// Window creation and presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Fifo presentation when true, Immediate when false
    pub vsync: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Desk Scene".to_string(),
            width: 1280,
            height: 720,
            vsync: true,
        }
    }
}

/// Where texture files are looked up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub texture_dir: PathBuf,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            texture_dir: PathBuf::from("textures"),
        }
    }
}

/// Fixed viewpoint the scene is rendered from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraConfig {
    pub eye: [f32; 3],
    pub target: [f32; 3],
    pub fov_y_degrees: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            eye: [0.0, 12.0, 26.0],
            target: [3.0, 4.0, 0.0],
            fov_y_degrees: 45.0,
            near: 0.1,
            far: 100.0,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `env_logger` filter string; `RUST_LOG` is used when absent
    pub filter: Option<String>,
}

impl AppConfig {
    /// Parses a configuration from TOML text
    pub fn from_toml_str(text: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Reads and parses a configuration file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text, path)
    }

    /// Reads `path` when given, otherwise returns the defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Logger settings derived from the `[logging]` section
    pub fn logging_config(&self) -> LoggingConfig {
        LoggingConfig {
            filter: self.logging.filter.clone(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = AppConfig::from_toml_str("", Path::new("empty.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.assets.texture_dir, PathBuf::from("textures"));
        assert!(config.window.vsync);
    }

    #[test]
    fn test_partial_sections_keep_other_defaults() {
        let text = r#"
            [window]
            width = 800

            [camera]
            eye = [1.0, 2.0, 3.0]

            [logging]
            filter = "desk_scene=debug"
        "#;
        let config = AppConfig::from_toml_str(text, Path::new("partial.toml")).unwrap();

        assert_eq!(config.window.width, 800);
        assert_eq!(config.window.height, 720);
        assert_eq!(config.camera.eye, [1.0, 2.0, 3.0]);
        assert_eq!(config.camera.fov_y_degrees, 45.0);
        assert_eq!(config.logging_config().filter.as_deref(), Some("desk_scene=debug"));
    }

    #[test]
    fn test_parse_error_names_the_file() {
        let err =
            AppConfig::from_toml_str("[window\nwidth = ", Path::new("broken.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = AppConfig::from_file(Path::new("definitely/not/here.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_load_or_default_without_path() {
        assert_eq!(AppConfig::load_or_default(None).unwrap(), AppConfig::default());
    }
}
