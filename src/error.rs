//! Error types for scene setup and configuration
//!
//! Nothing in the scene layer is fatal: texture failures are logged and the
//! affected texture is skipped. These types carry enough context for the
//! caller to report what went wrong.

use std::path::PathBuf;

use thiserror::Error;

/// Failures raised while setting up the scene
#[derive(Debug, Error)]
pub enum SceneError {
    /// The image file could not be opened or decoded
    #[error("could not load image {path:?}: {source}")]
    ImageDecode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// The image decoded fine but is neither RGB nor RGBA
    #[error("image {path:?} has {channels} color channels, only RGB and RGBA are supported")]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    /// The pixel buffer does not hold `width * height * channels` bytes
    #[error("image {path:?} carries {actual} bytes of pixel data, expected {expected}")]
    MalformedImage {
        path: PathBuf,
        expected: usize,
        actual: usize,
    },

    /// The image has no pixels
    #[error("image {path:?} is empty ({width}x{height})")]
    EmptyImage {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    /// The image is larger than the device allows for a 2D texture
    #[error("texture '{tag}' is {width}x{height}, the device allows at most {max}x{max}")]
    TextureTooLarge {
        tag: String,
        width: u32,
        height: u32,
        max: u32,
    },

    /// Every texture unit is already taken
    #[error("texture registry is full ({capacity} units), cannot register '{tag}'")]
    TextureCapacityExceeded { tag: String, capacity: usize },

    /// Every light slot is already taken
    #[error("scene already has the maximum of {max} light sources")]
    TooManyLights { max: usize },
}

/// Failures raised while reading the application configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config file {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config file {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
