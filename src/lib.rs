// src/lib.rs
//! Desk Scene
//!
//! A static desk, PC and monitor scene assembled from textured primitive
//! meshes and rendered with wgpu and winit.

pub mod app;
pub mod config;
pub mod error;
pub mod gfx;
pub mod logging;
pub mod prelude;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::DeskSceneApp;
pub use error::{ConfigError, SceneError};
