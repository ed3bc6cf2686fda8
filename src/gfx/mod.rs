//! # Graphics Module
//!
//! Everything between the scene description and the GPU.
//!
//! ## Architecture Overview
//!
//! - **Camera** ([`camera`]) - Fixed perspective viewpoint
//! - **Geometry** ([`geometry`]) - Procedural primitive meshes
//! - **Rendering** ([`rendering`]) - Device, pipeline, mesh buffers and frame rendering
//! - **Resources** ([`resources`]) - Texture and material registries, global uniforms
//! - **Scene** ([`scene`]) - Scene data, script interpreter and uniform dispatch
//! - **Shader** ([`shader`]) - Named-uniform interface and its implementations
//!
//! ## Frame Flow
//!
//! The scene script is replayed every frame. Each directive turns into
//! named uniform uploads and a mesh draw on a [`shader::RenderTarget`];
//! the [`RenderEngine`] collects those into draw packets and submits one
//! indexed draw per packet.

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;
pub mod shader;

// Re-export commonly used types
pub use camera::FixedCamera;
pub use rendering::render_engine::RenderEngine;
