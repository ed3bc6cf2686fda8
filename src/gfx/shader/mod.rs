//! # Shader Uniform Interface
//!
//! The scene talks to the shader through named uniforms, the same way a
//! classic GLSL program is driven with `glUniform*` calls. Two
//! implementations exist:
//!
//! - [`ShaderState`] mirrors every recognised name into the uniform buffer
//!   layouts the WGSL shader reads, and snapshots the per-object block on
//!   each draw.
//! - [`UniformTrace`] records every call verbatim. It backs the determinism
//!   tests and the `--dump-trace` mode of the binary.
//!
//! Uniform names live in [`names`].

pub mod names;
pub mod state;
pub mod trace;

pub use state::{DrawPacket, ObjectUniform, ShaderState};
pub use trace::{TraceEvent, UniformTrace, UniformValue};

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use crate::gfx::geometry::MeshKind;

/// Named-uniform upload surface of a shader program
pub trait ShaderUniforms {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>);
    fn set_vec4(&mut self, name: &str, value: Vector4<f32>);
    fn set_vec3(&mut self, name: &str, value: Vector3<f32>);
    fn set_vec2(&mut self, name: &str, value: Vector2<f32>);
    fn set_float(&mut self, name: &str, value: f32);
    fn set_int(&mut self, name: &str, value: i32);
    fn set_bool(&mut self, name: &str, value: bool);
    /// Points a sampler uniform at a texture unit
    fn set_sampler2d(&mut self, name: &str, unit: i32);
}

/// Issues a draw of one of the primitive meshes with the current uniforms
pub trait MeshDrawer {
    fn draw_mesh(&mut self, kind: MeshKind);
}

/// Everything the scene needs to render through
pub trait RenderTarget: ShaderUniforms + MeshDrawer {}

impl<T: ShaderUniforms + MeshDrawer + ?Sized> RenderTarget for T {}
