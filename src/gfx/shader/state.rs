//! GPU-facing implementation of the uniform interface
//!
//! Named uploads are decoded into the two uniform blocks the WGSL shader
//! reads. Per-object values accumulate in [`ObjectUniform`] and are copied
//! into a [`DrawPacket`] on every draw. The globals block, which holds the
//! camera and the lights, persists across frames.

use cgmath::{Matrix4, Vector2, Vector3, Vector4};

use super::names;
use super::trace::UniformValue;
use super::{MeshDrawer, ShaderUniforms};
use crate::gfx::camera::CameraUniform;
use crate::gfx::geometry::MeshKind;
use crate::gfx::resources::global_bindings::{GlobalUBOContent, LightUniform};
use crate::gfx::resources::texture_registry::TEXTURE_CAPACITY;

/// Per-draw uniform block
///
/// MUST match the `ObjectUniform` struct in `scene.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub model: [[f32; 4]; 4],
    pub object_color: [f32; 4],
    pub uv_scale: [f32; 2],
    pub use_texture: u32,
    pub texture_unit: u32,
    pub ambient_color: [f32; 3],
    pub ambient_strength: f32,
    pub diffuse_color: [f32; 3],
    pub shininess: f32,
    pub specular_color: [f32; 3],
    _padding: f32,
}
// Total: 64 + 16 + 8 + 4 + 4 + 16 + 16 + 16 = 144 bytes

impl Default for ObjectUniform {
    fn default() -> Self {
        Self {
            model: Matrix4::<f32>::from_scale(1.0).into(),
            object_color: [1.0; 4],
            uv_scale: [1.0, 1.0],
            use_texture: 0,
            texture_unit: 0,
            ambient_color: [0.0; 3],
            ambient_strength: 0.0,
            diffuse_color: [0.0; 3],
            shininess: 0.0,
            specular_color: [0.0; 3],
            _padding: 0.0,
        }
    }
}

/// One queued draw: the mesh plus the object uniforms current at draw time
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawPacket {
    pub mesh: MeshKind,
    pub object: ObjectUniform,
}

#[derive(Debug, Default)]
pub struct ShaderState {
    current: ObjectUniform,
    globals: GlobalUBOContent,
    packets: Vec<DrawPacket>,
}

impl ShaderState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drops last frame's draws; uniform values stay as they were
    pub fn begin_frame(&mut self) {
        self.packets.clear();
    }

    pub fn set_camera(&mut self, camera: &CameraUniform) {
        self.globals.set_camera(camera);
    }

    pub fn packets(&self) -> &[DrawPacket] {
        &self.packets
    }

    pub fn globals(&self) -> &GlobalUBOContent {
        &self.globals
    }

    pub fn current(&self) -> &ObjectUniform {
        &self.current
    }

    fn apply(&mut self, name: &str, value: UniformValue) {
        use UniformValue::*;

        let object = &mut self.current;
        match (name, value) {
            (names::MODEL, Mat4(m)) => object.model = m,
            (names::OBJECT_COLOR, Vec4(c)) => object.object_color = c,
            (names::USE_TEXTURE, Bool(b)) => object.use_texture = b as u32,
            (names::UV_SCALE, Vec2(s)) => object.uv_scale = s,
            (names::OBJECT_TEXTURE, Sampler2d(unit) | Int(unit)) => {
                match u32::try_from(unit).ok().filter(|u| (*u as usize) < TEXTURE_CAPACITY) {
                    Some(unit) => object.texture_unit = unit,
                    None => log::warn!(
                        "texture unit {} is out of range, keeping {}",
                        unit,
                        object.texture_unit
                    ),
                }
            }
            (names::MATERIAL_AMBIENT_COLOR, Vec3(c)) => object.ambient_color = c,
            (names::MATERIAL_AMBIENT_STRENGTH, Float(x)) => object.ambient_strength = x,
            (names::MATERIAL_DIFFUSE_COLOR, Vec3(c)) => object.diffuse_color = c,
            (names::MATERIAL_SPECULAR_COLOR, Vec3(c)) => object.specular_color = c,
            (names::MATERIAL_SHININESS, Float(x)) => object.shininess = x,
            (names::USE_LIGHTING, Bool(b)) => self.globals.use_lighting = b as u32,
            _ => match names::parse_light_uniform(name) {
                Some((index, field)) => {
                    if !apply_light(&mut self.globals.lights[index], field, value) {
                        log::warn!("ignoring light uniform '{}' = {}", name, value);
                    }
                }
                None => log::warn!(
                    "ignoring uniform '{}' = {}: unknown name or mismatched type",
                    name,
                    value
                ),
            },
        }
    }
}

/// Returns false when `field` is unknown or `value` has the wrong type
fn apply_light(light: &mut LightUniform, field: &str, value: UniformValue) -> bool {
    use UniformValue::*;

    match (field, value) {
        (names::LIGHT_POSITION, Vec3(v)) => light.position = v,
        (names::LIGHT_AMBIENT_COLOR, Vec3(v)) => light.ambient_color = v,
        (names::LIGHT_DIFFUSE_COLOR, Vec3(v)) => light.diffuse_color = v,
        (names::LIGHT_SPECULAR_COLOR, Vec3(v)) => light.specular_color = v,
        (names::LIGHT_FOCAL_STRENGTH, Float(x)) => light.focal_strength = x,
        (names::LIGHT_SPECULAR_INTENSITY, Float(x)) => light.specular_intensity = x,
        _ => return false,
    }
    true
}

impl ShaderUniforms for ShaderState {
    fn set_mat4(&mut self, name: &str, value: Matrix4<f32>) {
        self.apply(name, UniformValue::Mat4(value.into()));
    }

    fn set_vec4(&mut self, name: &str, value: Vector4<f32>) {
        self.apply(name, UniformValue::Vec4(value.into()));
    }

    fn set_vec3(&mut self, name: &str, value: Vector3<f32>) {
        self.apply(name, UniformValue::Vec3(value.into()));
    }

    fn set_vec2(&mut self, name: &str, value: Vector2<f32>) {
        self.apply(name, UniformValue::Vec2(value.into()));
    }

    fn set_float(&mut self, name: &str, value: f32) {
        self.apply(name, UniformValue::Float(value));
    }

    fn set_int(&mut self, name: &str, value: i32) {
        self.apply(name, UniformValue::Int(value));
    }

    fn set_bool(&mut self, name: &str, value: bool) {
        self.apply(name, UniformValue::Bool(value));
    }

    fn set_sampler2d(&mut self, name: &str, unit: i32) {
        self.apply(name, UniformValue::Sampler2d(unit));
    }
}

impl MeshDrawer for ShaderState {
    fn draw_mesh(&mut self, kind: MeshKind) {
        log::trace!("queue draw #{} ({})", self.packets.len(), kind.name());
        self.packets.push(DrawPacket {
            mesh: kind,
            object: self.current,
        });
    }
}
