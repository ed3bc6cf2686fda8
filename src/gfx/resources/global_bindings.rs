//! Global uniform bindings for camera and scene lighting
//!
//! Manages the GPU uniform buffer and bind group for state that is shared by
//! every draw in a frame: the camera matrices, the lighting switch and the
//! four light sources.

use crate::{
    gfx::{camera::CameraUniform, shader::names::MAX_LIGHTS},
    wgpu_utils::{binding_types, uniform_buffer::UniformBuffer},
};

/// One light source as laid out in the shader's `lights` array
///
/// MUST match the `LightSource` struct in `scene.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub position: [f32; 3],
    pub focal_strength: f32,
    pub ambient_color: [f32; 3],
    pub specular_intensity: f32,
    pub diffuse_color: [f32; 3],
    _padding0: f32,
    pub specular_color: [f32; 3],
    _padding1: f32,
}
// Total: 4 * 16 = 64 bytes

/// Global uniform buffer content structure
///
/// MUST match the `Globals` struct in `scene.wgsl` exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GlobalUBOContent {
    pub view_proj: [[f32; 4]; 4],
    pub view_position: [f32; 4],
    pub use_lighting: u32,
    _padding: [u32; 3],
    pub lights: [LightUniform; MAX_LIGHTS],
}
// Total: 64 + 16 + 16 + 4 * 64 = 352 bytes

impl Default for GlobalUBOContent {
    fn default() -> Self {
        let camera = CameraUniform::default();
        Self {
            view_proj: camera.view_proj,
            view_position: camera.view_position,
            use_lighting: 0,
            _padding: [0; 3],
            lights: [LightUniform::default(); MAX_LIGHTS],
        }
    }
}

impl GlobalUBOContent {
    pub fn set_camera(&mut self, camera: &CameraUniform) {
        self.view_proj = camera.view_proj;
        self.view_position = camera.view_position;
    }
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Bind group layout and bind group for the globals, bound to slot 0
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, ubo: &GlobalUBO) -> Self {
        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Globals Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform(),
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Global Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: ubo.binding_resource(),
            }],
        });

        GlobalBindings {
            bind_group_layout,
            bind_group,
        }
    }

    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_sizes_match_shader() {
        assert_eq!(std::mem::size_of::<LightUniform>(), 64);
        assert_eq!(std::mem::size_of::<GlobalUBOContent>(), 352);
    }

    #[test]
    fn test_default_disables_lighting() {
        let globals = GlobalUBOContent::default();
        assert_eq!(globals.use_lighting, 0);
        assert_eq!(globals.view_proj[0][0], 1.0);
    }
}
