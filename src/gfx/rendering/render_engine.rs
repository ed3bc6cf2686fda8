//! WGPU-based rendering engine for the desk scene
//!
//! Owns the device, surface and every GPU resource: the globals buffer,
//! the per-draw dynamic uniform buffer, the texture units and the mesh
//! library. Each frame the scene script is replayed into a
//! [`ShaderState`], whose draw packets become one indexed draw each.

use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use wgpu::Device;

use crate::gfx::{
    camera::CameraUniform,
    resources::{
        GlobalBindings, GlobalUBO, GpuTextureStore, ImageFileDecoder, TextureResource,
    },
    scene::{Scene, SetupReport},
    shader::{ObjectUniform, ShaderState},
};
use crate::wgpu_utils::{binding_types, DynamicUniformBuffer};

use super::meshes::{DrawMesh, ShapeMeshes};
use super::pipeline_manager::{PipelineConfig, PipelineManager};

const SCENE_PIPELINE: &str = "Scene";

/// Draws the scene produces; the object buffer grows past this if needed
const INITIAL_DRAW_CAPACITY: usize = 64;

const CLEAR_COLOR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.03,
    a: 1.0,
};

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_ubo: GlobalUBO,
    global_bindings: GlobalBindings,
    object_buffer: DynamicUniformBuffer<ObjectUniform>,
    object_layout: wgpu::BindGroupLayout,
    object_bind_group: wgpu::BindGroup,
    textures: GpuTextureStore,
    meshes: ShapeMeshes,
    shader_state: ShaderState,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// Picks an adapter compatible with the window surface, configures the
    /// surface (Fifo when `vsync`, Immediate otherwise), uploads the mesh
    /// library and builds the scene pipeline.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> anyhow::Result<RenderEngine> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance
            .create_surface(window)
            .context("failed to create a surface for the window")?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("no graphics adapter can present to this window")?;
        log::info!("using adapter {:?}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits {
                    max_texture_dimension_2d: adapter.limits().max_texture_dimension_2d.min(8192),
                    ..wgpu::Limits::downlevel_defaults()
                },
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await
            .context("failed to open a device on the adapter")?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .context("the surface reports no supported formats")?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode: present_mode(vsync, &surface_capabilities.present_modes),
            alpha_mode: surface_capabilities.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let device: Arc<Device> = device.into();
        let queue: Arc<wgpu::Queue> = queue.into();

        let global_ubo = GlobalUBO::new(&device);
        let global_bindings = GlobalBindings::new(&device, &global_ubo);

        let object_buffer = DynamicUniformBuffer::new(&device, INITIAL_DRAW_CAPACITY);
        let object_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Object Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: binding_types::uniform_dynamic(
                    DynamicUniformBuffer::<ObjectUniform>::element_size(),
                ),
                count: None,
            }],
        });
        let object_bind_group = create_object_bind_group(&device, &object_layout, &object_buffer);

        let textures = GpuTextureStore::new(device.clone(), queue.clone());
        let meshes = ShapeMeshes::load(&device);

        let mut pipeline_manager = PipelineManager::new(device.clone());
        pipeline_manager.load_shader("scene", include_str!("scene.wgsl"));

        // Planes and glass panels are seen from both sides
        pipeline_manager.register_pipeline(
            SCENE_PIPELINE,
            PipelineConfig::default()
                .with_label("SCENE")
                .with_shader("scene")
                .with_cull_mode(None)
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    object_layout.clone(),
                    textures.bind_group_layout().clone(),
                ])
                .with_color_targets(vec![Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })]),
        );
        if let Err(errors) = pipeline_manager.create_all_pipelines() {
            anyhow::bail!("pipeline creation failed: {}", errors.join(", "));
        }

        Ok(RenderEngine {
            surface,
            device,
            queue,
            config,
            depth_texture,
            pipeline_manager,
            global_ubo,
            global_bindings,
            object_buffer,
            object_layout,
            object_bind_group,
            textures,
            meshes,
            shader_state: ShaderState::new(),
        })
    }

    /// Runs scene setup against the GPU texture store and shader state
    pub fn prepare_scene(&mut self, scene: &mut Scene, texture_dir: &Path) -> SetupReport {
        scene.prepare(
            texture_dir,
            &ImageFileDecoder,
            &mut self.textures,
            &mut self.shader_state,
        )
    }

    /// Releases every scene texture from the GPU
    pub fn teardown_scene(&mut self, scene: &mut Scene) {
        scene.teardown(&mut self.textures);
        let remaining = self.textures.texture_count();
        if remaining > 0 {
            log::warn!("{} textures still alive after teardown", remaining);
        }
    }

    /// Renders one frame of `scene` as seen by `camera`
    pub fn render_frame(
        &mut self,
        scene: &Scene,
        camera: &CameraUniform,
    ) -> Result<(), wgpu::SurfaceError> {
        self.shader_state.begin_frame();
        self.shader_state.set_camera(camera);
        scene.render(&mut self.shader_state);

        self.global_ubo
            .update_content(&self.queue, *self.shader_state.globals());
        let objects: Vec<ObjectUniform> = self
            .shader_state
            .packets()
            .iter()
            .map(|packet| packet.object)
            .collect();
        if self.object_buffer.write(&self.device, &self.queue, &objects) {
            self.object_bind_group =
                create_object_bind_group(&self.device, &self.object_layout, &self.object_buffer);
        }

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Scene Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(pipeline) = self.pipeline_manager.get_pipeline(SCENE_PIPELINE) {
                render_pass.set_pipeline(pipeline);
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);
                render_pass.set_bind_group(2, self.textures.bind_group(), &[]);

                for (index, packet) in self.shader_state.packets().iter().enumerate() {
                    let Some(mesh) = self.meshes.get(packet.mesh) else {
                        log::trace!("no {} mesh loaded, skipping draw", packet.mesh.name());
                        continue;
                    };
                    render_pass.set_bind_group(
                        1,
                        &self.object_bind_group,
                        &[self.object_buffer.offset(index)],
                    );
                    render_pass.draw_mesh(mesh);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        log::trace!("frame: {} draws", self.shader_state.packets().len());
        Ok(())
    }

    /// Resizes the render engine surface and recreates depth buffer
    ///
    /// Zero-sized requests (a minimised window) are ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);

        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
    }

    /// Reconfigures the surface at its current size, after it was lost
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }
}

/// Fifo is always available; Immediate only when the surface supports it
fn present_mode(vsync: bool, supported: &[wgpu::PresentMode]) -> wgpu::PresentMode {
    if !vsync && supported.contains(&wgpu::PresentMode::Immediate) {
        wgpu::PresentMode::Immediate
    } else {
        wgpu::PresentMode::Fifo
    }
}

fn create_object_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    buffer: &DynamicUniformBuffer<ObjectUniform>,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Object Bind Group"),
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: buffer.binding_resource(),
        }],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_present_mode_falls_back_to_fifo() {
        use wgpu::PresentMode::{Fifo, Immediate, Mailbox};

        assert_eq!(present_mode(true, &[Fifo, Immediate]), Fifo);
        assert_eq!(present_mode(false, &[Fifo, Immediate]), Immediate);
        assert_eq!(present_mode(false, &[Fifo, Mailbox]), Fifo);
    }
}
