//! GPU mesh library
//!
//! Every primitive is generated and uploaded once at startup; draws only
//! bind the buffers of the requested kind.

use std::collections::HashMap;
use std::ops::Range;

use wgpu::util::DeviceExt;

use crate::gfx::geometry::{self, GeometryData, MeshKind};

/// Vertex and index buffers of one uploaded primitive
pub struct Mesh {
    vertex_buffer: wgpu::Buffer,
    index_buffer: wgpu::Buffer,
    index_count: u32,
}

impl Mesh {
    pub fn from_geometry(device: &wgpu::Device, geometry: &GeometryData, label: &str) -> Self {
        let vertices = geometry.to_vertices();

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Vertex Buffer", label)),
            contents: bytemuck::cast_slice(&vertices),
            usage: wgpu::BufferUsages::VERTEX,
        });
        let index_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some(&format!("{} Index Buffer", label)),
            contents: bytemuck::cast_slice(&geometry.indices),
            usage: wgpu::BufferUsages::INDEX,
        });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: geometry.indices.len() as u32,
        }
    }
}

/// One [`Mesh`] per [`MeshKind`]
pub struct ShapeMeshes {
    meshes: HashMap<MeshKind, Mesh>,
}

impl ShapeMeshes {
    /// Generates and uploads every primitive
    pub fn load(device: &wgpu::Device) -> Self {
        let meshes = MeshKind::ALL
            .iter()
            .map(|&kind| {
                let geometry = geometry::generate(kind);
                log::debug!(
                    "uploading {} mesh: {} vertices, {} triangles",
                    kind.name(),
                    geometry.vertex_count(),
                    geometry.triangle_count()
                );
                (kind, Mesh::from_geometry(device, &geometry, kind.name()))
            })
            .collect();
        Self { meshes }
    }

    pub fn get(&self, kind: MeshKind) -> Option<&Mesh> {
        self.meshes.get(&kind)
    }
}

pub trait DrawMesh<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_mesh_instanced(&mut self, mesh: &'a Mesh, instances: Range<u32>);
}

impl<'a, 'b> DrawMesh<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        self.draw_mesh_instanced(mesh, 0..1);
    }

    fn draw_mesh_instanced(&mut self, mesh: &'b Mesh, instances: Range<u32>) {
        self.set_vertex_buffer(0, mesh.vertex_buffer.slice(..));
        self.set_index_buffer(mesh.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, instances);
    }
}
