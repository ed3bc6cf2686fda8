//! # Procedural Geometry Generation
//!
//! This module generates the seven primitive shapes the scene is assembled
//! from, so no model files are needed.
//!
//! ## Supported Primitives
//!
//! - **Plane**: 2x2 plane in XZ, normal +Y
//! - **Box**: unit box centred on the origin
//! - **Cylinder**: radius 1, height 1, standing on y = 0
//! - **Tapered cylinder**: as the cylinder, top radius 0.5
//! - **Sphere**: radius 1 centred on the origin
//! - **Torus**: major radius 1, tube radius 0.2, lying in the XY plane
//! - **Prism**: triangular prism in a unit box, extruded along Z
//!
//! ## Usage
//!
//! ```rust
//! use desk_scene::gfx::geometry::{MeshKind, generate};
//!
//! let torus = generate(MeshKind::Torus);
//! assert!(torus.triangle_count() > 0);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::vertex::Vertex3D;

/// The primitive meshes a draw directive can reference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKind {
    Plane,
    Box,
    Cylinder,
    TaperedCylinder,
    Sphere,
    Torus,
    Prism,
}

impl MeshKind {
    /// Every kind, in the order the mesh library loads them
    pub const ALL: [MeshKind; 7] = [
        MeshKind::Plane,
        MeshKind::Box,
        MeshKind::TaperedCylinder,
        MeshKind::Sphere,
        MeshKind::Cylinder,
        MeshKind::Torus,
        MeshKind::Prism,
    ];

    pub fn name(self) -> &'static str {
        match self {
            MeshKind::Plane => "plane",
            MeshKind::Box => "box",
            MeshKind::Cylinder => "cylinder",
            MeshKind::TaperedCylinder => "tapered cylinder",
            MeshKind::Sphere => "sphere",
            MeshKind::Torus => "torus",
            MeshKind::Prism => "prism",
        }
    }
}

/// Tessellation used for the curved primitives
const RADIAL_SEGMENTS: u32 = 36;
const SPHERE_RINGS: u32 = 18;
const TORUS_TUBE_SEGMENTS: u32 = 16;

/// Generates the geometry for `kind` at the library's fixed resolution
pub fn generate(kind: MeshKind) -> GeometryData {
    match kind {
        MeshKind::Plane => generate_plane(2.0, 2.0, 1, 1),
        MeshKind::Box => generate_box(),
        MeshKind::Cylinder => generate_cylinder(1.0, 1.0, RADIAL_SEGMENTS),
        MeshKind::TaperedCylinder => generate_tapered_cylinder(1.0, 0.5, 1.0, RADIAL_SEGMENTS),
        MeshKind::Sphere => generate_sphere(RADIAL_SEGMENTS, SPHERE_RINGS),
        MeshKind::Torus => generate_torus(1.0, 0.2, RADIAL_SEGMENTS, TORUS_TUBE_SEGMENTS),
        MeshKind::Prism => generate_prism(),
    }
}

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Texture coordinates (u, v)
    pub tex_coords: Vec<[f32; 2]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            tex_coords: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Appends one vertex with all of its attributes, returning its index
    pub(crate) fn push_vertex(
        &mut self,
        position: [f32; 3],
        normal: [f32; 3],
        uv: [f32; 2],
    ) -> u32 {
        let index = self.vertices.len() as u32;
        self.vertices.push(position);
        self.normals.push(normal);
        self.tex_coords.push(uv);
        index
    }

    /// Interleaves the attribute streams into the renderer's vertex format
    pub fn to_vertices(&self) -> Vec<Vertex3D> {
        (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
                tex_coords: self.tex_coords.get(i).copied().unwrap_or([0.0, 0.0]),
            })
            .collect()
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
