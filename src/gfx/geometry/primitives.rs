//! # Primitive Shape Generation
//!
//! This module contains functions to generate the primitive shapes.
//! All shapes are generated with outward normals, texture coordinates and
//! counter-clockwise winding when viewed from outside.

use super::GeometryData;
use std::f32::consts::PI;

/// Generate a box centred at the origin
///
/// Returns a box with vertices from -0.5 to 0.5 on all axes.
/// Each face has proper normals pointing outward and UV coordinates from 0 to 1.
pub fn generate_box() -> GeometryData {
    let mut data = GeometryData::new();

    let positions = [
        // Front face
        [-0.5, -0.5,  0.5], [ 0.5, -0.5,  0.5], [ 0.5,  0.5,  0.5], [-0.5,  0.5,  0.5],
        // Back face
        [-0.5, -0.5, -0.5], [-0.5,  0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5, -0.5, -0.5],
        // Left face
        [-0.5, -0.5, -0.5], [-0.5, -0.5,  0.5], [-0.5,  0.5,  0.5], [-0.5,  0.5, -0.5],
        // Right face
        [ 0.5, -0.5,  0.5], [ 0.5, -0.5, -0.5], [ 0.5,  0.5, -0.5], [ 0.5,  0.5,  0.5],
        // Top face
        [-0.5,  0.5,  0.5], [ 0.5,  0.5,  0.5], [ 0.5,  0.5, -0.5], [-0.5,  0.5, -0.5],
        // Bottom face
        [-0.5, -0.5, -0.5], [ 0.5, -0.5, -0.5], [ 0.5, -0.5,  0.5], [-0.5, -0.5,  0.5],
    ];

    let tex_coords = [
        // Front, Back, Left, Right, Top, Bottom faces
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
        [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
        [0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0],
    ];

    let normals = [
        // Front face (positive Z)
        [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0], [0.0, 0.0, 1.0],
        // Back face (negative Z)
        [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0], [0.0, 0.0, -1.0],
        // Left face (negative X)
        [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0], [-1.0, 0.0, 0.0],
        // Right face (positive X)
        [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 0.0],
        // Top face (positive Y)
        [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0], [0.0, 1.0, 0.0],
        // Bottom face (negative Y)
        [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0], [0.0, -1.0, 0.0],
    ];

    data.vertices = positions.to_vec();
    data.tex_coords = tex_coords.to_vec();
    data.normals = normals.to_vec();

    // Two triangles per face
    data.indices = vec![
        0, 1, 2,    2, 3, 0,
        4, 5, 6,    6, 7, 4,
        8, 9, 10,   10, 11, 8,
        12, 13, 14, 14, 15, 12,
        16, 17, 18, 18, 19, 16,
        20, 21, 22, 22, 23, 20,
    ];

    data
}

/// Generate a UV sphere with specified resolution
///
/// # Arguments
/// * `longitude_segments` - Number of vertical segments (longitude lines)
/// * `latitude_segments` - Number of horizontal segments (latitude lines)
///
/// Returns a sphere of radius 1.0 centered at the origin.
pub fn generate_sphere(longitude_segments: u32, latitude_segments: u32) -> GeometryData {
    let mut data = GeometryData::new();

    let long_segs = longitude_segments.max(3);
    let lat_segs = latitude_segments.max(2);

    for lat in 0..=lat_segs {
        let theta = lat as f32 * PI / lat_segs as f32; // 0 to PI
        let sin_theta = theta.sin();
        let cos_theta = theta.cos();

        for long in 0..=long_segs {
            let phi = long as f32 * 2.0 * PI / long_segs as f32; // 0 to 2*PI
            let x = sin_theta * phi.cos();
            let y = cos_theta;
            let z = sin_theta * phi.sin();

            let u = long as f32 / long_segs as f32;
            let v = 1.0 - lat as f32 / lat_segs as f32;
            data.push_vertex([x, y, z], [x, y, z], [u, v]);
        }
    }

    for lat in 0..lat_segs {
        for long in 0..long_segs {
            let first = lat * (long_segs + 1) + long;
            let second = first + long_segs + 1;

            data.indices.extend_from_slice(&[first, first + 1, second]);
            data.indices.extend_from_slice(&[second, first + 1, second + 1]);
        }
    }

    data
}

/// Generate a plane in the XZ plane
///
/// # Arguments
/// * `width` - Size along X
/// * `depth` - Size along Z
/// * `width_segments` - Number of subdivisions along width
/// * `depth_segments` - Number of subdivisions along depth
///
/// Returns a plane centered at the origin with normal pointing up (positive Y).
pub fn generate_plane(
    width: f32,
    depth: f32,
    width_segments: u32,
    depth_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let w_segs = width_segments.max(1);
    let d_segs = depth_segments.max(1);

    for z in 0..=d_segs {
        let v = z as f32 / d_segs as f32;
        let pos_z = (v - 0.5) * depth;

        for x in 0..=w_segs {
            let u = x as f32 / w_segs as f32;
            let pos_x = (u - 0.5) * width;

            data.push_vertex([pos_x, 0.0, pos_z], [0.0, 1.0, 0.0], [u, 1.0 - v]);
        }
    }

    // Counter-clockwise when viewed from above
    for z in 0..d_segs {
        for x in 0..w_segs {
            let i = z * (w_segs + 1) + x;
            let next_row = i + w_segs + 1;

            data.indices.extend_from_slice(&[i, next_row, i + 1]);
            data.indices.extend_from_slice(&[next_row, next_row + 1, i + 1]);
        }
    }

    data
}

/// Generate a cylinder standing on the XZ plane
///
/// # Arguments
/// * `radius` - Radius of the cylinder
/// * `height` - Height of the cylinder (along the Y axis)
/// * `segments` - Number of circular segments
///
/// Returns a capped cylinder whose base is centred on the origin and whose
/// top sits at `y = height`.
pub fn generate_cylinder(radius: f32, height: f32, segments: u32) -> GeometryData {
    generate_tapered_cylinder(radius, radius, height, segments)
}

/// Generate a capped cylinder whose radius changes linearly with height
///
/// # Arguments
/// * `bottom_radius` - Radius at `y = 0`
/// * `top_radius` - Radius at `y = height`
/// * `height` - Height along the Y axis
/// * `segments` - Number of circular segments
pub fn generate_tapered_cylinder(
    bottom_radius: f32,
    top_radius: f32,
    height: f32,
    segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let segs = segments.max(3);

    // Slanted side normal: perpendicular to the side's slope in the radial plane
    let slope = bottom_radius - top_radius;
    let normal_len = (height * height + slope * slope).sqrt().max(f32::EPSILON);
    let radial = height / normal_len;
    let vertical = slope / normal_len;

    for i in 0..=segs {
        let angle = i as f32 * 2.0 * PI / segs as f32;
        let cos_a = angle.cos();
        let sin_a = angle.sin();
        let u = i as f32 / segs as f32;
        let normal = [cos_a * radial, vertical, sin_a * radial];

        data.push_vertex(
            [bottom_radius * cos_a, 0.0, bottom_radius * sin_a],
            normal,
            [u, 0.0],
        );
        data.push_vertex([top_radius * cos_a, height, top_radius * sin_a], normal, [u, 1.0]);
    }

    for i in 0..segs {
        let bottom_current = i * 2;
        let top_current = bottom_current + 1;
        let bottom_next = bottom_current + 2;
        let top_next = bottom_next + 1;

        data.indices.extend_from_slice(&[bottom_current, top_current, bottom_next]);
        data.indices.extend_from_slice(&[top_current, top_next, bottom_next]);
    }

    push_cap(&mut data, bottom_radius, 0.0, segs, false);
    push_cap(&mut data, top_radius, height, segs, true);

    data
}

/// Adds a flat disc cap with its own vertices so the edge stays sharp
fn push_cap(data: &mut GeometryData, radius: f32, y: f32, segments: u32, facing_up: bool) {
    let normal = if facing_up { [0.0, 1.0, 0.0] } else { [0.0, -1.0, 0.0] };
    let center = data.push_vertex([0.0, y, 0.0], normal, [0.5, 0.5]);

    let first_rim = data.vertices.len() as u32;
    for i in 0..=segments {
        let angle = i as f32 * 2.0 * PI / segments as f32;
        let (sin_a, cos_a) = angle.sin_cos();
        data.push_vertex(
            [radius * cos_a, y, radius * sin_a],
            normal,
            [0.5 + 0.5 * cos_a, 0.5 + 0.5 * sin_a],
        );
    }

    for i in 0..segments {
        let current = first_rim + i;
        let next = current + 1;
        if facing_up {
            data.indices.extend_from_slice(&[center, next, current]);
        } else {
            data.indices.extend_from_slice(&[center, current, next]);
        }
    }
}

/// Generate a torus lying in the XY plane
///
/// # Arguments
/// * `major_radius` - Distance from the centre to the middle of the tube
/// * `minor_radius` - Radius of the tube
/// * `ring_segments` - Segments around the Z axis
/// * `tube_segments` - Segments around the tube
pub fn generate_torus(
    major_radius: f32,
    minor_radius: f32,
    ring_segments: u32,
    tube_segments: u32,
) -> GeometryData {
    let mut data = GeometryData::new();

    let rings = ring_segments.max(3);
    let tubes = tube_segments.max(3);

    for i in 0..=rings {
        let u = i as f32 * 2.0 * PI / rings as f32;
        let (sin_u, cos_u) = u.sin_cos();

        for j in 0..=tubes {
            let v = j as f32 * 2.0 * PI / tubes as f32;
            let (sin_v, cos_v) = v.sin_cos();

            let normal = [cos_v * cos_u, cos_v * sin_u, sin_v];
            let position = [
                (major_radius + minor_radius * cos_v) * cos_u,
                (major_radius + minor_radius * cos_v) * sin_u,
                minor_radius * sin_v,
            ];
            data.push_vertex(
                position,
                normal,
                [i as f32 / rings as f32, j as f32 / tubes as f32],
            );
        }
    }

    for i in 0..rings {
        for j in 0..tubes {
            let a = i * (tubes + 1) + j;
            let b = a + tubes + 1;

            data.indices.extend_from_slice(&[a, b, a + 1]);
            data.indices.extend_from_slice(&[b, b + 1, a + 1]);
        }
    }

    data
}

/// Generate a triangular prism inside the unit box
///
/// The triangle lies in the XY plane with its apex at `y = 0.5` and is
/// extruded from `z = -0.5` to `z = 0.5`.
pub fn generate_prism() -> GeometryData {
    let mut data = GeometryData::new();

    let corners: [[f32; 2]; 3] = [[-0.5, -0.5], [0.5, -0.5], [0.0, 0.5]];

    // Front and back triangles
    for (z, normal) in [(0.5, [0.0, 0.0, 1.0]), (-0.5, [0.0, 0.0, -1.0])] {
        let base = data.vertices.len() as u32;
        for [x, y] in corners {
            data.push_vertex([x, y, z], normal, [x + 0.5, y + 0.5]);
        }
        if z > 0.0 {
            data.indices.extend_from_slice(&[base, base + 1, base + 2]);
        } else {
            data.indices.extend_from_slice(&[base, base + 2, base + 1]);
        }
    }

    // One quad per edge, in the triangle's counter-clockwise order
    for edge in 0..3 {
        let [px, py] = corners[edge];
        let [qx, qy] = corners[(edge + 1) % 3];
        let (dx, dy) = (qx - px, qy - py);
        let len = (dx * dx + dy * dy).sqrt();
        let normal = [dy / len, -dx / len, 0.0];

        let p_back = data.push_vertex([px, py, -0.5], normal, [0.0, 0.0]);
        let q_back = data.push_vertex([qx, qy, -0.5], normal, [1.0, 0.0]);
        let q_front = data.push_vertex([qx, qy, 0.5], normal, [1.0, 1.0]);
        let p_front = data.push_vertex([px, py, 0.5], normal, [0.0, 1.0]);

        data.indices.extend_from_slice(&[p_back, q_back, q_front]);
        data.indices.extend_from_slice(&[q_front, p_front, p_back]);
    }

    data
}
