//! Vertex data structures and layouts for voxel rendering.
//!
//! This module defines the interleaved vertex format the mesher emits and the attribute
//! table a rendering backend needs to bind it.

use cgmath::Point3;

use crate::engine_state::voxels::block::Tint;

/// The number of `f32` values in one vertex.
pub const VERTEX_STRIDE_FLOATS: usize = 13;

/// A vertex of a voxel face.
///
/// # Memory Layout
/// Thirteen interleaved `f32`s, no padding:
/// - Position: 3x f32 (world space, Z up)
/// - Normal: 3x f32 (outward unit normal of the face)
/// - Base UV: 2x f32 (normalized atlas coordinates)
/// - Overlay UV: 2x f32 (`0, 0` when the material has no overlay)
/// - Tint: 3x f32 (RGB multiplier)
///
/// Total size: 52 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space.
    pub position: [f32; 3],
    /// Outward normal of the face this vertex belongs to.
    pub normal: [f32; 3],
    /// Base texture coordinates.
    pub uv: [f32; 2],
    /// Overlay texture coordinates.
    pub overlay_uv: [f32; 2],
    /// RGB multiplier.
    pub tint: [f32; 3],
}

/// Where a vertex attribute lives inside the interleaved layout.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexAttribute {
    /// Shader input location.
    pub location: u32,
    /// Offset from the start of the vertex, in floats.
    pub offset: usize,
    /// Number of `f32` components.
    pub components: usize,
}

impl Vertex {
    /// Attribute table for [`Vertex`], in location order.
    ///
    /// - `location = 0`: position (vec3<f32>)
    /// - `location = 1`: normal (vec3<f32>)
    /// - `location = 2`: base uv (vec2<f32>)
    /// - `location = 3`: overlay uv (vec2<f32>)
    /// - `location = 4`: tint (vec3<f32>)
    pub const ATTRIBUTES: [VertexAttribute; 5] = [
        VertexAttribute { location: 0, offset: 0, components: 3 },
        VertexAttribute { location: 1, offset: 3, components: 3 },
        VertexAttribute { location: 2, offset: 6, components: 2 },
        VertexAttribute { location: 3, offset: 8, components: 2 },
        VertexAttribute { location: 4, offset: 10, components: 3 },
    ];

    /// Creates a new vertex.
    ///
    /// # Arguments
    /// * `position` - World-space position
    /// * `normal` - Outward normal of the face
    /// * `uv` - Base atlas coordinates
    /// * `overlay_uv` - Overlay atlas coordinates
    /// * `tint` - Tint of the block the face belongs to
    pub fn new(
        position: Point3<f32>,
        normal: [f32; 3],
        uv: [f32; 2],
        overlay_uv: [f32; 2],
        tint: Tint,
    ) -> Self {
        Vertex {
            position: [position.x, position.y, position.z],
            normal,
            uv,
            overlay_uv,
            tint: tint.to_array(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vertex_is_thirteen_tightly_packed_floats() {
        assert_eq!(
            std::mem::size_of::<Vertex>(),
            VERTEX_STRIDE_FLOATS * std::mem::size_of::<f32>()
        );
        let covered: usize = Vertex::ATTRIBUTES.iter().map(|a| a.components).sum();
        assert_eq!(covered, VERTEX_STRIDE_FLOATS);
    }

    #[test]
    fn attribute_offsets_match_field_order() {
        let vertex = Vertex::new(
            Point3::new(1.0, 2.0, 3.0),
            [0.0, 0.0, 1.0],
            [0.25, 0.5],
            [0.75, 1.0],
            Tint::new(0.1, 0.2, 0.3),
        );
        let floats: &[f32] = bytemuck::cast_slice(std::slice::from_ref(&vertex));
        let position = Vertex::ATTRIBUTES[0];
        assert_eq!(&floats[position.offset..position.offset + 3], &[1.0, 2.0, 3.0]);
        let overlay = Vertex::ATTRIBUTES[3];
        assert_eq!(&floats[overlay.offset..overlay.offset + 2], &[0.75, 1.0]);
        let tint = Vertex::ATTRIBUTES[4];
        assert_eq!(&floats[tint.offset..tint.offset + 3], &[0.1, 0.2, 0.3]);
    }
}
