//! Mesh buffers for voxel rendering.
//!
//! A [`Mesh`] is one indexed triangle list. Each slice owns two of them in a
//! [`SliceMeshes`]: opaque blocks and foliage are drawn with different state, so they
//! never share a buffer.

use std::ops::AddAssign;

use crate::engine_state::rendering::Vertex;
use crate::engine_state::voxels::block::block_type::MaterialClass;
use crate::engine_state::voxels::block::Tint;

use super::{atlas::FaceUv, face::Face};

/// Vertices emitted per face.
pub const VERTICES_PER_FACE: usize = 4;
/// Indices emitted per face.
pub const INDICES_PER_FACE: usize = 6;

/// An indexed triangle list of textured, tinted quads.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// Four vertices per face.
    pub vertices: Vec<Vertex>,
    /// Six indices per face, into `vertices`.
    pub indices: Vec<u32>,
}

impl Mesh {
    /// Appends a face.
    ///
    /// # Arguments
    /// * `face` - Geometry of the quad
    /// * `uv` - Atlas offsets of the face's base and overlay tiles
    /// * `tile_size` - Size of one atlas tile in UV units
    /// * `tint` - Multiplier attached to all four vertices
    pub fn add_face(&mut self, face: &Face, uv: FaceUv, tile_size: [f32; 2], tint: Tint) {
        let first_vertex = self.vertices.len() as u32;
        let normal = face.side.normal();

        for (corner, [u, v]) in face.corners.iter().zip(face.tile_corners) {
            let offset = [u * tile_size[0], v * tile_size[1]];
            self.vertices.push(Vertex::new(
                *corner,
                normal,
                [uv.base[0] + offset[0], uv.base[1] + offset[1]],
                [uv.overlay[0] + offset[0], uv.overlay[1] + offset[1]],
                tint,
            ));
        }
        self.indices.extend(face.indices(first_vertex));
    }

    /// Number of quads in the mesh.
    pub fn face_count(&self) -> usize {
        self.indices.len() / INDICES_PER_FACE
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// The vertex buffer as a flat `f32` slice, ready for upload.
    pub fn vertex_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }
}

/// The two geometry buckets of a slice.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SliceMeshes {
    /// Culled solid blocks.
    pub opaque: Mesh,
    /// Leaves and other double-sided materials.
    pub foliage: Mesh,
}

impl SliceMeshes {
    /// The bucket a material class is drawn from. Air has none.
    pub fn bucket_mut(&mut self, class: MaterialClass) -> Option<&mut Mesh> {
        match class {
            MaterialClass::Air => None,
            MaterialClass::Opaque => Some(&mut self.opaque),
            MaterialClass::Foliage => Some(&mut self.foliage),
        }
    }

    /// One indexed draw per non-empty bucket.
    pub fn draw_calls(&self) -> usize {
        usize::from(!self.opaque.is_empty()) + usize::from(!self.foliage.is_empty())
    }

    /// Faces in both buckets.
    pub fn face_count(&self) -> usize {
        self.opaque.face_count() + self.foliage.face_count()
    }
}

/// Totals over any number of slices.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MeshStats {
    /// Slices whose buffers were counted.
    pub slices: usize,
    /// Faces in opaque buckets.
    pub opaque_faces: usize,
    /// Faces in foliage buckets.
    pub foliage_faces: usize,
    /// Non-empty buckets.
    pub draw_calls: usize,
}

impl MeshStats {
    /// Statistics of a single slice.
    pub fn of(meshes: &SliceMeshes) -> Self {
        MeshStats {
            slices: 1,
            opaque_faces: meshes.opaque.face_count(),
            foliage_faces: meshes.foliage.face_count(),
            draw_calls: meshes.draw_calls(),
        }
    }

    /// All faces counted.
    pub fn total_faces(&self) -> usize {
        self.opaque_faces + self.foliage_faces
    }
}

impl AddAssign for MeshStats {
    fn add_assign(&mut self, other: MeshStats) {
        self.slices += other.slices;
        self.opaque_faces += other.opaque_faces;
        self.foliage_faces += other.foliage_faces;
        self.draw_calls += other.draw_calls;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::rendering::vertex::VERTEX_STRIDE_FLOATS;
    use crate::engine_state::voxels::block::block_side::BlockSide;
    use cgmath::Point3;

    fn top_face_mesh() -> Mesh {
        let mut mesh = Mesh::default();
        let uv = FaceUv {
            base: [0.5, 0.25],
            overlay: [0.0, 0.0],
        };
        mesh.add_face(
            &Face::new(Point3::new(1, 2, 3), BlockSide::TOP),
            uv,
            [0.125, 0.0625],
            Tint::LAND_GREEN,
        );
        mesh
    }

    #[test]
    fn a_face_is_four_vertices_and_two_triangles() {
        let mesh = top_face_mesh();
        assert_eq!(mesh.vertices.len(), VERTICES_PER_FACE);
        assert_eq!(mesh.indices.len(), INDICES_PER_FACE);
        assert_eq!(mesh.face_count(), 1);
        assert_eq!(mesh.vertex_floats().len(), VERTICES_PER_FACE * VERTEX_STRIDE_FLOATS);
    }

    #[test]
    fn vertices_carry_normal_tint_and_tile_uvs() {
        let mesh = top_face_mesh();
        for vertex in &mesh.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
            assert_eq!(vertex.tint, Tint::LAND_GREEN.to_array());
            assert_eq!(vertex.position[2], 4.0);
        }
        assert_eq!(mesh.vertices[0].uv, [0.5, 0.25]);
        assert_eq!(mesh.vertices[2].uv, [0.625, 0.3125]);
        assert_eq!(mesh.vertices[2].overlay_uv, [0.125, 0.0625]);
    }

    #[test]
    fn second_face_indices_follow_the_first() {
        let mut mesh = top_face_mesh();
        let first = mesh.clone();
        mesh.add_face(
            &Face::new(Point3::new(0, 0, 0), BlockSide::TOP),
            FaceUv::default(),
            [0.125, 0.0625],
            Tint::WHITE,
        );
        assert_eq!(&mesh.indices[..6], &first.indices[..]);
        assert!(mesh.indices[6..].iter().all(|&i| (4..8).contains(&i)));
    }

    #[test]
    fn draw_calls_count_non_empty_buckets() {
        let mut meshes = SliceMeshes::default();
        assert_eq!(meshes.draw_calls(), 0);
        meshes.foliage = top_face_mesh();
        assert_eq!(meshes.draw_calls(), 1);
        assert!(meshes.bucket_mut(MaterialClass::Air).is_none());

        let mut stats = MeshStats::default();
        stats += MeshStats::of(&meshes);
        stats += MeshStats::of(&meshes);
        assert_eq!(stats.foliage_faces, 2);
        assert_eq!(stats.draw_calls, 2);
        assert_eq!(stats.slices, 2);
    }
}
