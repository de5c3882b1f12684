//! Slice meshing.
//!
//! [`mesh_slice`] walks the non-air voxels of one slice, asks [`visibility`] which of
//! their faces can be seen, and emits a textured, tinted quad for each into the bucket
//! of the voxel's material class.
//!
//! Meshing only reads voxels. Neighbor reads cross into adjacent slices and chunks, so
//! the result is only correct once every allocated neighbor chunk is generated. The
//! buckets are always rebuilt from scratch; callers store them back into the slice.

use cgmath::Point3;
use log::trace;

use crate::engine_state::voxels::chunk::chunk_iteration::SliceBlockIterator;
use crate::engine_state::voxels::chunk::{Chunk, Slice};
use crate::engine_state::voxels::section::Section;

mod mesh;

pub use mesh::*;

/// Builds both mesh buckets of `slice`.
///
/// # Arguments
/// * `section` - The section owning `chunk`, for neighbor reads across chunks
/// * `chunk` - The chunk owning `slice`
/// * `slice` - The slice to mesh
/// * `atlas` - Texture offsets per material and face
///
/// # Returns
/// Fresh opaque and foliage buffers in world-space coordinates.
pub fn mesh_slice(section: &Section, chunk: &Chunk, slice: &Slice, atlas: &AtlasUvTable) -> SliceMeshes {
    let mut meshes = SliceMeshes::default();
    let tile_size = atlas.tile_size();

    for (local, block) in SliceBlockIterator::new(slice) {
        let (x, y, z) = (local.x as i32, local.y as i32, local.z as i32);
        let faces = visibility::visible_faces_at(section, chunk, slice, block, x, y, z);
        if faces == visibility::FaceMask::NONE {
            continue;
        }
        let Some(bucket) = meshes.bucket_mut(block.class()) else {
            continue;
        };

        let voxel = Point3::new(chunk.x + x as i64, chunk.y + y as i64, slice.z() + z as i64);
        for side in faces.sides() {
            let uv = atlas.uv_offset(block.material_id, side);
            bucket.add_face(&Face::new(voxel, side), uv, tile_size, block.tint);
        }
    }

    trace!(
        "Meshed slice {} of chunk ({}, {}): {} opaque, {} foliage faces",
        slice.index(),
        chunk.section_x,
        chunk.section_y,
        meshes.opaque.face_count(),
        meshes.foliage.face_count()
    );
    meshes
}

/// Builds the buckets of every slice of `chunk`, bottom to top.
pub fn mesh_chunk(section: &Section, chunk: &Chunk, atlas: &AtlasUvTable) -> Vec<SliceMeshes> {
    chunk
        .slices()
        .iter()
        .map(|slice| mesh_slice(section, chunk, slice, atlas))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::config::AtlasConfig;
    use crate::engine_state::voxels::block::block_type::BlockType;
    use crate::engine_state::voxels::block::Block;

    fn atlas() -> AtlasUvTable {
        AtlasUvTable::from_config(&AtlasConfig::default()).unwrap()
    }

    fn section_with_air_chunk() -> Section {
        let mut section = Section::new(0, 0);
        section.insert_chunk(Chunk::filled(section.position(), 3, 3, Block::AIR));
        section
    }

    fn set(section: &mut Section, slice: usize, x: usize, y: usize, z: usize, block_type: BlockType) {
        let slice = section.chunk_mut(3, 3).unwrap().slice_mut(slice).unwrap();
        let index = slice.ensure_palette_entry(Block::from_type(block_type));
        slice.set_index(x, y, z, index);
    }

    fn mesh(section: &Section, slice: usize) -> SliceMeshes {
        let chunk = section.chunk(3, 3).unwrap();
        mesh_slice(section, chunk, chunk.slice(slice).unwrap(), &atlas())
    }

    #[test]
    fn lone_block_emits_six_faces() {
        let mut section = section_with_air_chunk();
        set(&mut section, 5, 4, 4, 4, BlockType::STONE);
        let meshes = mesh(&section, 5);
        assert_eq!(meshes.opaque.face_count(), 6);
        assert!(meshes.foliage.is_empty());
    }

    #[test]
    fn touching_blocks_hide_their_shared_faces() {
        let mut section = section_with_air_chunk();
        set(&mut section, 5, 4, 4, 4, BlockType::STONE);
        set(&mut section, 5, 5, 4, 4, BlockType::STONE);
        assert_eq!(mesh(&section, 5).opaque.face_count(), 10);

        set(&mut section, 5, 5, 4, 4, BlockType::DIRT);
        assert_eq!(mesh(&section, 5).opaque.face_count(), 10);
    }

    #[test]
    fn stone_next_to_leaves_shows_its_face_and_leaves_show_all_six() {
        let mut section = section_with_air_chunk();
        set(&mut section, 5, 4, 4, 4, BlockType::STONE);
        set(&mut section, 5, 5, 4, 4, BlockType::OAK_LEAVES);
        let meshes = mesh(&section, 5);
        assert_eq!(meshes.opaque.face_count(), 6);
        assert_eq!(meshes.foliage.face_count(), 6);
        assert_eq!(meshes.draw_calls(), 2);
    }

    #[test]
    fn faces_are_culled_across_slice_boundaries() {
        let mut section = section_with_air_chunk();
        set(&mut section, 5, 4, 4, 15, BlockType::STONE);
        set(&mut section, 6, 4, 4, 0, BlockType::STONE);
        assert_eq!(mesh(&section, 5).opaque.face_count(), 5);
        assert_eq!(mesh(&section, 6).opaque.face_count(), 5);
    }

    #[test]
    fn vertices_are_in_world_space() {
        let mut section = section_with_air_chunk();
        set(&mut section, 2, 0, 0, 0, BlockType::BEDROCK);
        let meshes = mesh(&section, 2);
        let (min_x, min_y, min_z) = meshes.opaque.vertices.iter().fold(
            (f32::MAX, f32::MAX, f32::MAX),
            |(x, y, z), v| (x.min(v.position[0]), y.min(v.position[1]), z.min(v.position[2])),
        );
        assert_eq!((min_x, min_y, min_z), (48.0, 48.0, 32.0));
    }

    #[test]
    fn grass_faces_carry_its_tint() {
        let mut section = section_with_air_chunk();
        set(&mut section, 0, 8, 8, 8, BlockType::GRASS);
        let meshes = mesh(&section, 0);
        assert!(meshes
            .opaque
            .vertices
            .iter()
            .all(|v| v.tint == BlockType::GRASS.default_tint().to_array()));
    }
}
