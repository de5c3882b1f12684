//! Face visibility for a single voxel.
//!
//! - Opaque voxels are culled face by face: a face is kept when the neighbor across it
//!   is air or foliage and is not the same material.
//! - Foliage voxels are all or nothing: if any of the six neighbors is air, every face
//!   is kept, so leaves render from both sides.

use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::block::block_type::MaterialClass;
use crate::engine_state::voxels::block::Block;
use crate::engine_state::voxels::chunk::{Chunk, Slice};
use crate::engine_state::voxels::section::Section;

/// Which of the six faces of a voxel are emitted, indexed by `BlockSide as usize`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FaceMask([bool; 6]);

impl FaceMask {
    /// Every face.
    pub const ALL: FaceMask = FaceMask([true; 6]);
    /// No face.
    pub const NONE: FaceMask = FaceMask([false; 6]);

    /// Whether `side` is emitted.
    pub fn contains(self, side: BlockSide) -> bool {
        self.0[side as usize]
    }

    /// The emitted sides in atlas order.
    pub fn sides(self) -> impl Iterator<Item = BlockSide> {
        BlockSide::all().into_iter().filter(move |&side| self.contains(side))
    }

    /// Number of emitted faces.
    pub fn count(self) -> usize {
        self.0.iter().filter(|&&visible| visible).count()
    }
}

/// Decides which faces of `block` are visible, given a way to read its neighbors.
///
/// `neighbor(side)` must return the block across `side`.
pub fn visible_faces<'a>(block: &Block, mut neighbor: impl FnMut(BlockSide) -> &'a Block) -> FaceMask {
    match block.class() {
        MaterialClass::Air => FaceMask::NONE,
        MaterialClass::Foliage => {
            if BlockSide::all().into_iter().any(|side| neighbor(side).is_air()) {
                FaceMask::ALL
            } else {
                FaceMask::NONE
            }
        }
        MaterialClass::Opaque => {
            let mut mask = FaceMask::NONE;
            for side in BlockSide::all() {
                let other = neighbor(side);
                mask.0[side as usize] =
                    other.class().is_transparent() && other.material_id != block.material_id;
            }
            mask
        }
    }
}

/// Visible faces of the voxel at slice-local `(x, y, z)`, reading neighbors across
/// slice and chunk boundaries.
pub fn visible_faces_at(
    section: &Section,
    chunk: &Chunk,
    slice: &Slice,
    block: &Block,
    x: i32,
    y: i32,
    z: i32,
) -> FaceMask {
    visible_faces(block, |side| {
        let offset = side.offset();
        section.local_block(chunk, slice, x + offset.x, y + offset.y, z + offset.z)
    })
}
