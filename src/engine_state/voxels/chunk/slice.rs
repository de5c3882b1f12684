//! # Slice Module
//!
//! A slice is a 16x16x16 cube of voxels and the unit of palette compression and meshing.
//!
//! ## Storage
//!
//! Instead of one [`Block`] per voxel, a slice keeps:
//! - `palette`: the distinct blocks present in the slice, in insertion order
//! - `blocks`: 4096 [`PaletteIndex`] values, one per voxel, addressed by
//!   `x + 16 * y + 256 * z`
//!
//! A slice whose palette has a single entry is entirely that block; lookups skip the
//! index array altogether.
//!
//! An empty palette means the slice was never populated. Reading from it is a fault
//! that is logged and answered with air. The first write seeds the palette with air, so
//! the rest of the slice keeps reading as air.

use log::error;
use thiserror::Error;

use crate::engine_state::rendering::meshing::SliceMeshes;
use crate::engine_state::voxels::block::{Block, PaletteIndex, AIR_BLOCK};

/// The edge length of a slice in voxels.
pub const SLICE_DIMENSION: i32 = 16;
/// The number of voxels in one Z plane of a slice.
pub const SLICE_PLANE_SIZE: i32 = SLICE_DIMENSION * SLICE_DIMENSION;
/// The number of voxels in a slice.
pub const SLICE_SIZE: usize = (SLICE_PLANE_SIZE * SLICE_DIMENSION) as usize;

/// Converts slice-local coordinates (each in `0..16`) into an offset in the index array.
pub const fn block_index(x: usize, y: usize, z: usize) -> usize {
    x + SLICE_DIMENSION as usize * y + SLICE_PLANE_SIZE as usize * z
}

/// Why a voxel lookup could not be answered from the palette.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum PaletteFault {
    /// The slice has not been populated yet.
    #[error("slice {slice_index} has an empty palette")]
    EmptyPalette {
        /// Height index of the faulty slice.
        slice_index: u8,
    },
    /// A stored index does not point into the palette.
    #[error("slice {slice_index} stores palette index {index} but its palette has {len} entries")]
    IndexOutOfPalette {
        /// Height index of the faulty slice.
        slice_index: u8,
        /// The offending stored index.
        index: PaletteIndex,
        /// Palette length at the time of the lookup.
        len: usize,
    },
}

/// A 16x16x16 palette-compressed cube of voxels plus its two mesh buffers.
pub struct Slice {
    /// Height index within the owning chunk (`0..24`).
    index: u8,
    /// Distinct blocks present in this slice.
    palette: Vec<Block>,
    /// One palette index per voxel.
    blocks: Box<[PaletteIndex]>,
    /// The opaque and foliage geometry last built for this slice.
    pub meshes: SliceMeshes,
}

impl Slice {
    /// Creates an unpopulated slice at the given height index.
    ///
    /// The palette is empty until [`Slice::set_palette`] is called.
    pub fn new(index: u8) -> Self {
        Slice {
            index,
            palette: Vec::new(),
            blocks: vec![0; SLICE_SIZE].into_boxed_slice(),
            meshes: SliceMeshes::default(),
        }
    }

    /// Creates a slice entirely made of `block`.
    pub fn uniform(index: u8, block: Block) -> Self {
        let mut slice = Slice::new(index);
        slice.palette.push(block);
        slice
    }

    /// Height index within the owning chunk.
    pub fn index(&self) -> u8 {
        self.index
    }

    /// World Z of the lowest voxel layer in this slice.
    pub fn z(&self) -> i64 {
        SLICE_DIMENSION as i64 * self.index as i64
    }

    /// The slice's palette.
    pub fn palette(&self) -> &[Block] {
        &self.palette
    }

    /// Replaces the palette. Stored indices are left untouched.
    pub fn set_palette(&mut self, palette: Vec<Block>) {
        self.palette = palette;
    }

    /// Whether the slice is a single material (single-entry palette).
    pub fn is_uniform(&self) -> bool {
        self.palette.len() == 1
    }

    /// Whether nothing but air can be read from this slice.
    pub fn is_all_air(&self) -> bool {
        if self.palette.is_empty() {
            return true;
        }
        if self.is_uniform() {
            return self.palette[0].is_air();
        }
        self.blocks
            .iter()
            .all(|&i| self.palette.get(i as usize).map_or(true, Block::is_air))
    }

    /// Returns the block at slice-local coordinates.
    ///
    /// # Errors
    /// A [`PaletteFault`] if the palette is empty or the stored index is out of range.
    pub fn lookup(&self, x: usize, y: usize, z: usize) -> Result<&Block, PaletteFault> {
        match self.palette.len() {
            0 => Err(PaletteFault::EmptyPalette {
                slice_index: self.index,
            }),
            1 => Ok(&self.palette[0]),
            len => {
                let index = self.blocks[block_index(x, y, z)];
                self.palette
                    .get(index as usize)
                    .ok_or(PaletteFault::IndexOutOfPalette {
                        slice_index: self.index,
                        index,
                        len,
                    })
            }
        }
    }

    /// Returns the block at slice-local coordinates, logging faults and answering air.
    pub fn block_or_air(&self, x: usize, y: usize, z: usize) -> &Block {
        match self.lookup(x, y, z) {
            Ok(block) => block,
            Err(fault) => {
                error!("Voxel lookup at ({x}, {y}, {z}) failed: {fault}");
                &AIR_BLOCK
            }
        }
    }

    /// The raw palette index stored for a voxel.
    pub fn index_at(&self, x: usize, y: usize, z: usize) -> PaletteIndex {
        self.blocks[block_index(x, y, z)]
    }

    /// Overwrites the palette index stored for a voxel.
    pub fn set_index(&mut self, x: usize, y: usize, z: usize, index: PaletteIndex) {
        self.blocks[block_index(x, y, z)] = index;
    }

    /// Mutable access to the palette index stored for a voxel.
    ///
    /// Indices are ignored while the palette has fewer than two entries; call
    /// [`Slice::widen_palette`] first to make a write through the slot visible.
    pub fn index_slot_mut(&mut self, x: usize, y: usize, z: usize) -> &mut PaletteIndex {
        &mut self.blocks[block_index(x, y, z)]
    }

    /// Finds the palette index of an identical block.
    pub fn palette_index_of(&self, block: &Block) -> Option<PaletteIndex> {
        self.palette
            .iter()
            .position(|entry| entry == block)
            .map(|i| i as PaletteIndex)
    }

    /// Returns the palette index of `block`, appending it to the palette if needed.
    ///
    /// An empty palette is seeded with air first. Appending to a single-entry palette
    /// ends the uniform fast path, so every stored index is first reset to that entry
    /// (index `0`).
    pub fn ensure_palette_entry(&mut self, block: Block) -> PaletteIndex {
        if self.palette.is_empty() {
            self.blocks.fill(0);
            self.palette.push(Block::AIR);
        }
        if let Some(index) = self.palette_index_of(&block) {
            return index;
        }
        if self.is_uniform() {
            self.blocks.fill(0);
        }
        self.palette.push(block);
        (self.palette.len() - 1) as PaletteIndex
    }

    /// Installs `palette` on a slice that is uniform or unpopulated, so stored indices
    /// are read again.
    ///
    /// The slice keeps reading as its current block everywhere (air if it had no
    /// palette); that block is appended to `palette` if missing. Slices with two or more
    /// entries are left untouched.
    pub fn widen_palette(&mut self, palette: Vec<Block>) {
        if self.palette.len() > 1 {
            return;
        }
        let current = self.palette.first().copied().unwrap_or(Block::AIR);
        self.palette = palette;
        let index = self.ensure_palette_entry(current);
        self.blocks.fill(index);
    }

    /// Checks that the palette is non-empty and every stored index points into it.
    pub fn check_integrity(&self) -> bool {
        if self.palette.is_empty() {
            return false;
        }
        if self.is_uniform() {
            return true;
        }
        let len = self.palette.len();
        self.blocks.iter().all(|&i| (i as usize) < len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine_state::voxels::block::block_type::BlockType;

    #[test]
    fn index_layout_is_x_major() {
        assert_eq!(block_index(1, 0, 0), 1);
        assert_eq!(block_index(0, 1, 0), 16);
        assert_eq!(block_index(0, 0, 1), 256);
        assert_eq!(block_index(15, 15, 15), SLICE_SIZE - 1);
    }

    #[test]
    fn empty_palette_lookup_is_a_fault_answered_with_air() {
        let slice = Slice::new(3);
        assert_eq!(
            slice.lookup(0, 0, 0),
            Err(PaletteFault::EmptyPalette { slice_index: 3 })
        );
        assert!(slice.block_or_air(4, 5, 6).is_air());
        assert!(!slice.check_integrity());
    }

    #[test]
    fn uniform_slice_ignores_stored_indices() {
        let mut slice = Slice::uniform(0, Block::from_type(BlockType::STONE));
        slice.set_index(2, 2, 2, 9);
        assert_eq!(slice.block_or_air(2, 2, 2).material_id, BlockType::STONE.id());
        assert!(slice.check_integrity());
    }

    #[test]
    fn out_of_palette_index_is_reported() {
        let mut slice = Slice::new(1);
        slice.set_palette(vec![Block::AIR, Block::from_type(BlockType::DIRT)]);
        slice.set_index(0, 0, 0, 5);
        assert_eq!(
            slice.lookup(0, 0, 0),
            Err(PaletteFault::IndexOutOfPalette {
                slice_index: 1,
                index: 5,
                len: 2
            })
        );
        assert!(!slice.check_integrity());
    }

    #[test]
    fn ensure_palette_entry_reuses_and_appends() {
        let mut slice = Slice::uniform(0, Block::AIR);
        let dirt = Block::from_type(BlockType::DIRT);
        let index = slice.ensure_palette_entry(dirt);
        assert_eq!(index, 1);
        assert_eq!(slice.ensure_palette_entry(dirt), 1);
        assert_eq!(slice.ensure_palette_entry(Block::AIR), 0);

        slice.set_index(3, 4, 5, index);
        assert_eq!(slice.block_or_air(3, 4, 5), &dirt);
        assert!(slice.block_or_air(0, 0, 0).is_air());
        assert!(slice.check_integrity());
        assert!(!slice.is_all_air());
    }

    #[test]
    fn first_write_to_an_unpopulated_slice_keeps_the_rest_air() {
        let mut slice = Slice::new(0);
        let log = Block::from_type(BlockType::OAK_LOG);
        let index = slice.ensure_palette_entry(log);
        slice.set_index(3, 3, 3, index);

        assert_eq!(index, 1);
        assert_eq!(slice.palette(), &[Block::AIR, log]);
        assert_eq!(slice.block_or_air(3, 3, 3), &log);
        assert!(slice.block_or_air(10, 10, 10).is_air());
        assert!(slice.check_integrity());
    }

    #[test]
    fn widened_slice_reads_its_indices() {
        let stone = Block::from_type(BlockType::STONE);
        let palette = vec![Block::AIR, Block::from_type(BlockType::DIRT)];

        let mut slice = Slice::uniform(2, stone);
        slice.widen_palette(palette.clone());
        assert_eq!(slice.palette(), &[Block::AIR, Block::from_type(BlockType::DIRT), stone]);
        assert_eq!(slice.block_or_air(7, 7, 7), &stone);

        *slice.index_slot_mut(1, 2, 3) = 1;
        assert_eq!(slice.block_or_air(1, 2, 3).material_id, BlockType::DIRT.id());
        assert!(slice.check_integrity());

        let mut empty = Slice::new(4);
        empty.widen_palette(palette.clone());
        assert_eq!(empty.palette(), palette.as_slice());
        assert!(empty.is_all_air());

        let before = slice.palette().to_vec();
        slice.widen_palette(vec![stone]);
        assert_eq!(slice.palette(), before.as_slice());
    }

    #[test]
    fn z_offset_follows_height_index() {
        assert_eq!(Slice::new(0).z(), 0);
        assert_eq!(Slice::new(23).z(), 368);
    }
}
