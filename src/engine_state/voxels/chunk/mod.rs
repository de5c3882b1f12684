//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x16x384 column of voxels made of 24
//! stacked [`Slice`]s.
//!
//! A chunk knows its position twice:
//! - in chunk-grid coordinates inside its section (`section_x`, `section_y`, `0..16`)
//! - in absolute world block coordinates (`x`, `y`), the world position of its
//!   lowest-corner voxel
//!
//! The shape of a chunk never changes after creation. Voxel contents are mutated through
//! the world's global accessors.

use cgmath::Point2;

use super::block::Block;
use super::section::{chunk_id, SECTION_BLOCK_DIMENSION};

pub mod chunk_iteration;
pub mod slice;

pub use slice::Slice;
use slice::SLICE_DIMENSION;

/// The width and depth of a chunk in blocks.
pub const CHUNK_DIMENSION: i32 = SLICE_DIMENSION;
/// The number of slices stacked in a chunk.
pub const SLICES_PER_CHUNK: usize = 24;
/// The height of a chunk in blocks.
pub const CHUNK_HEIGHT: i32 = SLICE_DIMENSION * SLICES_PER_CHUNK as i32;

/// A vertical column of 24 slices.
pub struct Chunk {
    /// Chunk-grid X inside the owning section (`0..16`).
    pub section_x: u32,
    /// Chunk-grid Y inside the owning section (`0..16`).
    pub section_y: u32,
    /// World X of the chunk's first voxel column.
    pub x: i64,
    /// World Y of the chunk's first voxel column.
    pub y: i64,
    slices: Vec<Slice>,
}

impl Chunk {
    /// Creates an unpopulated chunk at `(section_x, section_y)` of the section whose
    /// section-grid position is `section_position`.
    ///
    /// Every slice starts with an empty palette.
    pub fn new(section_position: Point2<i64>, section_x: u32, section_y: u32) -> Self {
        Chunk {
            section_x,
            section_y,
            x: section_position.x * SECTION_BLOCK_DIMENSION
                + CHUNK_DIMENSION as i64 * section_x as i64,
            y: section_position.y * SECTION_BLOCK_DIMENSION
                + CHUNK_DIMENSION as i64 * section_y as i64,
            slices: (0..SLICES_PER_CHUNK as u8).map(Slice::new).collect(),
        }
    }

    /// Creates a chunk where every slice is uniformly `block`.
    pub fn filled(section_position: Point2<i64>, section_x: u32, section_y: u32, block: Block) -> Self {
        let mut chunk = Chunk::new(section_position, section_x, section_y);
        for slice in chunk.slices.iter_mut() {
            slice.set_palette(vec![block]);
        }
        chunk
    }

    /// The slot of this chunk in its section's chunk table.
    pub fn id(&self) -> usize {
        chunk_id(self.section_x, self.section_y)
    }

    /// All slices, bottom to top.
    pub fn slices(&self) -> &[Slice] {
        &self.slices
    }

    /// Mutable access to all slices, bottom to top.
    pub fn slices_mut(&mut self) -> &mut [Slice] {
        &mut self.slices
    }

    /// The slice at a height index, if it is in `0..24`.
    pub fn slice(&self, index: usize) -> Option<&Slice> {
        self.slices.get(index)
    }

    /// Mutable access to the slice at a height index.
    pub fn slice_mut(&mut self, index: usize) -> Option<&mut Slice> {
        self.slices.get_mut(index)
    }
}
