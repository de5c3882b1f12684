//! # Section Module
//!
//! A section is the bounded play area: a fixed 16x16 grid of optional chunks
//! (256x256x384 voxels). Exactly one section is active per world.
//!
//! ## Neighbor Resolution
//!
//! The mesher asks for voxels one step outside the slice it is working on.
//! [`Section::local_block`] redirects those queries to the neighboring slice or chunk.
//! Crossing the section edge, reaching a missing chunk, or stepping below the first or
//! above the last slice all yield air: the world is open on every side.

use cgmath::Point2;

use super::block::{Block, AIR_BLOCK};
use super::chunk::slice::SLICE_DIMENSION;
use super::chunk::{Chunk, Slice, CHUNK_DIMENSION, SLICES_PER_CHUNK};

/// The number of chunks along each horizontal axis of a section.
pub const SECTION_DIMENSION: u32 = 16;
/// The number of chunk slots in a section.
pub const SECTION_CHUNK_COUNT: usize = (SECTION_DIMENSION * SECTION_DIMENSION) as usize;
/// The width of a section in blocks.
pub const SECTION_BLOCK_DIMENSION: i64 = SECTION_DIMENSION as i64 * CHUNK_DIMENSION as i64;

/// The slot of the chunk at chunk-grid position `(x, y)`.
pub const fn chunk_id(x: u32, y: u32) -> usize {
    (x + SECTION_DIMENSION * y) as usize
}

/// A 16x16 grid of chunk slots. Absent chunks behave as all-air.
pub struct Section {
    /// Section-grid X. The section spans world X `x * 256 .. x * 256 + 256`.
    pub x: i64,
    /// Section-grid Y.
    pub y: i64,
    chunks: Vec<Option<Box<Chunk>>>,
}

impl Section {
    /// Creates a section with every chunk slot empty.
    pub fn new(x: i64, y: i64) -> Self {
        Section {
            x,
            y,
            chunks: (0..SECTION_CHUNK_COUNT).map(|_| None).collect(),
        }
    }

    /// The section-grid position, as expected by [`Chunk::new`].
    pub fn position(&self) -> Point2<i64> {
        Point2::new(self.x, self.y)
    }

    /// World block coordinates of the section's lowest corner.
    pub fn origin(&self) -> Point2<i64> {
        Point2::new(self.x * SECTION_BLOCK_DIMENSION, self.y * SECTION_BLOCK_DIMENSION)
    }

    /// The chunk at chunk-grid position `(x, y)`, if allocated.
    pub fn chunk(&self, x: u32, y: u32) -> Option<&Chunk> {
        if x >= SECTION_DIMENSION || y >= SECTION_DIMENSION {
            return None;
        }
        self.chunks[chunk_id(x, y)].as_deref()
    }

    /// Mutable access to the chunk at chunk-grid position `(x, y)`.
    pub fn chunk_mut(&mut self, x: u32, y: u32) -> Option<&mut Chunk> {
        if x >= SECTION_DIMENSION || y >= SECTION_DIMENSION {
            return None;
        }
        self.chunks[chunk_id(x, y)].as_deref_mut()
    }

    /// Places a chunk in the slot named by its own `section_x`/`section_y`.
    ///
    /// # Returns
    /// The chunk previously in that slot, if any. A chunk whose grid position lies
    /// outside the section is handed back unchanged.
    pub fn insert_chunk(&mut self, chunk: Chunk) -> Option<Box<Chunk>> {
        if chunk.section_x >= SECTION_DIMENSION || chunk.section_y >= SECTION_DIMENSION {
            return Some(Box::new(chunk));
        }
        let id = chunk.id();
        self.chunks[id].replace(Box::new(chunk))
    }

    /// All allocated chunks in slot order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.iter().filter_map(|slot| slot.as_deref())
    }

    /// The number of allocated chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.iter().filter(|slot| slot.is_some()).count()
    }

    /// The slice at `slice_index` of the chunk offset by `(dx, dy)` from `chunk`.
    ///
    /// `None` when that chunk would lie outside the section or is not allocated.
    fn neighbor_slice(&self, chunk: &Chunk, dx: i32, dy: i32, slice_index: usize) -> Option<&Slice> {
        let x = chunk.section_x.checked_add_signed(dx)?;
        let y = chunk.section_y.checked_add_signed(dy)?;
        self.chunk(x, y)?.slice(slice_index)
    }

    /// Reads a voxel relative to `slice` of `chunk`, following it into neighbors.
    ///
    /// `(x, y, z)` are slice-local but may fall outside `0..16`. They are reduced into
    /// the slice with a floor modulo, then every out-of-range axis redirects the query:
    /// X and Y to the horizontally adjacent chunk (same slice index), Z to the slice
    /// below or above in the same chunk. The checks run in X, Y, Z order against the
    /// original chunk and slice; the last one that applies decides the slice read.
    ///
    /// The reduced coordinates are used as-is in the redirected slice, they are not
    /// re-derived from the neighbor chunk's origin. Chunks all share the same local
    /// grid, so this lands on the adjacent voxel.
    ///
    /// Edge of the section, missing chunks and slices beyond `0..24` yield air.
    /// Faulty palettes are logged and yield air.
    pub fn local_block<'a>(
        &'a self,
        chunk: &'a Chunk,
        slice: &'a Slice,
        x: i32,
        y: i32,
        z: i32,
    ) -> &'a Block {
        let local_x = x.rem_euclid(SLICE_DIMENSION) as usize;
        let local_y = y.rem_euclid(SLICE_DIMENSION) as usize;
        let local_z = z.rem_euclid(SLICE_DIMENSION) as usize;
        let slice_index = slice.index() as usize;

        let mut concerned_slice = slice;
        if x < 0 {
            match self.neighbor_slice(chunk, -1, 0, slice_index) {
                Some(neighbor) => concerned_slice = neighbor,
                None => return &AIR_BLOCK,
            }
        }
        if x >= SLICE_DIMENSION {
            match self.neighbor_slice(chunk, 1, 0, slice_index) {
                Some(neighbor) => concerned_slice = neighbor,
                None => return &AIR_BLOCK,
            }
        }
        if y < 0 {
            match self.neighbor_slice(chunk, 0, -1, slice_index) {
                Some(neighbor) => concerned_slice = neighbor,
                None => return &AIR_BLOCK,
            }
        }
        if y >= SLICE_DIMENSION {
            match self.neighbor_slice(chunk, 0, 1, slice_index) {
                Some(neighbor) => concerned_slice = neighbor,
                None => return &AIR_BLOCK,
            }
        }
        if z < 0 {
            if slice_index == 0 {
                return &AIR_BLOCK;
            }
            match chunk.slice(slice_index - 1) {
                Some(below) => concerned_slice = below,
                None => return &AIR_BLOCK,
            }
        }
        if z >= SLICE_DIMENSION {
            if slice_index + 1 >= SLICES_PER_CHUNK {
                return &AIR_BLOCK;
            }
            match chunk.slice(slice_index + 1) {
                Some(above) => concerned_slice = above,
                None => return &AIR_BLOCK,
            }
        }

        concerned_slice.block_or_air(local_x, local_y, local_z)
    }
}
