//! # Slice Iteration Module
//!
//! This module provides an iterator over the non-air voxels of a slice.
//!
//! ## Palette-Aware Iteration
//!
//! The `SliceBlockIterator` takes advantage of the slice's palette:
//! 1. A uniform air slice (or an unpopulated one) yields nothing without touching the
//!    index array
//! 2. A uniform solid slice yields every position without reading stored indices
//! 3. Otherwise each stored index is resolved through the palette, skipping air entries

use cgmath::Point3;
use log::error;

use crate::engine_state::voxels::block::{Block, AIR_BLOCK};

use super::slice::{PaletteFault, Slice, SLICE_DIMENSION, SLICE_SIZE};

/// An iterator over all non-air voxels in a slice, in index order (X fastest, then Y,
/// then Z).
///
/// Yields the slice-local position and the voxel's block.
pub struct SliceBlockIterator<'a> {
    /// The slice being iterated over
    slice: &'a Slice,
    /// Next voxel offset to examine
    offset: usize,
    /// Where iteration stops; `0` for slices with nothing to yield
    end: usize,
}

impl<'a> SliceBlockIterator<'a> {
    /// Creates an iterator over the non-air voxels of `slice`.
    pub fn new(slice: &'a Slice) -> Self {
        let palette = slice.palette();
        let end = match palette.len() {
            0 => {
                error!(
                    "Iterating a slice before population: {}",
                    PaletteFault::EmptyPalette {
                        slice_index: slice.index()
                    }
                );
                0
            }
            1 if palette[0].is_air() => 0,
            _ => SLICE_SIZE,
        };
        SliceBlockIterator {
            slice,
            offset: 0,
            end,
        }
    }

    fn position_of(offset: usize) -> Point3<usize> {
        let dim = SLICE_DIMENSION as usize;
        Point3::new(offset % dim, (offset / dim) % dim, offset / (dim * dim))
    }
}

impl<'a> Iterator for SliceBlockIterator<'a> {
    type Item = (Point3<usize>, &'a Block);

    fn next(&mut self) -> Option<Self::Item> {
        let slice: &'a Slice = self.slice;
        while self.offset < self.end {
            let position = Self::position_of(self.offset);
            self.offset += 1;

            let block = match slice.lookup(position.x, position.y, position.z) {
                Ok(block) => block,
                Err(fault) => {
                    error!("Skipping voxel {position:?}: {fault}");
                    &AIR_BLOCK
                }
            };
            if !block.is_air() {
                return Some((position, block));
            }
        }
        None
    }
}
