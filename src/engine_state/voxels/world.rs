//! # World Module
//!
//! This module provides the `World` struct: the active section, the terrain heightmap
//! and the atlas table, plus the global-coordinate accessors every outside collaborator
//! goes through.
//!
//! ## Addressing
//!
//! Global coordinates are absolute world blocks. They are made relative to the section
//! origin, then split into a chunk column (`x / 16`, `y / 16`), a slice (`z / 16`) and a
//! slice-local offset. Anything outside `[0, 256) x [0, 256) x [0, 384)` of the section,
//! or inside a chunk that was never allocated, is *absent* (`None`), which is distinct
//! from air.
//!
//! ## Lifecycle
//!
//! 1. [`World::populate`] allocates and generates a rectangle of chunks
//! 2. Trees are scattered through [`World::set_block`]
//! 3. [`World::mesh_all`] meshes every slice
//! 4. Later edits go through [`World::set_block`] followed by [`World::remesh_around`]

use cgmath::Point3;
use log::info;
use web_time::Instant;

use crate::core::ConfigError;
use crate::engine_state::config::WorldConfig;
use crate::engine_state::rendering::meshing::{self, AtlasUvTable, MeshStats, SliceMeshes};

use super::block::block_side::BlockSide;
use super::block::block_type::BlockType;
use super::block::{Block, PaletteIndex};
use super::chunk::slice::SLICE_DIMENSION;
use super::chunk::{Chunk, Slice, CHUNK_HEIGHT, SLICES_PER_CHUNK};
use super::generation::noise_sampler::NoiseSampler;
use super::generation::WorldGenerator;
use super::section::{Section, SECTION_BLOCK_DIMENSION, SECTION_DIMENSION};

/// Identifies one slice of the section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SliceCoord {
    /// Chunk-grid X.
    pub section_x: u32,
    /// Chunk-grid Y.
    pub section_y: u32,
    /// Height index within the chunk.
    pub slice_index: usize,
}

/// A global coordinate resolved down to a voxel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct VoxelAddress {
    slice: SliceCoord,
    local: Point3<usize>,
}

/// The voxel world: one section of chunks and the data needed to generate and mesh it.
pub struct World {
    /// The active section.
    pub section: Section,
    /// Terrain height as a function of `(x, y)`.
    pub heightmap: NoiseSampler,
    /// Atlas offsets used by the mesher.
    pub atlas: AtlasUvTable,
}

impl World {
    /// Creates an empty world at section `(0, 0)` from configuration.
    ///
    /// # Errors
    /// A [`ConfigError`] if the octave list or the atlas table is invalid.
    pub fn new(config: &WorldConfig) -> Result<Self, ConfigError> {
        let heightmap = NoiseSampler::new(config.generation.noise_seed, config.generation.octaves.clone())?;
        let atlas = AtlasUvTable::from_config(&config.atlas)?;
        Ok(World::with_parts(Section::new(0, 0), heightmap, atlas))
    }

    /// Assembles a world from already-built parts.
    pub fn with_parts(section: Section, heightmap: NoiseSampler, atlas: AtlasUvTable) -> Self {
        World {
            section,
            heightmap,
            atlas,
        }
    }

    fn resolve(&self, x: i64, y: i64, z: i64) -> Option<VoxelAddress> {
        let origin = self.section.origin();
        let (x, y) = (x - origin.x, y - origin.y);
        if !(0..SECTION_BLOCK_DIMENSION).contains(&x)
            || !(0..SECTION_BLOCK_DIMENSION).contains(&y)
            || !(0..CHUNK_HEIGHT as i64).contains(&z)
        {
            return None;
        }

        let dim = SLICE_DIMENSION as i64;
        Some(VoxelAddress {
            slice: SliceCoord {
                section_x: (x / dim) as u32,
                section_y: (y / dim) as u32,
                slice_index: (z / dim) as usize,
            },
            local: Point3::new((x % dim) as usize, (y % dim) as usize, (z % dim) as usize),
        })
    }

    /// The slice at `coord`, if its chunk is allocated.
    pub fn slice_at(&self, coord: SliceCoord) -> Option<&Slice> {
        self.section
            .chunk(coord.section_x, coord.section_y)?
            .slice(coord.slice_index)
    }

    fn slice_at_mut(&mut self, coord: SliceCoord) -> Option<&mut Slice> {
        self.section
            .chunk_mut(coord.section_x, coord.section_y)?
            .slice_mut(coord.slice_index)
    }

    /// The block at world `(x, y, z)`.
    ///
    /// # Returns
    /// `None` outside the section or in an unallocated chunk. Faulty slices are logged
    /// and read as air.
    pub fn global_block(&self, x: i64, y: i64, z: i64) -> Option<&Block> {
        let address = self.resolve(x, y, z)?;
        let slice = self.slice_at(address.slice)?;
        let local = address.local;
        Some(slice.block_or_air(local.x, local.y, local.z))
    }

    /// The palette index slot of the voxel at world `(x, y, z)`.
    ///
    /// Writing through it bypasses palette bookkeeping: the caller must store an index
    /// that is valid for the slice's palette. Prefer [`World::set_block`].
    ///
    /// A uniform or unpopulated slice is first given the generation palette (palette
    /// index equals material id), keeping its contents, so the written index is read back.
    pub fn global_voxel_index_slot(&mut self, x: i64, y: i64, z: i64) -> Option<&mut PaletteIndex> {
        let address = self.resolve(x, y, z)?;
        let local = address.local;
        let slice = self.slice_at_mut(address.slice)?;
        slice.widen_palette(WorldGenerator::generation_palette());
        Some(slice.index_slot_mut(local.x, local.y, local.z))
    }

    /// Writes `block_type` at world `(x, y, z)`, adding it to the slice palette if needed.
    ///
    /// # Returns
    /// The slice that changed, or `None` if the position is absent.
    pub fn set_block(&mut self, x: i64, y: i64, z: i64, block_type: BlockType) -> Option<SliceCoord> {
        let address = self.resolve(x, y, z)?;
        let local = address.local;
        let slice = self.slice_at_mut(address.slice)?;
        let index = slice.ensure_palette_entry(Block::from_type(block_type));
        slice.set_index(local.x, local.y, local.z, index);
        Some(address.slice)
    }

    /// Whether world `(x, y, z)` holds anything but air. Absent positions are not solid.
    pub fn is_solid_at(&self, x: i64, y: i64, z: i64) -> bool {
        self.global_block(x, y, z).is_some_and(|block| !block.is_air())
    }

    /// Allocates the chunk at chunk-grid `(section_x, section_y)`, generates it and
    /// stores it, replacing any previous chunk there.
    ///
    /// # Returns
    /// `false` if the position is outside the section grid.
    pub fn generate_chunk_at(&mut self, generator: &WorldGenerator, section_x: u32, section_y: u32) -> bool {
        if section_x >= SECTION_DIMENSION || section_y >= SECTION_DIMENSION {
            return false;
        }
        let mut chunk = Chunk::new(self.section.position(), section_x, section_y);
        generator.generate_chunk(&self.heightmap, &mut chunk);
        self.section.insert_chunk(chunk);
        true
    }

    /// Allocates and generates the chunk rectangle `[0, width) x [0, height)` in row order.
    ///
    /// # Returns
    /// The number of chunks generated.
    pub fn populate(&mut self, generator: &WorldGenerator, width: u32, height: u32) -> usize {
        let start = Instant::now();
        let mut generated = 0;
        for y in 0..height.min(SECTION_DIMENSION) {
            for x in 0..width.min(SECTION_DIMENSION) {
                if self.generate_chunk_at(generator, x, y) {
                    generated += 1;
                }
            }
        }
        info!("Generated {} chunks in {:?}", generated, start.elapsed());
        generated
    }

    /// Computes the meshes of every slice of a chunk without storing them.
    pub fn build_chunk_meshes(&self, section_x: u32, section_y: u32) -> Option<Vec<SliceMeshes>> {
        let chunk = self.section.chunk(section_x, section_y)?;
        Some(meshing::mesh_chunk(&self.section, chunk, &self.atlas))
    }

    /// Stores meshes built by [`World::build_chunk_meshes`], bottom slice first.
    ///
    /// # Returns
    /// `false` if the chunk is no longer allocated.
    pub fn store_chunk_meshes(&mut self, section_x: u32, section_y: u32, meshes: Vec<SliceMeshes>) -> bool {
        let Some(chunk) = self.section.chunk_mut(section_x, section_y) else {
            return false;
        };
        for (slice, mesh) in chunk.slices_mut().iter_mut().zip(meshes) {
            slice.meshes = mesh;
        }
        true
    }

    /// Rebuilds and stores both buckets of one slice.
    ///
    /// # Returns
    /// `false` if the slice does not exist.
    pub fn mesh_slice_at(&mut self, coord: SliceCoord) -> bool {
        let meshes = {
            let Some(chunk) = self.section.chunk(coord.section_x, coord.section_y) else {
                return false;
            };
            let Some(slice) = chunk.slice(coord.slice_index) else {
                return false;
            };
            meshing::mesh_slice(&self.section, chunk, slice, &self.atlas)
        };
        match self.slice_at_mut(coord) {
            Some(slice) => {
                slice.meshes = meshes;
                true
            }
            None => false,
        }
    }

    /// Rebuilds and stores the meshes of every slice of one chunk.
    pub fn mesh_chunk_at(&mut self, section_x: u32, section_y: u32) -> bool {
        match self.build_chunk_meshes(section_x, section_y) {
            Some(meshes) => self.store_chunk_meshes(section_x, section_y, meshes),
            None => false,
        }
    }

    /// Positions of every allocated chunk in slot order.
    pub fn chunk_positions(&self) -> Vec<(u32, u32)> {
        self.section
            .chunks()
            .map(|chunk| (chunk.section_x, chunk.section_y))
            .collect()
    }

    /// Meshes every slice of every allocated chunk.
    pub fn mesh_all(&mut self) -> MeshStats {
        let start = Instant::now();
        for (x, y) in self.chunk_positions() {
            self.mesh_chunk_at(x, y);
        }
        let stats = self.mesh_stats();
        info!(
            "Meshed {} slices in {:?}: {} opaque faces, {} foliage faces",
            stats.slices,
            start.elapsed(),
            stats.opaque_faces,
            stats.foliage_faces
        );
        stats
    }

    /// Rebuilds the slice containing world `(x, y, z)` and each slice sharing a face
    /// with it, so faces on both sides of an edit are up to date.
    ///
    /// # Returns
    /// The slices that were rebuilt.
    pub fn remesh_around(&mut self, x: i64, y: i64, z: i64) -> Vec<SliceCoord> {
        let Some(center) = self.resolve(x, y, z) else {
            return Vec::new();
        };

        let mut targets = vec![center.slice];
        for side in BlockSide::all() {
            let offset = side.offset();
            let neighbor = SliceCoord {
                section_x: match center.slice.section_x.checked_add_signed(offset.x) {
                    Some(v) => v,
                    None => continue,
                },
                section_y: match center.slice.section_y.checked_add_signed(offset.y) {
                    Some(v) => v,
                    None => continue,
                },
                slice_index: match center.slice.slice_index.checked_add_signed(offset.z as isize) {
                    Some(v) if v < SLICES_PER_CHUNK => v,
                    _ => continue,
                },
            };
            targets.push(neighbor);
        }

        targets.retain(|&coord| self.slice_at(coord).is_some());
        for &coord in &targets {
            self.mesh_slice_at(coord);
        }
        targets
    }

    /// Statistics over the stored meshes of every slice.
    pub fn mesh_stats(&self) -> MeshStats {
        let mut stats = MeshStats::default();
        for chunk in self.section.chunks() {
            for slice in chunk.slices() {
                stats += MeshStats::of(&slice.meshes);
            }
        }
        stats
    }
}
