//! # Generation Module
//!
//! Terrain synthesis and feature placement.
//!
//! ## Terrain
//!
//! [`WorldGenerator::generate_chunk`] fills every slice of a chunk column by column:
//! 1. The heightmap gives the surface height of the column
//! 2. A second noise field gives the thickness of the dirt layer (`0..=5`)
//! 3. Each voxel is then bedrock, air (above the surface or carved by caves), grass,
//!    dirt or stone
//!
//! Every generated slice carries the same seven-entry palette, so palette indices equal
//! material ids and nothing has to be looked up while writing.
//!
//! ## Randomness
//!
//! The bottom layers are sprinkled with bedrock using one random draw per voxel. Draws
//! come from a generator seeded with `rng_seed ^ chunk_id`, so a chunk generates the same
//! way whichever thread builds it and in whatever order.

pub mod noise_sampler;
pub mod trees;

use log::debug;

use crate::core::ConfigError;
use crate::engine_state::config::GenerationConfig;

use super::block::block_type::BlockType;
use super::block::{Block, PaletteIndex};
use super::chunk::slice::SLICE_DIMENSION;
use super::chunk::Chunk;
use noise_sampler::NoiseSampler;

/// Surface parameters of one `(x, y)` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnProfile {
    /// World Z of the grass voxel.
    pub surface_height: i64,
    /// How many voxels below the surface are still dirt.
    pub dirt_depth: i64,
}

/// Populates chunks from noise.
pub struct WorldGenerator {
    config: GenerationConfig,
    detail: NoiseSampler,
}

impl WorldGenerator {
    /// Creates a generator.
    ///
    /// # Errors
    /// [`ConfigError::InvalidOctaves`] if the configured heightmap octaves are unusable.
    pub fn new(config: GenerationConfig) -> Result<Self, ConfigError> {
        // Validated here so a bad octave list fails at startup, not on first use.
        NoiseSampler::new(config.noise_seed, config.octaves.clone())?;
        let detail = NoiseSampler::flat(config.noise_seed, 0.0);
        Ok(WorldGenerator { config, detail })
    }

    /// The parameters this generator was built from.
    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Builds the terrain heightmap described by the configuration.
    pub fn heightmap(&self) -> Result<NoiseSampler, ConfigError> {
        NoiseSampler::new(self.config.noise_seed, self.config.octaves.clone())
    }

    /// The palette every generated slice starts with, in material id order.
    pub fn generation_palette() -> Vec<Block> {
        BlockType::ALL.into_iter().map(Block::from_type).collect()
    }

    /// Surface height and dirt depth of the column at world `(x, y)`.
    pub fn column_profile(&self, heightmap: &NoiseSampler, x: i64, y: i64) -> ColumnProfile {
        let (x, y) = (x as f64, y as f64);
        let surface_height = heightmap.sample(x, y, 0.0) as u8 as i64;

        let f = self.config.dirt_frequency;
        let normalized = 0.5 + 0.5 * self.detail.noise3(f * x, f * y, 0.0);
        let dirt_depth = (normalized * self.config.max_dirt_depth as f64) as u8 as i64;

        ColumnProfile {
            surface_height,
            dirt_depth,
        }
    }

    /// Whether the cave field carves the voxel at world `(x, y, z)`.
    pub fn is_cave(&self, x: i64, y: i64, z: i64) -> bool {
        let f = self.config.cave_frequency;
        self.detail.noise3(f * x as f64, f * y as f64, f * z as f64) >= self.config.cave_threshold
    }

    /// Terrain material at height `z` of a column, bedrock aside.
    pub fn classify(profile: ColumnProfile, z: i64, carved: bool) -> BlockType {
        if z > profile.surface_height || carved {
            BlockType::AIR
        } else if z == profile.surface_height {
            BlockType::GRASS
        } else if profile.surface_height - z <= profile.dirt_depth {
            BlockType::DIRT
        } else {
            BlockType::STONE
        }
    }

    /// Fills every slice of `chunk` with terrain.
    ///
    /// # Arguments
    /// * `heightmap` - The world's terrain sampler
    /// * `chunk` - A chunk whose world position is already set
    pub fn generate_chunk(&self, heightmap: &NoiseSampler, chunk: &mut Chunk) {
        let mut rng = fastrand::Rng::with_seed(self.config.rng_seed ^ chunk.id() as u64);
        let falloff = self.config.bedrock_falloff;
        let (chunk_x, chunk_y) = (chunk.x, chunk.y);
        let dim = SLICE_DIMENSION as usize;

        let profiles: Vec<ColumnProfile> = (0..dim * dim)
            .map(|i| {
                let (x, y) = (i % dim, i / dim);
                self.column_profile(heightmap, chunk_x + x as i64, chunk_y + y as i64)
            })
            .collect();

        for slice in chunk.slices_mut() {
            slice.set_palette(Self::generation_palette());
            let slice_z = slice.z();

            for x in 0..dim {
                let world_x = chunk_x + x as i64;
                for y in 0..dim {
                    let world_y = chunk_y + y as i64;
                    let profile = profiles[x + dim * y];

                    for z in 0..dim {
                        let world_z = slice_z + z as i64;
                        let t = world_z as f64 / falloff;
                        let bedrock = world_z == 0 || (t * t < 1.0 && t * t < rng.f64());

                        let block_type = if bedrock {
                            BlockType::BEDROCK
                        } else {
                            let carved = world_z <= profile.surface_height
                                && self.is_cave(world_x, world_y, world_z);
                            Self::classify(profile, world_z, carved)
                        };
                        slice.set_index(x, y, z, block_type.id() as PaletteIndex);
                    }
                }
            }
        }

        debug!(
            "Generated chunk ({}, {}) at world ({}, {})",
            chunk.section_x, chunk.section_y, chunk.x, chunk.y
        );
    }
}
