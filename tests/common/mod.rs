#![allow(dead_code)]

use voxel_world::engine_state::config::{GenerationConfig, SectionConfig, WorldConfig};
use voxel_world::engine_state::voxels::block::block_type::BlockType;
use voxel_world::engine_state::voxels::block::Block;
use voxel_world::engine_state::voxels::generation::noise_sampler::Octave;
use voxel_world::engine_state::voxels::generation::WorldGenerator;
use voxel_world::World;

pub const SURFACE: i64 = 40;

/// A constant-height world without caves or trees.
pub fn flat_config(width: u32, height: u32, worker_count: usize) -> WorldConfig {
    WorldConfig {
        generation: GenerationConfig {
            octaves: vec![Octave::new(0.0, 0.0, SURFACE as f64)],
            cave_threshold: 2.0,
            ..GenerationConfig::default()
        },
        section: SectionConfig {
            width,
            height,
            tree_count: 0,
            worker_count,
            ..SectionConfig::default()
        },
        ..WorldConfig::default()
    }
}

/// Default terrain over a small rectangle.
pub fn terrain_config(width: u32, height: u32, tree_count: u32, worker_count: usize) -> WorldConfig {
    WorldConfig {
        section: SectionConfig {
            width,
            height,
            tree_count,
            worker_count,
            ..SectionConfig::default()
        },
        ..WorldConfig::default()
    }
}

/// A world with the configured rectangle generated, not meshed.
pub fn generated_world(config: &WorldConfig) -> (World, WorldGenerator) {
    let generator = WorldGenerator::new(config.generation.clone()).unwrap();
    let mut world = World::new(config).unwrap();
    world.populate(&generator, config.section.width, config.section.height);
    (world, generator)
}

pub fn material(world: &World, x: i64, y: i64, z: i64) -> Option<BlockType> {
    world.global_block(x, y, z).and_then(Block::block_type)
}
