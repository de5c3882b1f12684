//! # Engine State Module
//!
//! The coordinator that owns the shared world and drives its construction across the
//! worker pool.
//!
//! ## Key Components
//!
//! * `EngineState` - Owns the world, the generator and the task manager
//! * `config` - Startup configuration
//! * `rendering` - Vertex format and slice meshing
//! * `task_management` - Worker threads and background tasks
//! * `voxels` - Voxel storage, addressing and world generation
//!
//! ## Building a World
//!
//! 1. Every chunk of the configured rectangle is generated by a `ChunkGenerationTask`
//! 2. Once all chunks are in, trees are scattered on the calling thread
//! 3. Every chunk is meshed by a `ChunkMeshGenerationTask`
//!
//! Each step waits for the previous one to finish, so meshing always sees fully
//! generated neighbors and never overlaps a voxel write.

use std::sync::Arc;

use cgmath::Point3;
use log::{info, warn};
use web_time::Instant;

use crate::core::{ConfigError, MtResource};
use config::WorldConfig;
use rendering::meshing::MeshStats;
use rendering::tasks::chunk_mesh_generation_task::ChunkMeshGenerationTask;
use task_management::TaskManager;
use voxels::block::block_type::BlockType;
use voxels::generation::{trees, WorldGenerator};
use voxels::section::SECTION_DIMENSION;
use voxels::tasks::chunk_generation_task::ChunkGenerationTask;
use voxels::world::{SliceCoord, World};

pub mod config;
pub mod rendering;
pub mod task_management;
pub mod voxels;

/// The main state container of the voxel world.
pub struct EngineState {
    /// The world, shared with worker tasks
    world: MtResource<World>,
    /// Terrain rules, shared with generation tasks
    generator: Arc<WorldGenerator>,
    /// Worker pool for generation and meshing
    task_manager: TaskManager,
    /// The configuration everything was built from
    config: WorldConfig,
}

impl EngineState {
    /// Creates an engine with an empty world.
    ///
    /// # Errors
    /// A [`ConfigError`] if the octaves or the atlas table are invalid.
    pub fn new(config: WorldConfig) -> Result<Self, ConfigError> {
        let world = World::new(&config)?;
        let generator = WorldGenerator::new(config.generation.clone())?;
        let task_manager = TaskManager::new(config.section.worker_count);
        if task_manager.worker_count() < config.section.worker_count {
            warn!(
                "Only {} of {} workers started",
                task_manager.worker_count(),
                config.section.worker_count
            );
        }

        Ok(EngineState {
            world: MtResource::new(world),
            generator: Arc::new(generator),
            task_manager,
            config,
        })
    }

    /// The shared world.
    pub fn world(&self) -> &MtResource<World> {
        &self.world
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &WorldConfig {
        &self.config
    }

    /// Generates the configured chunk rectangle on the worker pool.
    ///
    /// # Returns
    /// The number of chunks of the rectangle present in the section afterwards.
    pub fn populate(&mut self) -> usize {
        let start = Instant::now();
        let width = self.config.section.width.min(SECTION_DIMENSION);
        let height = self.config.section.height.min(SECTION_DIMENSION);
        let (section_position, heightmap) = {
            let world = self.world.get();
            (world.section.position(), Arc::new(world.heightmap.clone()))
        };

        for y in 0..height {
            for x in 0..width {
                self.task_manager.publish_task(Box::new(ChunkGenerationTask::new(
                    self.generator.clone(),
                    heightmap.clone(),
                    section_position,
                    x,
                    y,
                )));
            }
        }
        self.task_manager.wait_until_idle(&self.world);

        let generated = {
            let world = self.world.get();
            (0..height)
                .flat_map(|y| (0..width).map(move |x| (x, y)))
                .filter(|&(x, y)| world.section.chunk(x, y).is_some())
                .count()
        };
        let requested = (width * height) as usize;
        if generated < requested {
            warn!(
                "{} of {} chunks are missing after generation",
                requested - generated,
                requested
            );
        }
        info!("Generated {} chunks in {:?}", generated, start.elapsed());
        generated
    }

    /// Places the configured number of trees.
    ///
    /// # Returns
    /// The base of every tree.
    pub fn scatter_trees(&mut self) -> Vec<Point3<i64>> {
        let section = &self.config.section;
        let mut rng = fastrand::Rng::with_seed(self.config.generation.rng_seed);
        let mut world = self.world.get_mut();
        trees::scatter_trees(
            &mut world,
            &mut rng,
            section.tree_count,
            section.width.min(SECTION_DIMENSION),
            section.height.min(SECTION_DIMENSION),
            section.tree_height,
        )
    }

    /// Meshes every allocated chunk on the worker pool.
    pub fn mesh_all(&mut self) -> MeshStats {
        let start = Instant::now();
        let positions = self.world.get().chunk_positions();
        for (x, y) in positions {
            self.task_manager
                .publish_task(Box::new(ChunkMeshGenerationTask::new(self.world.clone(), x, y)));
        }
        self.task_manager.wait_until_idle(&self.world);

        let stats = self.mesh_stats();
        info!(
            "Meshed {} slices in {:?}: {} opaque faces, {} foliage faces, {} draw calls",
            stats.slices,
            start.elapsed(),
            stats.opaque_faces,
            stats.foliage_faces,
            stats.draw_calls
        );
        stats
    }

    /// Generates terrain, places trees and meshes the whole world.
    pub fn build(&mut self) -> MeshStats {
        let start = Instant::now();
        self.populate();
        self.scatter_trees();
        let stats = self.mesh_all();
        info!("World built in {:?}", start.elapsed());
        stats
    }

    /// Writes a block and rebuilds the affected slices.
    ///
    /// # Returns
    /// The slices that were remeshed; empty if the position is absent.
    pub fn set_block(&mut self, x: i64, y: i64, z: i64, block_type: BlockType) -> Vec<SliceCoord> {
        let mut world = self.world.get_mut();
        match world.set_block(x, y, z, block_type) {
            Some(_) => world.remesh_around(x, y, z),
            None => Vec::new(),
        }
    }

    /// Statistics over the stored meshes.
    pub fn mesh_stats(&self) -> MeshStats {
        self.world.get().mesh_stats()
    }
}
