//! # Chunk Generation Task
//!
//! This module defines the `ChunkGenerationTask` which fills one chunk with terrain on a
//! worker thread. The chunk is built off to the side and only inserted into the section
//! when the result is applied, so workers never write to the shared world.

use std::sync::Arc;

use cgmath::Point2;
use log::warn;

use crate::{
    core::MtResource,
    engine_state::{
        task_management::task::{Task, TaskResult},
        voxels::{
            chunk::Chunk,
            generation::{noise_sampler::NoiseSampler, WorldGenerator},
            world::World,
        },
    },
};

/// A task that generates one chunk.
pub struct ChunkGenerationTask {
    /// Terrain rules shared by every generation task
    generator: Arc<WorldGenerator>,
    /// The world's heightmap
    heightmap: Arc<NoiseSampler>,
    /// Section-grid position of the section the chunk belongs to
    section_position: Point2<i64>,
    /// Chunk-grid X within the section
    section_x: u32,
    /// Chunk-grid Y within the section
    section_y: u32,
}

impl ChunkGenerationTask {
    /// Creates a new chunk generation task.
    ///
    /// # Arguments
    /// * `generator` - The terrain generator
    /// * `heightmap` - The world's heightmap
    /// * `section_position` - Section-grid position of the target section
    /// * `section_x`, `section_y` - Chunk-grid position of the chunk to generate
    pub fn new(
        generator: Arc<WorldGenerator>,
        heightmap: Arc<NoiseSampler>,
        section_position: Point2<i64>,
        section_x: u32,
        section_y: u32,
    ) -> Self {
        ChunkGenerationTask {
            generator,
            heightmap,
            section_position,
            section_x,
            section_y,
        }
    }
}

impl Task for ChunkGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let mut chunk = Chunk::new(self.section_position, self.section_x, self.section_y);
        self.generator.generate_chunk(&self.heightmap, &mut chunk);
        Box::new(ChunkGenerationTaskResult { chunk })
    }
}

/// The result of a chunk generation task: the finished chunk.
pub struct ChunkGenerationTaskResult {
    chunk: Chunk,
}

impl TaskResult for ChunkGenerationTaskResult {
    /// Inserts the chunk into the section.
    ///
    /// Meshing is not scheduled from here: a chunk's boundary faces depend on its
    /// neighbors, which may still be generating.
    fn handle_result(self: Box<Self>, world: &MtResource<World>) -> Vec<Box<dyn Task + Send>> {
        let chunk = self.chunk;
        let (x, y) = (chunk.section_x, chunk.section_y);
        if world.get_mut().section.insert_chunk(chunk).is_some() {
            warn!("Generated chunk ({x}, {y}) replaced an existing one");
        }
        Vec::new()
    }
}
