//! Task for generating the slice meshes of a chunk in a background thread.
//!
//! The worker holds a read guard on the world while it meshes, so several chunks can be
//! meshed at once. The finished buffers are stored back into the slices when the result
//! is applied. No voxel write may be published while these tasks are in flight.

use log::warn;

use crate::{
    core::MtResource,
    engine_state::{
        rendering::meshing::SliceMeshes,
        task_management::task::{Task, TaskResult},
        voxels::world::World,
    },
};

/// A task that meshes every slice of one chunk.
pub struct ChunkMeshGenerationTask {
    /// The shared world, read-only while processing
    world: MtResource<World>,
    /// Chunk-grid X of the chunk to mesh
    section_x: u32,
    /// Chunk-grid Y of the chunk to mesh
    section_y: u32,
}

impl ChunkMeshGenerationTask {
    /// Creates a new chunk mesh generation task.
    pub fn new(world: MtResource<World>, section_x: u32, section_y: u32) -> Self {
        ChunkMeshGenerationTask {
            world,
            section_x,
            section_y,
        }
    }
}

impl Task for ChunkMeshGenerationTask {
    fn process(&self) -> Box<dyn TaskResult + Send> {
        let meshes = self.world.get().build_chunk_meshes(self.section_x, self.section_y);
        Box::new(ChunkMeshGenerationTaskResult {
            section_x: self.section_x,
            section_y: self.section_y,
            meshes,
        })
    }
}

/// The result of a chunk mesh generation task.
pub struct ChunkMeshGenerationTaskResult {
    section_x: u32,
    section_y: u32,
    /// One entry per slice, bottom to top; `None` if the chunk was missing
    meshes: Option<Vec<SliceMeshes>>,
}

impl TaskResult for ChunkMeshGenerationTaskResult {
    /// Replaces the buffers of the chunk's slices.
    fn handle_result(self: Box<Self>, world: &MtResource<World>) -> Vec<Box<dyn Task + Send>> {
        let ChunkMeshGenerationTaskResult {
            section_x,
            section_y,
            meshes,
        } = *self;
        let stored = match meshes {
            Some(meshes) => world.get_mut().store_chunk_meshes(section_x, section_y, meshes),
            None => false,
        };
        if !stored {
            warn!("Chunk ({section_x}, {section_y}) vanished before its meshes were stored");
        }
        Vec::new()
    }
}
