//! Background tasks for the rendering side of the world.
//!
//! # Available Tasks
//! - `ChunkMeshGenerationTask`: Builds the slice meshes of one chunk

pub mod chunk_mesh_generation_task;
