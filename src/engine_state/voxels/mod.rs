//! # Voxel World
//!
//! This module contains the voxel data model and everything that writes to it.
//!
//! ## Architecture
//!
//! The voxel system is organized into several key components:
//!
//! * **Block**: Material ids, tints and the six faces of a voxel
//! * **Chunk**: A 16x16x384 column made of 24 palette-compressed slices
//! * **Section**: The 16x16 grid of optional chunks and cross-boundary neighbor reads
//! * **World**: Global-coordinate reads and writes, population and meshing entry points
//! * **Generation**: Terrain from noise, and tree placement
//! * **Tasks**: Chunk generation as a background job
//!
//! ## Data Flow
//!
//! 1. Chunks are generated (in parallel or not) and inserted into the section
//! 2. Trees are written through the world's global accessors
//! 3. Slices are meshed, reading their neighbors through the section
//! 4. Edits go through the world, followed by a remesh of the touched slices

pub mod block;
pub mod chunk;
pub mod generation;
pub mod section;
pub mod tasks;
pub mod world;
