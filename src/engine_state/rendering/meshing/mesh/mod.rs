//! Mesh generation for voxel rendering.
//!
//! This module turns the voxels of a slice into the quads of its two mesh buckets.
//!
//! # Architecture
//! - [`Face`]: One unit quad on one side of a voxel
//! - [`visibility`]: Decides which faces of a voxel are emitted
//! - [`AtlasUvTable`]: Atlas offsets per material and face
//! - [`Mesh`] and [`SliceMeshes`]: The vertex and index buffers the faces land in

mod atlas;
mod face;
#[allow(clippy::module_inception)]
mod mesh;
pub mod visibility;

pub use atlas::{AtlasUvTable, FaceUv};
pub use face::Face;
pub use mesh::*;
