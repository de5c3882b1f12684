//! Rendering-side data for the voxel world.
//!
//! This module produces what a renderer consumes: per-slice vertex and index buffers in
//! the layout described by [`Vertex`]. Uploading and drawing them is left to the
//! embedding application, one indexed draw per non-empty bucket per slice.

pub mod meshing;
pub mod tasks;
pub mod vertex;

// Re-export commonly used types
pub use vertex::Vertex;
