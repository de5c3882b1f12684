//! # Voxel Task System
//!
//! Background tasks that write voxel data. They are processed on worker threads and
//! applied to the world by the task manager.

pub mod chunk_generation_task;
