#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(rustdoc::invalid_rust_codeblocks)]

//! # Voxel World
//!
//! A chunked voxel world: palette-compressed storage, procedural terrain with caves and
//! trees, and a face-culling mesher that turns every 16x16x16 slice into vertex and index
//! buffers ready for a GPU.
//!
//! ## Key Modules
//!
//! * `application_state` - Frame timing and the per-frame context
//! * `core` - Shared resources and error types used throughout the crate
//! * `engine_state` - Voxel storage, generation, meshing and task scheduling
//!
//! ## Architecture
//!
//! * A `Section` owns up to 16x16 chunks; each chunk is a column of 24 slices
//! * Each slice stores one palette index per voxel plus its own mesh buffers
//! * Chunk generation and meshing run on a fixed pool of worker threads
//! * Workers only read the shared world; results are applied on the calling thread
//!
//! ## Usage
//!
//! ```no_run
//! fn main() {
//!     voxel_world::run();
//! }
//! ```
//!
//! The binary takes an optional path to a JSON configuration file. Without one the
//! built-in defaults are used.

use std::path::PathBuf;

use log::{error, info};

use application_state::ApplicationState;
use engine_state::config::WorldConfig;
use engine_state::EngineState;

pub mod application_state;
pub mod core;
pub mod engine_state;

pub use engine_state::rendering::meshing::MeshStats;
pub use engine_state::voxels::world::World;

/// Target frame rate reported in the frame context.
pub const TARGET_FPS: f64 = 60.0;

/// Builds a world from the configuration named on the command line and logs the result.
pub fn run() {
    let mut log_builder = env_logger::Builder::new();
    log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .init();

    info!("Logger initialized");

    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let config = match WorldConfig::load_or_default(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {e}");
            return;
        }
    };

    let engine_state = match EngineState::new(config) {
        Ok(engine_state) => engine_state,
        Err(e) => {
            error!("Failed to create the engine: {e}");
            return;
        }
    };

    let mut state = ApplicationState::new(engine_state, TARGET_FPS);
    let stats = state.engine_state.build();
    let frame = state.frame();

    info!(
        "{} slices, {} faces ({} opaque, {} foliage), {} draw calls per frame",
        stats.slices,
        stats.total_faces(),
        stats.opaque_faces,
        stats.foliage_faces,
        frame.draw_calls
    );
}
