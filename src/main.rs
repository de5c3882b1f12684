//! # Voxel World Entry Point
//!
//! Builds a world and reports its mesh statistics.
//!
//! ## Usage
//!
//! ```bash
//! RUST_LOG=info cargo run --release -- [config.json]
//! ```

fn main() {
    voxel_world::run();
}
