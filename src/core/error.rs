//! Error types for loading world configuration

use thiserror::Error;

/// Everything that can go wrong while turning a configuration file into runtime tables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configuration file is not valid JSON for [`WorldConfig`](crate::engine_state::config::WorldConfig).
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The atlas table names a material the world does not know.
    #[error("Unknown material name: {0:?}")]
    UnknownMaterial(String),

    /// An atlas table entry does not describe six faces.
    #[error("Atlas entry for {material:?} has {faces} faces, expected 6")]
    MalformedAtlasEntry {
        /// Name of the material whose entry is wrong.
        material: String,
        /// Number of faces found.
        faces: usize,
    },

    /// The atlas or tile dimensions cannot produce normalized UVs.
    #[error("Invalid atlas dimensions: {width}x{height} with tile size {tile_size}")]
    InvalidAtlasDimensions {
        /// Atlas width in texels.
        width: u32,
        /// Atlas height in texels.
        height: u32,
        /// Tile edge in texels.
        tile_size: u32,
    },

    /// The heightmap octave list is empty or holds non-finite parameters.
    #[error("Invalid octaves: {0}")]
    InvalidOctaves(String),
}
