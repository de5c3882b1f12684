//! # Configuration Module
//!
//! Static data loaded once at startup: heightmap octaves and terrain constants, the
//! per-material atlas table, and the extent of the populated area.
//!
//! Every group has defaults, so a configuration file only needs the values it changes:
//!
//! ```json
//! { "section": { "width": 4, "height": 4, "tree_count": 5 } }
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use log::info;
use serde::{Deserialize, Serialize};

use crate::core::ConfigError;
use crate::engine_state::voxels::generation::noise_sampler::Octave;

/// A `[column, row]` position in the atlas, in tiles.
pub type TilePosition = [u32; 2];

/// Base and overlay tiles of one face: `[[base_col, base_row], [overlay_col, overlay_row]]`.
pub type FaceTiles = [TilePosition; 2];

/// All startup configuration.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Terrain generation parameters.
    pub generation: GenerationConfig,
    /// Texture atlas layout.
    pub atlas: AtlasConfig,
    /// Populated area and job sizing.
    pub section: SectionConfig,
}

impl WorldConfig {
    /// Reads a JSON configuration file.
    ///
    /// # Errors
    /// [`ConfigError::Io`] if the file cannot be read, [`ConfigError::Parse`] if it is
    /// not a valid configuration.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!("Loaded world configuration from {}", path.display());
        Ok(config)
    }

    /// Parses a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads `path` if one is given, otherwise returns the defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

/// Terrain generation parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Heightmap octaves, summed.
    pub octaves: Vec<Octave>,
    /// Frequency of the dirt-depth noise.
    pub dirt_frequency: f64,
    /// Dirt depth reached when the dirt noise is at its maximum.
    pub max_dirt_depth: u8,
    /// Frequency of the 3D cave noise.
    pub cave_frequency: f64,
    /// Cave noise at or above this value carves air.
    pub cave_threshold: f64,
    /// Height over which the random bedrock layer fades out.
    pub bedrock_falloff: f64,
    /// Seed of the Perlin permutation tables.
    pub noise_seed: u32,
    /// Seed of the bedrock and tree-placement random draws.
    pub rng_seed: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        GenerationConfig {
            octaves: vec![Octave::new(0.01, 8.0, 30.0), Octave::new(0.06, 1.0, 0.0)],
            dirt_frequency: 0.1,
            max_dirt_depth: 5,
            cave_frequency: 0.05,
            cave_threshold: 0.4,
            bedrock_falloff: 3.0,
            noise_seed: 0,
            rng_seed: 0x5eed,
        }
    }
}

/// Texture atlas layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AtlasConfig {
    /// Atlas width in texels.
    pub width: u32,
    /// Atlas height in texels.
    pub height: u32,
    /// Tile edge in texels.
    pub tile_size: u32,
    /// Six faces per material name, in the order top, front, left, back, right, bottom.
    pub materials: BTreeMap<String, Vec<FaceTiles>>,
}

impl Default for AtlasConfig {
    fn default() -> Self {
        const NONE: TilePosition = [0, 0];
        let same = |base: TilePosition, overlay: TilePosition| vec![[base, overlay]; 6];
        let capped = |end: FaceTiles, side: FaceTiles, bottom: FaceTiles| {
            vec![end, side, side, side, side, bottom]
        };

        let mut materials = BTreeMap::new();
        materials.insert("stone".to_owned(), same([6, 26], NONE));
        materials.insert("dirt".to_owned(), same([21, 13], NONE));
        materials.insert(
            "grass".to_owned(),
            capped([[0, 0], [25, 11]], [[25, 8], [25, 9]], [[21, 13], NONE]),
        );
        materials.insert("bedrock".to_owned(), same([11, 0], NONE));
        materials.insert(
            "oak_log".to_owned(),
            capped([[6, 18], NONE], [[5, 18], NONE], [[6, 18], NONE]),
        );
        materials.insert("oak_leaves".to_owned(), same([0, 0], [4, 18]));

        AtlasConfig {
            width: 1024,
            height: 512,
            tile_size: 16,
            materials,
        }
    }
}

/// Extent of the populated area and job sizing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Populated chunks along X.
    pub width: u32,
    /// Populated chunks along Y.
    pub height: u32,
    /// Trees scattered after terrain generation.
    pub tree_count: u32,
    /// Trunk height of every tree.
    pub tree_height: u32,
    /// Worker threads for generation and meshing. `0` runs everything on the caller.
    pub worker_count: usize,
}

impl Default for SectionConfig {
    fn default() -> Self {
        SectionConfig {
            width: 10,
            height: 10,
            tree_count: 40,
            tree_height: 4,
            worker_count: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_other_defaults() {
        let config = WorldConfig::from_json(r#"{ "section": { "tree_count": 3 } }"#).unwrap();
        assert_eq!(config.section.tree_count, 3);
        assert_eq!(config.section.width, 10);
        assert_eq!(config.generation, GenerationConfig::default());
        assert_eq!(config.atlas, AtlasConfig::default());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        assert!(matches!(
            WorldConfig::from_json("{ not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            WorldConfig::load("/nonexistent/voxel-world.json"),
            Err(ConfigError::Io(_))
        ));
    }

    #[test]
    fn default_atlas_covers_every_solid_material_with_six_faces() {
        let atlas = AtlasConfig::default();
        assert_eq!(atlas.materials.len(), 6);
        assert!(atlas.materials.values().all(|faces| faces.len() == 6));
        assert_eq!(atlas.materials["grass"][0], [[0, 0], [25, 11]]);
        assert_eq!(atlas.materials["grass"][5], [[21, 13], [0, 0]]);
    }

    #[test]
    fn defaults_survive_a_json_round_trip() {
        let config = WorldConfig::default();
        let text = serde_json::to_string(&config).unwrap();
        assert_eq!(WorldConfig::from_json(&text).unwrap(), config);
    }
}
