//! Atlas texture coordinates per material and face.
//!
//! Every solid material has six `(base, overlay)` tile pairs, one per [`BlockSide`].
//! Tiles are addressed by `(column, row)` and converted once to normalized UV offsets:
//! `u = tile_size * column / atlas_width`, `v = tile_size * row / atlas_height`.
//!
//! An overlay of `(0, 0)` means "no overlay"; the shader is expected to treat it so.

use std::collections::HashMap;

use log::warn;

use crate::core::ConfigError;
use crate::engine_state::config::AtlasConfig;
use crate::engine_state::voxels::block::block_side::BlockSide;
use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::block::MaterialId;

/// Normalized UV offsets of one face.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FaceUv {
    /// Offset of the base tile.
    pub base: [f32; 2],
    /// Offset of the tintable overlay tile.
    pub overlay: [f32; 2],
}

/// Immutable lookup from `(material, face)` to UV offsets.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasUvTable {
    tile_size: [f32; 2],
    faces: HashMap<MaterialId, [FaceUv; 6]>,
}

impl AtlasUvTable {
    /// Builds the table from configuration.
    ///
    /// # Errors
    /// - [`ConfigError::InvalidAtlasDimensions`] if any dimension is zero
    /// - [`ConfigError::UnknownMaterial`] for a name with no material
    /// - [`ConfigError::MalformedAtlasEntry`] for an entry without exactly six faces
    pub fn from_config(config: &AtlasConfig) -> Result<Self, ConfigError> {
        if config.width == 0 || config.height == 0 || config.tile_size == 0 {
            return Err(ConfigError::InvalidAtlasDimensions {
                width: config.width,
                height: config.height,
                tile_size: config.tile_size,
            });
        }
        let width = config.width as f32;
        let height = config.height as f32;
        let tile = config.tile_size as f32;
        let normalize = |[column, row]: [u32; 2]| {
            [tile * column as f32 / width, tile * row as f32 / height]
        };

        let mut faces = HashMap::with_capacity(config.materials.len());
        for (name, entry) in &config.materials {
            let block_type = BlockType::from_name(name)
                .ok_or_else(|| ConfigError::UnknownMaterial(name.clone()))?;
            let tiles: &[[[u32; 2]; 2]; 6] = entry.as_slice().try_into().map_err(|_| {
                ConfigError::MalformedAtlasEntry {
                    material: name.clone(),
                    faces: entry.len(),
                }
            })?;
            if block_type == BlockType::AIR {
                warn!("Atlas entry for air is ignored, air is never rendered");
                continue;
            }
            let uvs = (*tiles).map(|[base, overlay]| FaceUv {
                base: normalize(base),
                overlay: normalize(overlay),
            });
            faces.insert(block_type.id(), uvs);
        }

        Ok(AtlasUvTable {
            tile_size: [tile / width, tile / height],
            faces,
        })
    }

    /// The size of one tile in normalized UV units.
    pub fn tile_size(&self) -> [f32; 2] {
        self.tile_size
    }

    /// UV offsets of `side` of `material_id`.
    ///
    /// Materials missing from the table map to the `(0, 0)` tile with no overlay.
    pub fn uv_offset(&self, material_id: MaterialId, side: BlockSide) -> FaceUv {
        self.faces
            .get(&material_id)
            .map(|uvs| uvs[side as usize])
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_table() -> AtlasUvTable {
        AtlasUvTable::from_config(&AtlasConfig::default()).unwrap()
    }

    #[test]
    fn tiles_are_normalized_by_atlas_size() {
        let table = default_table();
        assert_eq!(table.tile_size(), [16.0 / 1024.0, 16.0 / 512.0]);

        let stone = table.uv_offset(BlockType::STONE.id(), BlockSide::LEFT);
        assert_eq!(stone.base, [16.0 * 6.0 / 1024.0, 16.0 * 26.0 / 512.0]);
        assert_eq!(stone.overlay, [0.0, 0.0]);
    }

    #[test]
    fn grass_sides_carry_an_overlay_and_bottom_is_dirt() {
        let table = default_table();
        let side = table.uv_offset(BlockType::GRASS.id(), BlockSide::FRONT);
        assert_eq!(side.overlay, [16.0 * 25.0 / 1024.0, 16.0 * 9.0 / 512.0]);

        let bottom = table.uv_offset(BlockType::GRASS.id(), BlockSide::BOTTOM);
        let dirt = table.uv_offset(BlockType::DIRT.id(), BlockSide::BOTTOM);
        assert_eq!(bottom, dirt);
    }

    #[test]
    fn log_ends_differ_from_its_bark() {
        let table = default_table();
        let top = table.uv_offset(BlockType::OAK_LOG.id(), BlockSide::TOP);
        let bottom = table.uv_offset(BlockType::OAK_LOG.id(), BlockSide::BOTTOM);
        let side = table.uv_offset(BlockType::OAK_LOG.id(), BlockSide::RIGHT);
        assert_eq!(top, bottom);
        assert_ne!(top, side);
    }

    #[test]
    fn unknown_material_falls_back_to_origin_tile() {
        assert_eq!(default_table().uv_offset(99, BlockSide::TOP), FaceUv::default());
    }

    #[test]
    fn bad_entries_are_rejected() {
        let mut config = AtlasConfig::default();
        config.materials.insert("obsidian".to_owned(), vec![[[0, 0], [0, 0]]; 6]);
        assert!(matches!(
            AtlasUvTable::from_config(&config),
            Err(ConfigError::UnknownMaterial(name)) if name == "obsidian"
        ));

        let mut config = AtlasConfig::default();
        config.materials.insert("stone".to_owned(), vec![[[0, 0], [0, 0]]; 5]);
        assert!(matches!(
            AtlasUvTable::from_config(&config),
            Err(ConfigError::MalformedAtlasEntry { faces: 5, .. })
        ));

        let config = AtlasConfig {
            tile_size: 0,
            ..AtlasConfig::default()
        };
        assert!(matches!(
            AtlasUvTable::from_config(&config),
            Err(ConfigError::InvalidAtlasDimensions { .. })
        ));
    }
}
