//! # Block Type Module
//!
//! This module defines the materials the world knows about. Each material has a stable
//! numeric id (the value stored in a [`Block`](super::Block)), a rendering class and a
//! name used by configuration files.

use num_derive::FromPrimitive;
use phf::phf_map;

use super::{MaterialId, Tint};

/// Enumerates all materials the generator and the atlas table know about.
///
/// The discriminants are the material ids. They are also the palette indices of the
/// palette every generated slice is seeded with, so they must never be reordered.
#[allow(non_camel_case_types)]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u32)]
pub enum BlockType {
    /// Empty space. Never rendered, never solid.
    AIR = 0,

    /// Bulk terrain below the dirt layer.
    STONE = 1,

    /// The layer between the grass surface and stone.
    DIRT = 2,

    /// Surface block. Its top and sides carry a tinted overlay.
    GRASS = 3,

    /// The bottom of the world.
    BEDROCK = 4,

    /// Tree trunk.
    OAK_LOG = 5,

    /// Tree canopy. The only foliage material.
    OAK_LEAVES = 6,
}

/// How a material is meshed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialClass {
    /// Not rendered.
    Air,
    /// Per-face culled geometry in the opaque bucket.
    Opaque,
    /// Uniform, double-sided geometry in the foliage bucket.
    Foliage,
}

impl MaterialClass {
    /// Classifies a raw material id. Ids with no `BlockType` are treated as opaque.
    pub fn of(material_id: MaterialId) -> Self {
        match BlockType::from_id(material_id) {
            Some(block_type) => block_type.class(),
            None => MaterialClass::Opaque,
        }
    }

    /// Whether an opaque face may be seen through a neighbor of this class.
    pub fn is_transparent(self) -> bool {
        matches!(self, MaterialClass::Air | MaterialClass::Foliage)
    }
}

/// Configuration names for every material, resolved at compile time.
static MATERIAL_NAMES: phf::Map<&'static str, BlockType> = phf_map! {
    "air" => BlockType::AIR,
    "stone" => BlockType::STONE,
    "dirt" => BlockType::DIRT,
    "grass" => BlockType::GRASS,
    "bedrock" => BlockType::BEDROCK,
    "oak_log" => BlockType::OAK_LOG,
    "oak_leaves" => BlockType::OAK_LEAVES,
};

impl BlockType {
    /// Every material in id order.
    pub const ALL: [BlockType; 7] = [
        BlockType::AIR,
        BlockType::STONE,
        BlockType::DIRT,
        BlockType::GRASS,
        BlockType::BEDROCK,
        BlockType::OAK_LOG,
        BlockType::OAK_LEAVES,
    ];

    /// Converts a raw material id to a `BlockType`.
    ///
    /// # Returns
    /// `None` if no material uses this id.
    pub fn from_id(material_id: MaterialId) -> Option<Self> {
        num::FromPrimitive::from_u32(material_id)
    }

    /// Looks up a material by its configuration name (`"oak_leaves"`, ...).
    pub fn from_name(name: &str) -> Option<Self> {
        MATERIAL_NAMES.get(name).copied()
    }

    /// The material id stored in blocks of this type.
    pub fn id(self) -> MaterialId {
        self as MaterialId
    }

    /// The configuration name of this material.
    pub fn name(self) -> &'static str {
        match self {
            BlockType::AIR => "air",
            BlockType::STONE => "stone",
            BlockType::DIRT => "dirt",
            BlockType::GRASS => "grass",
            BlockType::BEDROCK => "bedrock",
            BlockType::OAK_LOG => "oak_log",
            BlockType::OAK_LEAVES => "oak_leaves",
        }
    }

    /// The mesh bucket this material goes to.
    pub fn class(self) -> MaterialClass {
        match self {
            BlockType::AIR => MaterialClass::Air,
            BlockType::OAK_LEAVES => MaterialClass::Foliage,
            _ => MaterialClass::Opaque,
        }
    }

    /// The tint generated blocks of this type carry.
    pub fn default_tint(self) -> Tint {
        match self {
            BlockType::GRASS | BlockType::OAK_LEAVES => Tint::LAND_GREEN,
            _ => Tint::WHITE,
        }
    }
}
