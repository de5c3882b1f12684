//! # Block Module
//!
//! This module provides the block definition stored in slice palettes, the tint
//! multiplier attached to rendered faces, and the material and face enums.

use block_type::{BlockType, MaterialClass};

pub mod block_side;
pub mod block_type;

/// The integer type used for material ids.
pub type MaterialId = u32;

/// The integer type of the per-voxel palette indices stored in a slice.
pub type PaletteIndex = u16;

/// An RGB multiplier applied to every vertex of a block's faces.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Tint {
    /// Red multiplier.
    pub r: f32,
    /// Green multiplier.
    pub g: f32,
    /// Blue multiplier.
    pub b: f32,
}

impl Tint {
    /// No tinting.
    pub const WHITE: Tint = Tint::new(1.0, 1.0, 1.0);

    /// The green applied to grass overlays and leaves.
    pub const LAND_GREEN: Tint = Tint::new(124.0 / 255.0, 189.0 / 255.0, 107.0 / 255.0);

    /// Creates a tint from its three channels.
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Tint { r, g, b }
    }

    /// The tint as a vertex attribute.
    pub fn to_array(self) -> [f32; 3] {
        [self.r, self.g, self.b]
    }
}

impl Default for Tint {
    fn default() -> Self {
        Tint::WHITE
    }
}

/// A palette entry: a material and the tint its faces are drawn with.
///
/// Slices do not store one `Block` per voxel. They store a short palette of distinct
/// blocks and one [`PaletteIndex`] per voxel.
///
/// # Memory Layout
/// `#[repr(C)]` with no padding, so palettes can be handed to a GPU as-is.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Block {
    /// Material id. `0` is air.
    pub material_id: MaterialId,
    /// Tint multiplier for every vertex of this block's faces.
    pub tint: Tint,
}

/// The block returned for edge-of-world neighbors and faulty lookups.
pub static AIR_BLOCK: Block = Block::AIR;

impl Block {
    /// Air. Always untinted.
    pub const AIR: Block = Block::new(0, Tint::WHITE);

    /// Creates a block from a raw material id and tint.
    pub const fn new(material_id: MaterialId, tint: Tint) -> Self {
        Block { material_id, tint }
    }

    /// Creates the block the generator uses for `block_type`, with its default tint.
    pub fn from_type(block_type: BlockType) -> Self {
        Block::new(block_type.id(), block_type.default_tint())
    }

    /// Whether this is air.
    pub fn is_air(&self) -> bool {
        self.material_id == Block::AIR.material_id
    }

    /// The material of this block, if it is a known one.
    pub fn block_type(&self) -> Option<BlockType> {
        BlockType::from_id(self.material_id)
    }

    /// The mesh bucket this block goes to.
    pub fn class(&self) -> MaterialClass {
        MaterialClass::of(self.material_id)
    }
}
