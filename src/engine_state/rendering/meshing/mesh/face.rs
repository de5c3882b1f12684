use cgmath::Point3;

use crate::engine_state::voxels::block::block_side::BlockSide;

/// Index pattern of a quad whose corners run counter-clockwise seen from outside.
const FORWARD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];
/// Index pattern of a quad whose corners run clockwise seen from outside.
const REVERSED_INDICES: [u32; 6] = [2, 1, 0, 3, 2, 0];

/// A single unit quad on one side of a voxel, in world space.
///
/// The corners are listed in a fixed order per axis; `tile_corners` holds, for each
/// corner, where it sits on the atlas tile (`0` or `1` along u and v).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Face {
    /// The four corners of the quad.
    pub corners: [Point3<f32>; 4],
    /// Tile-relative texture coordinates of each corner.
    pub tile_corners: [[f32; 2]; 4],
    /// Which side of the voxel this face covers.
    pub side: BlockSide,
}

impl Face {
    /// Creates the face on `side` of the voxel whose lowest corner is at `voxel`.
    ///
    /// # Arguments
    /// * `voxel` - World position of the voxel
    /// * `side` - Which side of the voxel the face covers
    pub fn new(voxel: Point3<i64>, side: BlockSide) -> Self {
        let (x, y, z) = (voxel.x as f32, voxel.y as f32, voxel.z as f32);
        let p = Point3::new;

        let (corners, tile_corners) = match side {
            BlockSide::LEFT | BlockSide::RIGHT => {
                let x = if side == BlockSide::RIGHT { x + 1.0 } else { x };
                (
                    [p(x, y, z), p(x, y + 1.0, z), p(x, y + 1.0, z + 1.0), p(x, y, z + 1.0)],
                    [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
                )
            }
            BlockSide::FRONT | BlockSide::BACK => {
                let y = if side == BlockSide::BACK { y + 1.0 } else { y };
                (
                    [p(x, y, z), p(x + 1.0, y, z), p(x + 1.0, y, z + 1.0), p(x, y, z + 1.0)],
                    [[0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0]],
                )
            }
            BlockSide::BOTTOM | BlockSide::TOP => {
                let z = if side == BlockSide::TOP { z + 1.0 } else { z };
                (
                    [p(x, y, z), p(x + 1.0, y, z), p(x + 1.0, y + 1.0, z), p(x, y + 1.0, z)],
                    [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]],
                )
            }
        };

        Face {
            corners,
            tile_corners,
            side,
        }
    }

    /// The two triangles of this face, offset by the index of its first vertex.
    ///
    /// The corner order runs clockwise seen from outside on the left, back and bottom
    /// sides, so those are reversed to keep every triangle counter-clockwise.
    pub fn indices(&self, first_vertex: u32) -> [u32; 6] {
        let pattern = match self.side {
            BlockSide::LEFT | BlockSide::BACK | BlockSide::BOTTOM => REVERSED_INDICES,
            BlockSide::RIGHT | BlockSide::FRONT | BlockSide::TOP => FORWARD_INDICES,
        };
        pattern.map(|i| first_vertex + i)
    }
}
