//! # Block Side Module
//!
//! This module defines the six faces of a voxel. The world is Z-up: `TOP` faces +Z,
//! `FRONT` faces -Y, `LEFT` faces -X.

use cgmath::Vector3;

/// Represents the six faces of a voxel block.
///
/// The discriminants follow the column order of the texture atlas table:
/// top, front, left, back, right, bottom.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum BlockSide {
    /// The top face (facing positive Z)
    TOP = 0,

    /// The front face (facing negative Y)
    FRONT = 1,

    /// The left face (facing negative X)
    LEFT = 2,

    /// The back face (facing positive Y)
    BACK = 3,

    /// The right face (facing positive X)
    RIGHT = 4,

    /// The bottom face (facing negative Z)
    BOTTOM = 5,
}

/// The axis a face is perpendicular to.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum Axis {
    /// World X.
    X,
    /// World Y.
    Y,
    /// World Z (up).
    Z,
}

impl BlockSide {
    /// Returns all six faces in atlas order.
    pub fn all() -> [BlockSide; 6] {
        [
            BlockSide::TOP,
            BlockSide::FRONT,
            BlockSide::LEFT,
            BlockSide::BACK,
            BlockSide::RIGHT,
            BlockSide::BOTTOM,
        ]
    }

    /// The axis this face is perpendicular to.
    pub fn axis(self) -> Axis {
        match self {
            BlockSide::LEFT | BlockSide::RIGHT => Axis::X,
            BlockSide::FRONT | BlockSide::BACK => Axis::Y,
            BlockSide::TOP | BlockSide::BOTTOM => Axis::Z,
        }
    }

    /// `1.0` if the outward normal points along the positive axis, `-1.0` otherwise.
    pub fn direction(self) -> f32 {
        match self {
            BlockSide::TOP | BlockSide::BACK | BlockSide::RIGHT => 1.0,
            BlockSide::FRONT | BlockSide::LEFT | BlockSide::BOTTOM => -1.0,
        }
    }

    /// The unit offset to the neighbor sharing this face.
    pub fn offset(self) -> Vector3<i32> {
        let d = self.direction() as i32;
        match self.axis() {
            Axis::X => Vector3::new(d, 0, 0),
            Axis::Y => Vector3::new(0, d, 0),
            Axis::Z => Vector3::new(0, 0, d),
        }
    }

    /// The outward unit normal.
    pub fn normal(self) -> [f32; 3] {
        let offset = self.offset();
        [offset.x as f32, offset.y as f32, offset.z as f32]
    }

    /// The face on the other side of the shared boundary.
    pub fn opposite(self) -> BlockSide {
        match self {
            BlockSide::TOP => BlockSide::BOTTOM,
            BlockSide::BOTTOM => BlockSide::TOP,
            BlockSide::FRONT => BlockSide::BACK,
            BlockSide::BACK => BlockSide::FRONT,
            BlockSide::LEFT => BlockSide::RIGHT,
            BlockSide::RIGHT => BlockSide::LEFT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn discriminants_follow_atlas_order() {
        for (i, side) in BlockSide::all().into_iter().enumerate() {
            assert_eq!(side as usize, i);
        }
    }

    #[test]
    fn opposite_sides_cancel_out() {
        for side in BlockSide::all() {
            assert_eq!(side.offset() + side.opposite().offset(), Vector3::new(0, 0, 0));
            assert_eq!(side.opposite().opposite(), side);
        }
    }
}
