//! # Trees Module
//!
//! Trees are placed after terrain generation, through the world's global mutation API
//! only. Placement is split in two steps:
//! - [`tree_writes`] computes the writes for a tree, a pure function of its base and height
//! - [`apply_writes`] performs them, dropping the ones that fall outside the world
//!
//! No structural check is made: a tree overwrites whatever terrain it overlaps.

use cgmath::{Point3, Vector3};
use log::{debug, info};

use crate::engine_state::voxels::block::block_type::BlockType;
use crate::engine_state::voxels::chunk::CHUNK_DIMENSION;
use crate::engine_state::voxels::world::World;

/// Half-extent of the leaf cube around the top of the trunk.
pub const LEAF_RADIUS: i64 = 2;

/// A single material write at an absolute world position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockWrite {
    /// World position.
    pub position: Point3<i64>,
    /// Material to write.
    pub block_type: BlockType,
}

/// The writes that make up a tree, in application order.
///
/// A cube of leaves of half-extent [`LEAF_RADIUS`] centered on `base + (0, 0, height)`,
/// then a trunk of `height` logs from `base` upward. Later writes win, so the trunk
/// replaces the leaves it passes through.
pub fn tree_writes(base: Point3<i64>, height: u32) -> Vec<BlockWrite> {
    let top = base + Vector3::new(0, 0, height as i64);
    let side = (2 * LEAF_RADIUS + 1) as usize;
    let mut writes = Vec::with_capacity(side * side * side + height as usize);

    for x in -LEAF_RADIUS..=LEAF_RADIUS {
        for y in -LEAF_RADIUS..=LEAF_RADIUS {
            for z in -LEAF_RADIUS..=LEAF_RADIUS {
                writes.push(BlockWrite {
                    position: top + Vector3::new(x, y, z),
                    block_type: BlockType::OAK_LEAVES,
                });
            }
        }
    }

    writes.extend((0..height as i64).map(|i| BlockWrite {
        position: base + Vector3::new(0, 0, i),
        block_type: BlockType::OAK_LOG,
    }));

    writes
}

/// Applies writes through [`World::set_block`].
///
/// # Returns
/// The number of writes that landed inside the world.
pub fn apply_writes(world: &mut World, writes: &[BlockWrite]) -> usize {
    let mut applied = 0;
    for write in writes {
        let p = write.position;
        match world.set_block(p.x, p.y, p.z, write.block_type) {
            Some(_) => applied += 1,
            None => debug!("Dropped {:?} write outside the world at {:?}", write.block_type, p),
        }
    }
    applied
}

/// Places a tree with its trunk starting at `base`.
pub fn spawn_tree(world: &mut World, base: Point3<i64>, height: u32) -> usize {
    apply_writes(world, &tree_writes(base, height))
}

/// Places `count` trees at random columns of the populated chunk rectangle, each one
/// standing on the heightmap surface.
///
/// # Arguments
/// * `world` - The world to plant in
/// * `rng` - Source of the tree columns
/// * `count` - Number of trees
/// * `width`, `height` - Populated chunk rectangle, in chunks
/// * `tree_height` - Trunk height of every tree
///
/// # Returns
/// The base position of every tree placed.
pub fn scatter_trees(
    world: &mut World,
    rng: &mut fastrand::Rng,
    count: u32,
    width: u32,
    height: u32,
    tree_height: u32,
) -> Vec<Point3<i64>> {
    let extent_x = width as i64 * CHUNK_DIMENSION as i64;
    let extent_y = height as i64 * CHUNK_DIMENSION as i64;
    if extent_x == 0 || extent_y == 0 {
        return Vec::new();
    }

    let origin = world.section.origin();
    let mut bases = Vec::with_capacity(count as usize);
    let mut written = 0;
    for _ in 0..count {
        let x = origin.x + rng.i64(0..extent_x);
        let y = origin.y + rng.i64(0..extent_y);
        let z = (world.heightmap.sample(x as f64, y as f64, 0.0) + 1.0) as i64;
        let base = Point3::new(x, y, z);
        written += spawn_tree(world, base, tree_height);
        bases.push(base);
    }

    info!("Placed {} trees ({} voxels written)", bases.len(), written);
    bases
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trunk_is_written_after_the_canopy() {
        let base = Point3::new(10, 10, 41);
        let writes = tree_writes(base, 4);
        assert_eq!(writes.len(), 125 + 4);

        let trunk = &writes[125..];
        for (i, write) in trunk.iter().enumerate() {
            assert_eq!(write.block_type, BlockType::OAK_LOG);
            assert_eq!(write.position, Point3::new(10, 10, 41 + i as i64));
        }
        assert!(writes[..125].iter().all(|w| w.block_type == BlockType::OAK_LEAVES));
    }

    #[test]
    fn canopy_is_centered_on_the_trunk_top() {
        let writes = tree_writes(Point3::new(0, 0, 0), 4);
        let leaves: Vec<_> = writes
            .iter()
            .filter(|w| w.block_type == BlockType::OAK_LEAVES)
            .map(|w| w.position)
            .collect();
        let min = leaves.iter().fold(Point3::new(i64::MAX, i64::MAX, i64::MAX), |m, p| {
            Point3::new(m.x.min(p.x), m.y.min(p.y), m.z.min(p.z))
        });
        let max = leaves.iter().fold(Point3::new(i64::MIN, i64::MIN, i64::MIN), |m, p| {
            Point3::new(m.x.max(p.x), m.y.max(p.y), m.z.max(p.z))
        });
        assert_eq!(min, Point3::new(-2, -2, 2));
        assert_eq!(max, Point3::new(2, 2, 6));
    }

    #[test]
    fn zero_height_tree_is_only_leaves() {
        let writes = tree_writes(Point3::new(5, 5, 5), 0);
        assert_eq!(writes.len(), 125);
    }
}
