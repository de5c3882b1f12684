mod common;

use common::{flat_config, generated_world, material, terrain_config};
use proptest::prelude::*;
use voxel_world::engine_state::voxels::block::block_side::BlockSide;
use voxel_world::engine_state::voxels::block::block_type::{BlockType, MaterialClass};
use voxel_world::engine_state::voxels::block::{Block, PaletteIndex, AIR_BLOCK};
use voxel_world::engine_state::voxels::chunk::slice::SLICE_DIMENSION;
use voxel_world::engine_state::voxels::generation::trees;
use voxel_world::engine_state::voxels::generation::WorldGenerator;
use voxel_world::World;

fn block_type() -> impl Strategy<Value = BlockType> {
    prop::sample::select(BlockType::ALL.to_vec())
}

fn in_bounds(x: i64, y: i64, z: i64) -> bool {
    (0..32).contains(&x) && (0..32).contains(&y) && (0..384).contains(&z)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn index_slot_writes_read_back(
        x in -8i64..40,
        y in -8i64..40,
        z in -8i64..400,
        written in block_type(),
    ) {
        let (mut world, _) = generated_world(&flat_config(2, 2, 0));

        match world.global_voxel_index_slot(x, y, z) {
            Some(slot) => {
                prop_assert!(in_bounds(x, y, z));
                // Generated palettes hold every material at the index equal to its id.
                *slot = written.id() as PaletteIndex;
                prop_assert_eq!(material(&world, x, y, z), Some(written));
            }
            None => {
                prop_assert!(!in_bounds(x, y, z));
                prop_assert!(world.global_block(x, y, z).is_none());
            }
        }
    }

    #[test]
    fn palettes_stay_consistent_under_writes(
        writes in prop::collection::vec((0i64..32, 0i64..32, 0i64..64, block_type()), 1..64),
    ) {
        let (mut world, _) = generated_world(&flat_config(2, 2, 0));

        for &(x, y, z, block_type) in &writes {
            let coord = world.set_block(x, y, z, block_type).unwrap();
            let slice = world.slice_at(coord).unwrap();
            prop_assert!(slice.check_integrity());
            prop_assert_eq!(material(&world, x, y, z), Some(block_type));
        }

        for chunk in world.section.chunks() {
            for slice in chunk.slices() {
                prop_assert!(slice.check_integrity());
                for (i, block) in slice.palette().iter().enumerate() {
                    prop_assert_eq!(slice.palette_index_of(block), Some(i as PaletteIndex));
                }
            }
        }
    }
}

#[test]
fn section_edges_read_as_air() {
    let (world, _) = generated_world(&flat_config(2, 2, 0));
    let chunk = world.section.chunk(0, 0).unwrap();
    let slice = chunk.slice(0).unwrap();

    for offset in [(-1, 5, 5), (5, -1, 5), (-1, -1, 5), (5, 5, -1), (-1, 0, -1)] {
        let (x, y, z) = offset;
        assert_eq!(world.section.local_block(chunk, slice, x, y, z), &AIR_BLOCK, "{offset:?}");
    }

    let top = chunk.slice(23).unwrap();
    assert_eq!(world.section.local_block(chunk, top, 3, 3, SLICE_DIMENSION), &AIR_BLOCK);

    // The far edge of the populated rectangle borders unallocated chunks.
    let corner = world.section.chunk(1, 1).unwrap();
    let slice = corner.slice(1).unwrap();
    assert_eq!(world.section.local_block(corner, slice, SLICE_DIMENSION, 4, 4), &AIR_BLOCK);
    assert_eq!(world.section.local_block(corner, slice, 4, SLICE_DIMENSION, 4), &AIR_BLOCK);
}

#[test]
fn neighbor_reads_agree_across_chunk_borders() {
    let (mut world, _) = generated_world(&terrain_config(2, 2, 0, 0));
    world.set_block(15, 7, 20, BlockType::OAK_LOG);
    world.set_block(16, 7, 20, BlockType::OAK_LEAVES);

    let west = world.section.chunk(0, 0).unwrap();
    let east = world.section.chunk(1, 0).unwrap();
    let (west_slice, east_slice) = (west.slice(1).unwrap(), east.slice(1).unwrap());

    for y in 0..SLICE_DIMENSION {
        for z in 0..SLICE_DIMENSION {
            let across_east = world.section.local_block(west, west_slice, SLICE_DIMENSION, y, z);
            let across_west = world.section.local_block(east, east_slice, -1, y, z);
            assert_eq!(across_east, east_slice.block_or_air(0, y as usize, z as usize));
            assert_eq!(across_west, west_slice.block_or_air(15, y as usize, z as usize));
        }
    }
    assert_eq!(
        world.section.local_block(west, west_slice, SLICE_DIMENSION, 7, 4).block_type(),
        Some(BlockType::OAK_LEAVES)
    );
}

fn transparent_at(world: &World, x: i64, y: i64, z: i64) -> bool {
    world
        .global_block(x, y, z)
        .map_or(true, |block| block.class().is_transparent())
}

fn air_at(world: &World, x: i64, y: i64, z: i64) -> bool {
    world.global_block(x, y, z).map_or(true, Block::is_air)
}

#[test]
fn meshes_emit_exactly_the_uncovered_faces() {
    let config = terrain_config(3, 3, 12, 0);
    let (mut world, _) = generated_world(&config);
    let mut rng = fastrand::Rng::with_seed(config.generation.rng_seed);
    trees::scatter_trees(&mut world, &mut rng, 12, 3, 3, 4);
    world.mesh_all();

    let chunk = world.section.chunk(1, 1).unwrap();
    for slice in chunk.slices() {
        let (mut opaque, mut foliage) = (0, 0);
        for x in chunk.x..chunk.x + 16 {
            for y in chunk.y..chunk.y + 16 {
                for z in slice.z()..slice.z() + 16 {
                    let Some(block) = world.global_block(x, y, z) else {
                        continue;
                    };
                    match block.class() {
                        MaterialClass::Air => {}
                        MaterialClass::Opaque => {
                            opaque += BlockSide::all()
                                .into_iter()
                                .filter(|side| {
                                    let o = side.offset();
                                    transparent_at(&world, x + o.x as i64, y + o.y as i64, z + o.z as i64)
                                })
                                .count();
                        }
                        MaterialClass::Foliage => {
                            let exposed = BlockSide::all().into_iter().any(|side| {
                                let o = side.offset();
                                air_at(&world, x + o.x as i64, y + o.y as i64, z + o.z as i64)
                            });
                            if exposed {
                                foliage += 6;
                            }
                        }
                    }
                }
            }
        }
        assert_eq!(slice.meshes.opaque.face_count(), opaque, "slice {}", slice.index());
        assert_eq!(slice.meshes.foliage.face_count(), foliage, "slice {}", slice.index());
    }
}

#[test]
fn buried_leaves_emit_nothing_and_exposed_leaves_emit_everything() {
    let (mut world, _) = generated_world(&flat_config(1, 1, 0));
    world.set_block(8, 8, 20, BlockType::OAK_LEAVES);
    world.set_block(4, 4, 41, BlockType::OAK_LEAVES);
    world.mesh_all();

    let buried = world.section.chunk(0, 0).unwrap().slice(1).unwrap();
    assert_eq!(buried.meshes.foliage.face_count(), 0);

    let surface = world.section.chunk(0, 0).unwrap().slice(2).unwrap();
    assert_eq!(surface.meshes.foliage.face_count(), 6);
    for vertex in &surface.meshes.foliage.vertices {
        assert!(vertex.position[2] >= 41.0 && vertex.position[2] <= 42.0);
    }
}

#[test]
fn generation_depends_only_on_position_and_config() {
    let config = terrain_config(2, 2, 0, 0);
    let (a, generator) = generated_world(&config);
    let (b, _) = generated_world(&config);

    for x in 0..32 {
        for y in 0..32 {
            let profile = generator.column_profile(&a.heightmap, x, y);
            assert_eq!(profile, generator.column_profile(&b.heightmap, x, y));
            for z in 0..=profile.surface_height + 2 {
                assert_eq!(material(&a, x, y, z), material(&b, x, y, z), "({x}, {y}, {z})");
            }
        }
    }

    let other = WorldGenerator::new(config.generation.clone()).unwrap();
    let heightmap = other.heightmap().unwrap();
    assert_eq!(
        other.column_profile(&heightmap, 123, 77),
        generator.column_profile(&a.heightmap, 123, 77)
    );
}
