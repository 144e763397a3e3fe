#![no_main]

use libfuzzer_sys::fuzz_target;

use pretty_assertions::assert_eq;

use photon_voxels::{Axis, Position, VoxelGrid, VoxelId};

#[derive(Debug, arbitrary::Arbitrary)]
struct Input {
    shape: [u8; 3],
    ranges: [[f64; 2]; 3],
    position: [f64; 3],
    id: u32,
    axis: Axis,
    slice_position: i8,
}

fuzz_target!(|input: Input| check(input));

fn check(input: Input) {
    let shape = input.shape.map(|n| u32::from(n) + 1);
    // Degenerate and non-finite ranges are deliberately allowed; clamping must still hold.
    let grid = VoxelGrid::from_ranges(shape, input.ranges).unwrap();
    let count = grid.voxel_count() as VoxelId;

    let position = Position::from(input.position);
    let index = grid.coord_to_index(position);
    assert!(grid.is_valid_index(index), "{position:?} → {index:?}");
    let id = grid.coord_to_voxel_id(position);
    assert!((0..count).contains(&id), "{position:?} → {id}");
    assert_eq!(grid.index_to_voxel_id(index), id);
    assert_eq!(
        grid.digitize(input.position[input.axis], input.axis),
        Ok(index[input.axis])
    );

    let id = VoxelId::from(input.id) % count;
    let index = grid.voxel_id_to_index(id);
    assert!(grid.is_valid_index(index), "{id} → {index:?}");
    assert_eq!(grid.index_to_voxel_id(index), id);

    let slice = grid
        .indices_on_slice(input.axis, input.slice_position.into())
        .unwrap();
    let expected_len = slice.len();
    let mut produced = 0;
    for index in slice {
        assert_eq!(index[input.axis], i64::from(input.slice_position));
        let in_grid = (0..i64::from(shape[input.axis])).contains(&index[input.axis]);
        assert_eq!(grid.is_valid_index(index), in_grid);
        produced += 1;
    }
    assert_eq!(produced, expected_len);
}
