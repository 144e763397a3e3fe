//! Coordinate model for voxelized photon-visibility libraries.
//!
//! A photon library stores one value per voxel of a uniform grid over an axis-aligned
//! detector region. This crate provides the geometry underlying such a library, and
//! nothing else: no storage, no interpolation, no file formats (for loading a grid
//! definition, see `photon-voxels-port`).
//!
//! * [`BoundingBox`] is the region itself, in absolute coordinates, and converts absolute
//!   positions to normalized coordinates.
//! * [`VoxelGrid`] divides a [`BoundingBox`] into voxels and converts among absolute
//!   positions, voxel indices, and flattened voxel identifiers. It also answers questions
//!   about bins along each axis, slices, and index validity.
//!
//! All types are immutable after construction, and all operations are pure functions of
//! their inputs, so a grid may be freely shared between threads.

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]
#![warn(clippy::missing_inline_in_public_items)]

mod axis;
pub use axis::*;
mod bounding_box;
pub use bounding_box::*;
mod coord;
pub use coord::*;
mod grid;
pub use grid::*;
mod slice;
pub use slice::*;

// reexport for convenience of our tests and dependents
#[doc(hidden)]
pub use euclid;

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_send_sync<T: Send + Sync>() {}

    #[test]
    fn types_are_send_sync() {
        assert_send_sync::<BoundingBox>();
        assert_send_sync::<VoxelGrid>();
        assert_send_sync::<SliceIter>();
        assert_send_sync::<GridShapeError>();
        assert_send_sync::<InvalidAxisError>();
    }
}
