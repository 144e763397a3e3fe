//! Numeric types used for the four position representations and related quantities.
//!
//! Each representation gets its own `euclid` unit type, so that an absolute position can
//! never be passed where a normalized one or a voxel index is expected.

use euclid::{Point3D, Size3D, Vector3D};

/// Unit of absolute (physical) coordinates, e.g. detector-frame centimeters.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Physical {}

/// Unit of normalized coordinates, in which a [`BoundingBox`](crate::BoundingBox) spans
/// `[-1, 1]` along every axis.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Normalized {}

/// Unit of voxel-index space, in which one voxel has size 1.
#[allow(clippy::exhaustive_enums)]
#[derive(Debug)]
pub enum Voxel {}

/// Scalar type of absolute and normalized coordinates.
pub type FreeCoordinate = f64;

/// A position in absolute coordinates.
pub type Position = Point3D<FreeCoordinate, Physical>;

/// A displacement or per-axis length in absolute coordinates.
pub type PhysicalVector = Vector3D<FreeCoordinate, Physical>;

/// Per-axis extent in absolute coordinates, such as a box's lengths or a voxel's size.
pub type PhysicalSize = Size3D<FreeCoordinate, Physical>;

/// A position in normalized coordinates.
pub type NormalizedPosition = Point3D<FreeCoordinate, Normalized>;

/// Scalar type of voxel index components.
///
/// This is signed so that indices outside the grid (which may be produced by arithmetic
/// on unvalidated input) remain representable.
pub type IndexCoordinate = i64;

/// A voxel index: the integer position of a voxel along each axis.
///
/// A voxel index is valid for a grid when every component lies in `0..shape[axis]`.
pub type VoxelIndex = Point3D<IndexCoordinate, Voxel>;

/// Number of voxels along each axis of a grid.
pub type GridShape = Size3D<u32, Voxel>;

/// Single integer uniquely identifying a voxel, obtained by flattening its
/// [`VoxelIndex`] with the X axis varying fastest.
///
/// Identifiers of voxels inside a grid lie in `0..voxel_count`.
pub type VoxelId = i64;

/// Additional element-wise operations on `euclid` types.
pub trait VectorOps<O> {
    /// Input vector element type.
    type Elem;
    /// Output vector type.
    type Output;
    /// Apply the function to each element.
    fn map<F: FnMut(Self::Elem) -> O>(self, f: F) -> Self::Output;
    /// Apply the function to each element of the two inputs, pairwise.
    fn zip<F: FnMut(Self::Elem, Self::Elem) -> O>(self, rhs: Self, f: F) -> Self::Output;
}

impl<T, O, U> VectorOps<O> for Size3D<T, U> {
    type Elem = T;
    type Output = Size3D<O, U>;

    #[inline]
    fn map<F: FnMut(Self::Elem) -> O>(self, mut f: F) -> Self::Output {
        Size3D::new(f(self.width), f(self.height), f(self.depth))
    }

    #[inline]
    fn zip<F: FnMut(Self::Elem, Self::Elem) -> O>(self, rhs: Self, mut f: F) -> Self::Output {
        Size3D::new(
            f(self.width, rhs.width),
            f(self.height, rhs.height),
            f(self.depth, rhs.depth),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_map_zip() {
        let a = GridShape::new(1, 2, 3);
        assert_eq!(a.map(|n| n * 10), GridShape::new(10, 20, 30));
        assert_eq!(
            a.zip(GridShape::new(4, 5, 6), |x, y| x + y),
            GridShape::new(5, 7, 9)
        );
    }
}
