use core::iter::FusedIterator;

use crate::{Axis, IndexCoordinate, VoxelIndex};

/// Iterator produced by [`VoxelGrid::indices_on_slice()`](crate::VoxelGrid::indices_on_slice).
///
/// Produces every voxel index with the slice axis fixed, the first of the other two axes
/// varying slowest and the second fastest.
#[derive(Clone, Debug)]
pub struct SliceIter {
    axis: Axis,
    position: IndexCoordinate,
    /// The two free axes, slowest-varying first.
    others: [Axis; 2],
    /// Extent of each of `others`. Invariant: both at least 1.
    extents: [IndexCoordinate; 2],
    /// Number of indices produced so far, counting from the front.
    front: IndexCoordinate,
    /// Number of indices in total minus the number produced from the back.
    back: IndexCoordinate,
}

impl SliceIter {
    #[inline]
    pub(crate) fn new(
        axis: Axis,
        position: IndexCoordinate,
        others: [Axis; 2],
        extents: [IndexCoordinate; 2],
    ) -> Self {
        Self {
            axis,
            position,
            others,
            extents,
            front: 0,
            back: extents[0] * extents[1],
        }
    }

    /// Returns the axis which is fixed across the slice.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Returns the value of [`Self::axis()`] shared by all produced indices.
    #[inline]
    pub fn position(&self) -> IndexCoordinate {
        self.position
    }

    /// Returns whether the iterator will produce the given index.
    #[inline]
    pub fn contains_index(&self, index: VoxelIndex) -> bool {
        if index[self.axis] != self.position {
            return false;
        }
        let [a, b] = self.others;
        let [na, nb] = self.extents;
        if !((0..na).contains(&index[a]) && (0..nb).contains(&index[b])) {
            return false;
        }
        (self.front..self.back).contains(&(index[a] * nb + index[b]))
    }

    fn index_at(&self, ordinal: IndexCoordinate) -> VoxelIndex {
        let [a, b] = self.others;
        let nb = self.extents[1];
        let mut index = VoxelIndex::origin();
        index[self.axis] = self.position;
        index[a] = ordinal / nb;
        index[b] = ordinal % nb;
        index
    }
}

impl Iterator for SliceIter {
    type Item = VoxelIndex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let result = self.index_at(self.front);
        self.front += 1;
        Some(result)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        // Cannot fail: the slice is part of a grid whose voxel count fits in usize.
        let remaining = usize::try_from(self.back - self.front).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl DoubleEndedIterator for SliceIter {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.index_at(self.back))
    }
}

impl ExactSizeIterator for SliceIter {}
impl FusedIterator for SliceIter {}
