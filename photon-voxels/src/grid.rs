use core::fmt;

use euclid::Size3D;

use crate::{
    Axis, AxisSelector, BoundingBox, FreeCoordinate, GridShape, IndexCoordinate,
    InvalidAxisError, Normalized, NormalizedPosition, PhysicalSize, Position, SliceIter,
    VectorOps as _, VoxelId, VoxelIndex,
};


/// A [`BoundingBox`] partitioned into a uniform grid of voxels.
///
/// The number of voxels along each axis, the [`shape()`](Self::shape), is independent per
/// axis, and so is the resulting [`voxel_size()`](Self::voxel_size).
///
/// A [`VoxelGrid`] converts among four representations of a position:
///
/// * absolute coordinates ([`Position`]),
/// * normalized coordinates ([`NormalizedPosition`]), in which the box spans `[-1, 1]`,
/// * voxel indices ([`VoxelIndex`]), the integer position of a voxel along each axis,
/// * voxel identifiers ([`VoxelId`]), a single integer per voxel, with X varying fastest:
///   `id = x + y * shape.width + z * shape.width * shape.height`.
///
/// # Out-of-range input
///
/// Conversions *from absolute coordinates* ([`coord_to_index()`](Self::coord_to_index),
/// [`coord_to_voxel_id()`](Self::coord_to_voxel_id), [`digitize()`](Self::digitize))
/// clamp to the nearest boundary voxel. Every position, even one far outside the box or
/// NaN, resolves to *some* voxel of the grid; lookups keyed by the result never fail.
///
/// Conversions *from indices or identifiers* do not check their input. An index outside
/// the grid flattens to an identifier that does not name the voxel it appears to, and an
/// identifier outside `0..voxel_count()` unflattens to an index outside the grid.
/// Use [`is_valid_index()`](Self::is_valid_index) where that matters.
///
/// ```
/// use photon_voxels::{BoundingBox, Position, VoxelGrid, VoxelIndex};
///
/// let grid = VoxelGrid::new([2, 2, 2], BoundingBox::new([0.0; 3], [2.0; 3])).unwrap();
///
/// assert_eq!(grid.index_to_voxel_id(VoxelIndex::new(1, 1, 1)), 7);
/// assert_eq!(grid.voxel_id_to_index(7), VoxelIndex::new(1, 1, 1));
/// assert_eq!(grid.index_to_coord(VoxelIndex::new(1, 0, 1)), Position::new(1.5, 0.5, 1.5));
///
/// // Clamped to the boundary voxels
/// assert_eq!(grid.coord_to_index(Position::new(-5.0, -5.0, -5.0)), VoxelIndex::new(0, 0, 0));
/// assert_eq!(grid.coord_to_index(Position::new(10.0, 10.0, 10.0)), VoxelIndex::new(1, 1, 1));
/// ```
#[derive(Clone, Copy, PartialEq)]
pub struct VoxelGrid {
    bounds: BoundingBox,
    /// Invariant: every component is at least 1.
    shape: GridShape,
    /// Invariant: equals `bounds.lengths() / shape`.
    voxel_size: PhysicalSize,
    /// Multipliers which flatten an index to an identifier: `[1, nx, nx * ny]`.
    strides: [VoxelId; 3],
    /// Invariant: equals the product of `shape`, and fits in both `usize` and [`VoxelId`].
    voxel_count: usize,
}

impl VoxelGrid {
    /// Constructs a [`VoxelGrid`] dividing `bounds` into `shape` voxels along each axis.
    ///
    /// Returns an error if any component of `shape` is zero, or if the total number of
    /// voxels cannot be represented as both a `usize` and a [`VoxelId`].
    /// `bounds` is not validated; see [`BoundingBox`].
    #[inline]
    pub fn new(shape: impl Into<GridShape>, bounds: BoundingBox) -> Result<Self, GridShapeError> {
        Self::new_impl(shape.into(), bounds)
    }

    fn new_impl(shape: GridShape, bounds: BoundingBox) -> Result<Self, GridShapeError> {
        if shape.width == 0 || shape.height == 0 || shape.depth == 0 {
            return Err(GridShapeError(ShapeErrorKind::Empty { shape }));
        }

        // Cannot overflow: three u32 factors fit in 96 bits.
        let count = u128::from(shape.width) * u128::from(shape.height) * u128::from(shape.depth);
        let voxel_count = usize::try_from(count)
            .ok()
            .filter(|&c| VoxelId::try_from(c).is_ok())
            .ok_or(GridShapeError(ShapeErrorKind::TooManyVoxels { shape, count }))?;

        let nx = VoxelId::from(shape.width);
        let ny = VoxelId::from(shape.height);
        Ok(Self {
            bounds,
            shape,
            voxel_size: bounds.divide(shape),
            // nx * ny cannot overflow since nx * ny * nz fits and nz >= 1.
            strides: [1, nx, nx * ny],
            voxel_count,
        })
    }

    /// Constructs a [`VoxelGrid`] from a voxel count and an `(min, max)` pair per axis.
    ///
    /// This is equivalent to `VoxelGrid::new(shape, BoundingBox::from_ranges(ranges))`.
    #[inline]
    pub fn from_ranges(
        shape: impl Into<GridShape>,
        ranges: [[FreeCoordinate; 2]; 3],
    ) -> Result<Self, GridShapeError> {
        Self::new(shape, BoundingBox::from_ranges(ranges))
    }

    /// Returns the [`BoundingBox`] this grid divides.
    #[inline]
    pub const fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Returns the number of voxels along each axis.
    #[inline]
    pub const fn shape(&self) -> GridShape {
        self.shape
    }

    /// Returns the number of voxels along `axis`, as an index coordinate.
    #[inline]
    fn extent(&self, axis: Axis) -> IndexCoordinate {
        IndexCoordinate::from(self.shape[axis])
    }

    /// Returns the physical size of one voxel along each axis.
    #[inline]
    pub const fn voxel_size(&self) -> PhysicalSize {
        self.voxel_size
    }

    /// Returns the size of one voxel along each axis in normalized coordinates,
    /// which is `2 / shape`.
    #[inline]
    pub fn normalized_voxel_size(&self) -> Size3D<FreeCoordinate, Normalized> {
        self.shape.map(|n| 2.0 / FreeCoordinate::from(n)).cast_unit()
    }

    /// Returns the total number of voxels in the grid, the product of the [`shape()`](Self::shape).
    ///
    /// Valid voxel identifiers are exactly `0..voxel_count()`.
    #[inline]
    pub const fn voxel_count(&self) -> usize {
        self.voxel_count
    }

    /// Transforms an absolute position to normalized coordinates.
    /// See [`BoundingBox::normalize()`].
    #[inline]
    pub fn normalize(&self, position: Position) -> NormalizedPosition {
        self.bounds.normalize(position)
    }

    // --- Flattening ---

    /// Converts a voxel index to its voxel identifier.
    ///
    /// The index is not checked; see the [type documentation](Self#out-of-range-input).
    #[inline]
    pub fn index_to_voxel_id(&self, index: VoxelIndex) -> VoxelId {
        // Wrapping so that arbitrarily bad input cannot panic; in-range input cannot wrap.
        let [sx, sy, sz] = self.strides;
        index
            .x
            .wrapping_mul(sx)
            .wrapping_add(index.y.wrapping_mul(sy))
            .wrapping_add(index.z.wrapping_mul(sz))
    }

    /// Converts a voxel identifier to its voxel index.
    ///
    /// This is the exact inverse of [`index_to_voxel_id()`](Self::index_to_voxel_id) for
    /// identifiers in `0..voxel_count()`. Other identifiers are not rejected, but produce
    /// an index outside the grid.
    #[inline]
    pub fn voxel_id_to_index(&self, id: VoxelId) -> VoxelIndex {
        let [_, sy, sz] = self.strides;
        VoxelIndex::new(
            id.rem_euclid(sy),
            id.div_euclid(sy).rem_euclid(self.extent(Axis::Y)),
            id.div_euclid(sz),
        )
    }

    // --- Index and coordinate ---

    /// Converts a voxel index to the absolute position of the voxel's center.
    ///
    /// The index is not checked; an index outside the grid produces a position outside
    /// the box, continuing the same lattice.
    #[inline]
    pub fn index_to_coord(&self, index: VoxelIndex) -> Position {
        let lower = self.bounds.lower_bounds();
        let mut position = Position::origin();
        for axis in Axis::ALL {
            position[axis] =
                lower[axis] + (index[axis] as FreeCoordinate + 0.5) * self.voxel_size[axis];
        }
        position
    }

    /// Converts an absolute position to the index of the voxel containing it.
    ///
    /// Each axis is clamped separately into `0..shape[axis]`, so positions outside the box
    /// resolve to the nearest boundary voxel. NaN components resolve to index 0.
    ///
    /// Voxels are half-open along each axis, except that the box's maximum belongs to
    /// the last voxel.
    #[inline]
    pub fn coord_to_index(&self, position: Position) -> VoxelIndex {
        let mut index = VoxelIndex::origin();
        for axis in Axis::ALL {
            index[axis] = self.bin_along(position[axis], axis);
        }
        index
    }

    /// Converts a voxel identifier to the absolute position of the voxel's center.
    ///
    /// Equivalent to `self.index_to_coord(self.voxel_id_to_index(id))`.
    #[inline]
    pub fn voxel_id_to_coord(&self, id: VoxelId) -> Position {
        self.index_to_coord(self.voxel_id_to_index(id))
    }

    /// Converts an absolute position to the identifier of the voxel containing it,
    /// with the same clamping as [`coord_to_index()`](Self::coord_to_index).
    ///
    /// The result is always in `0..voxel_count()`.
    #[inline]
    pub fn coord_to_voxel_id(&self, position: Position) -> VoxelId {
        self.index_to_voxel_id(self.coord_to_index(position))
    }

    // --- Batches ---

    /// Applies [`index_to_voxel_id()`](Self::index_to_voxel_id) to each of `indices`.
    #[inline]
    pub fn index_to_voxel_id_batch(&self, indices: &[VoxelIndex]) -> Vec<VoxelId> {
        indices.iter().map(|&i| self.index_to_voxel_id(i)).collect()
    }

    /// Applies [`voxel_id_to_index()`](Self::voxel_id_to_index) to each of `ids`.
    #[inline]
    pub fn voxel_id_to_index_batch(&self, ids: &[VoxelId]) -> Vec<VoxelIndex> {
        ids.iter().map(|&id| self.voxel_id_to_index(id)).collect()
    }

    /// Applies [`index_to_coord()`](Self::index_to_coord) to each of `indices`.
    #[inline]
    pub fn index_to_coord_batch(&self, indices: &[VoxelIndex]) -> Vec<Position> {
        indices.iter().map(|&i| self.index_to_coord(i)).collect()
    }

    /// Applies [`coord_to_index()`](Self::coord_to_index) to each of `positions`.
    #[inline]
    pub fn coord_to_index_batch(&self, positions: &[Position]) -> Vec<VoxelIndex> {
        positions.iter().map(|&p| self.coord_to_index(p)).collect()
    }

    /// Applies [`voxel_id_to_coord()`](Self::voxel_id_to_coord) to each of `ids`.
    #[inline]
    pub fn voxel_id_to_coord_batch(&self, ids: &[VoxelId]) -> Vec<Position> {
        ids.iter().map(|&id| self.voxel_id_to_coord(id)).collect()
    }

    /// Applies [`coord_to_voxel_id()`](Self::coord_to_voxel_id) to each of `positions`.
    #[inline]
    pub fn coord_to_voxel_id_batch(&self, positions: &[Position]) -> Vec<VoxelId> {
        positions.iter().map(|&p| self.coord_to_voxel_id(p)).collect()
    }

    /// Applies [`normalize()`](Self::normalize) to each of `positions`.
    #[inline]
    pub fn normalize_batch(&self, positions: &[Position]) -> Vec<NormalizedPosition> {
        self.bounds.normalize_batch(positions)
    }

    // --- Bins ---

    /// Returns the `shape[axis] + 1` voxel boundaries along `axis`, evenly spaced from the
    /// box's minimum to its maximum (both exact).
    ///
    /// ```
    /// use photon_voxels::{Axis, VoxelGrid};
    ///
    /// let grid = VoxelGrid::from_ranges([4, 1, 1], [[0.0, 1.0], [0.0, 1.0], [0.0, 1.0]]).unwrap();
    /// assert_eq!(grid.bin_edges(Axis::X), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    /// assert_eq!(grid.bin_edges(Axis::Y), vec![0.0, 1.0]);
    /// ```
    #[inline]
    pub fn bin_edges(&self, axis: Axis) -> Vec<FreeCoordinate> {
        let [min, max] = self.bounds.range(axis);
        let n = self.shape[axis];
        (0..=n)
            .map(|i| {
                let t = FreeCoordinate::from(i) / FreeCoordinate::from(n);
                // This form is exact at both ends.
                min * (1.0 - t) + max * t
            })
            .collect()
    }

    /// Returns [`bin_edges()`](Self::bin_edges) for each axis, in X, Y, Z order.
    #[inline]
    pub fn bins(&self) -> [Vec<FreeCoordinate>; 3] {
        Axis::ALL.map(|axis| self.bin_edges(axis))
    }

    /// Returns the `shape[axis]` midpoints of consecutive [`bin_edges()`](Self::bin_edges)
    /// along `axis`.
    ///
    /// These are the same values as the coordinates produced by
    /// [`index_to_coord()`](Self::index_to_coord), up to rounding.
    #[inline]
    pub fn bin_centers(&self, axis: Axis) -> Vec<FreeCoordinate> {
        self.bin_edges(axis)
            .windows(2)
            .map(|pair| (pair[0] + pair[1]) / 2.0)
            .collect()
    }

    /// Returns [`bin_centers()`](Self::bin_centers) for each axis, in X, Y, Z order.
    #[inline]
    pub fn bin_centers_all(&self) -> [Vec<FreeCoordinate>; 3] {
        Axis::ALL.map(|axis| self.bin_centers(axis))
    }

    // --- Axes and slices ---

    /// Resolves an axis specifier, returning the axis and the two other axes in
    /// ascending order.
    ///
    /// ```
    /// use photon_voxels::{Axis, VoxelGrid};
    ///
    /// assert_eq!(VoxelGrid::select_axis("y"), Ok((Axis::Y, [Axis::X, Axis::Z])));
    /// assert_eq!(VoxelGrid::select_axis(0usize), Ok((Axis::X, [Axis::Y, Axis::Z])));
    /// assert!(VoxelGrid::select_axis(3usize).is_err());
    /// ```
    #[inline]
    pub fn select_axis(axis: impl AxisSelector) -> Result<(Axis, [Axis; 2]), InvalidAxisError> {
        let axis = axis.to_axis()?;
        Ok((axis, axis.others()))
    }

    /// Iterates over the index of every voxel in the axis-aligned slice at which
    /// `axis` has the value `position`.
    ///
    /// The other two axes range over their whole extent. `position` is not checked, so a
    /// slice outside the grid produces indices which are not
    /// [valid](Self::is_valid_index).
    ///
    /// ```
    /// use photon_voxels::{VoxelGrid, VoxelIndex};
    ///
    /// let grid = VoxelGrid::from_ranges([3, 4, 5], [[0.0, 1.0]; 3]).unwrap();
    /// let slice: Vec<VoxelIndex> = grid.indices_on_slice("x", 0).unwrap().collect();
    /// assert_eq!(slice.len(), 20);
    /// assert!(slice.iter().all(|index| index.x == 0));
    /// ```
    #[inline]
    pub fn indices_on_slice(
        &self,
        axis: impl AxisSelector,
        position: IndexCoordinate,
    ) -> Result<SliceIter, InvalidAxisError> {
        let (axis, others) = Self::select_axis(axis)?;
        Ok(SliceIter::new(
            axis,
            position,
            others,
            others.map(|other| self.extent(other)),
        ))
    }

    // --- Validity ---

    /// Returns whether every component of `index` lies within the grid.
    ///
    /// ```
    /// use photon_voxels::{VoxelGrid, VoxelIndex};
    ///
    /// let grid = VoxelGrid::from_ranges([3, 4, 5], [[0.0, 1.0]; 3]).unwrap();
    /// assert!(grid.is_valid_index(VoxelIndex::new(0, 0, 0)));
    /// assert!(grid.is_valid_index(VoxelIndex::new(2, 3, 4)));
    /// assert!(!grid.is_valid_index(VoxelIndex::new(0, 0, 5)));
    /// ```
    #[inline]
    pub fn is_valid_index(&self, index: VoxelIndex) -> bool {
        self.index_validity(index) == [true; 3]
    }

    /// Returns, per axis, whether that component of `index` lies in `0..shape[axis]`.
    ///
    /// The result may be indexed by [`Axis`].
    #[inline]
    pub fn index_validity(&self, index: VoxelIndex) -> [bool; 3] {
        Axis::ALL.map(|axis| (0..self.extent(axis)).contains(&index[axis]))
    }

    /// Applies [`is_valid_index()`](Self::is_valid_index) to each of `indices`.
    #[inline]
    pub fn is_valid_index_batch(&self, indices: &[VoxelIndex]) -> Vec<bool> {
        indices.iter().map(|&i| self.is_valid_index(i)).collect()
    }

    /// Applies [`index_validity()`](Self::index_validity) to each of `indices`.
    #[inline]
    pub fn index_validity_batch(&self, indices: &[VoxelIndex]) -> Vec<[bool; 3]> {
        indices.iter().map(|&i| self.index_validity(i)).collect()
    }

    // --- Digitization ---

    /// Returns the index of the bin along `axis` which contains the coordinate value `x`.
    ///
    /// Like [`coord_to_index()`](Self::coord_to_index), values outside the box are clamped
    /// into `0..shape[axis]` rather than rejected.
    ///
    /// ```
    /// use photon_voxels::VoxelGrid;
    ///
    /// let grid = VoxelGrid::from_ranges([5, 1, 1], [[0.0, 10.0], [0.0, 1.0], [0.0, 1.0]]).unwrap();
    /// assert_eq!(grid.digitize(3.5, "x"), Ok(1));
    /// assert_eq!(grid.digitize(-1.0, "x"), Ok(0));
    /// assert_eq!(grid.digitize(11.0, "x"), Ok(4));
    /// assert!(grid.digitize(1.0, "w").is_err());
    /// ```
    #[inline]
    pub fn digitize(
        &self,
        x: FreeCoordinate,
        axis: impl AxisSelector,
    ) -> Result<IndexCoordinate, InvalidAxisError> {
        let axis = axis.to_axis()?;
        Ok(self.bin_along(x, axis))
    }

    /// Applies [`digitize()`](Self::digitize) to each of `values`.
    ///
    /// The axis is resolved once; an invalid axis fails even if `values` is empty.
    #[inline]
    pub fn digitize_batch(
        &self,
        values: &[FreeCoordinate],
        axis: impl AxisSelector,
    ) -> Result<Vec<IndexCoordinate>, InvalidAxisError> {
        let axis = axis.to_axis()?;
        Ok(values.iter().map(|&x| self.bin_along(x, axis)).collect())
    }

    /// Shared kernel of [`Self::coord_to_index()`] and [`Self::digitize()`].
    #[inline(always)]
    fn bin_along(&self, x: FreeCoordinate, axis: Axis) -> IndexCoordinate {
        let lower = self.bounds.lower_bounds()[axis];
        // `as` saturates out-of-range values and maps NaN to 0, which the clamp then
        // brings into range.
        let bin = ((x - lower) / self.voxel_size[axis]).floor() as IndexCoordinate;
        // Cannot panic: extent is at least 1.
        bin.clamp(0, self.extent(axis) - 1)
    }
}

/// Summarizes the grid as its range and voxel count along each axis.
///
/// ```
/// use photon_voxels::VoxelGrid;
///
/// let grid = VoxelGrid::from_ranges([2, 3, 4], [[0.0, 2.0], [-1.5, 1.5], [0.0, 100.0]]).unwrap();
/// assert_eq!(grid.to_string(), "Meta x:(0,2,2) y:(-1.5,1.5,3) z:(0,100,4)");
/// ```
impl fmt::Display for VoxelGrid {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Meta")?;
        for axis in Axis::ALL {
            let [min, max] = self.bounds.range(axis);
            let n = self.shape[axis];
            write!(f, " {axis:x}:({min},{max},{n})")?;
        }
        Ok(())
    }
}

impl fmt::Debug for VoxelGrid {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            bounds,
            shape,
            voxel_size,
            strides: _,
            voxel_count: _,
        } = self;
        f.debug_struct("VoxelGrid")
            .field("bounds", bounds)
            .field("shape", &shape.to_array())
            .field("voxel_size", &voxel_size.to_array())
            .finish_non_exhaustive()
    }
}

/// Error when a [`VoxelGrid`] cannot be constructed with the given shape.
#[derive(Clone, Copy, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("{0}")]
pub struct GridShapeError(ShapeErrorKind);

/// Error details for [`GridShapeError`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum ShapeErrorKind {
    Empty { shape: GridShape },
    TooManyVoxels { shape: GridShape, count: u128 },
}

impl fmt::Display for ShapeErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShapeErrorKind::Empty { shape } => write!(
                f,
                "voxel grid shape {:?} must have at least one voxel along every axis",
                shape.to_array()
            ),
            ShapeErrorKind::TooManyVoxels { shape, count } => write!(
                f,
                "voxel grid shape {:?} has {count} voxels, which is too many to be identified",
                shape.to_array()
            ),
        }
    }
}

impl core::error::Error for GridShapeError {}
