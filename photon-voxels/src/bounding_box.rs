use core::fmt;

use crate::{
    Axis, FreeCoordinate, GridShape, NormalizedPosition, PhysicalSize, Position, VectorOps as _,
};

/// Axis-aligned bounding box in absolute (physical) coordinates.
///
/// The box is described by a minimum and a maximum point. Its derived per-axis
/// [`lengths()`](Self::lengths) are computed once at construction.
///
/// The constructors store what they are given. Every derived quantity is meaningful only
/// if `min < max` along every axis; that is the caller's responsibility. A degenerate box
/// is reported with [`log::warn!`] when constructed, and [`BoundingBox::checked_new()`]
/// may be used instead to reject one.
#[derive(Copy, Clone, PartialEq)]
pub struct BoundingBox {
    lower_bounds: Position,
    upper_bounds: Position,
    /// Invariant: equals `upper_bounds - lower_bounds`.
    lengths: PhysicalSize,
}

impl BoundingBox {
    /// Constructs a [`BoundingBox`] from its most-negative and most-positive corner points.
    ///
    /// ```
    /// use photon_voxels::{BoundingBox, PhysicalSize};
    ///
    /// let bounds = BoundingBox::new([0.0, -5.0, 10.0], [1.0, 5.0, 30.0]);
    /// assert_eq!(bounds.lengths(), PhysicalSize::new(1.0, 10.0, 20.0));
    /// ```
    #[inline]
    pub fn new(lower_bounds: impl Into<Position>, upper_bounds: impl Into<Position>) -> Self {
        let this = Self::new_unlogged(lower_bounds.into(), upper_bounds.into());
        if let Err(error) = this.validate() {
            log::warn!("constructed degenerate bounding box: {error}");
        }
        this
    }

    /// Constructs a [`BoundingBox`] from an `(min, max)` pair per axis, in X, Y, Z order.
    ///
    /// ```
    /// use photon_voxels::{BoundingBox, Position};
    ///
    /// let bounds = BoundingBox::from_ranges([[0.0, 1.0], [-5.0, 5.0], [10.0, 30.0]]);
    /// assert_eq!(bounds.lower_bounds(), Position::new(0.0, -5.0, 10.0));
    /// assert_eq!(bounds.upper_bounds(), Position::new(1.0, 5.0, 30.0));
    /// ```
    #[inline]
    pub fn from_ranges(ranges: [[FreeCoordinate; 2]; 3]) -> Self {
        let [[lx, hx], [ly, hy], [lz, hz]] = ranges;
        Self::new([lx, ly, lz], [hx, hy, hz])
    }

    /// Constructs a [`BoundingBox`] from its corner points, or returns an error if along
    /// some axis the minimum is not less than the maximum (including NaN).
    #[inline]
    pub fn checked_new(
        lower_bounds: impl Into<Position>,
        upper_bounds: impl Into<Position>,
    ) -> Result<Self, InvalidBoundsError> {
        let this = Self::new_unlogged(lower_bounds.into(), upper_bounds.into());
        this.validate()?;
        Ok(this)
    }

    fn new_unlogged(lower_bounds: Position, upper_bounds: Position) -> Self {
        Self {
            lower_bounds,
            upper_bounds,
            lengths: PhysicalSize::from(upper_bounds - lower_bounds),
        }
    }

    fn validate(&self) -> Result<(), InvalidBoundsError> {
        for axis in Axis::ALL {
            let (min, max) = (self.lower_bounds[axis], self.upper_bounds[axis]);
            // Written so that NaN fails the check.
            if !(min < max) {
                return Err(InvalidBoundsError { axis, min, max });
            }
        }
        Ok(())
    }

    /// The minimum corner of the box.
    #[inline]
    pub const fn lower_bounds(&self) -> Position {
        self.lower_bounds
    }

    /// The maximum corner of the box.
    #[inline]
    pub const fn upper_bounds(&self) -> Position {
        self.upper_bounds
    }

    /// The `(min, max)` pair of each axis, in X, Y, Z order.
    ///
    /// This is the inverse of [`BoundingBox::from_ranges()`].
    #[inline]
    pub fn ranges(&self) -> [[FreeCoordinate; 2]; 3] {
        Axis::ALL.map(|axis| self.range(axis))
    }

    /// The `(min, max)` pair of one axis.
    #[inline]
    pub fn range(&self, axis: Axis) -> [FreeCoordinate; 2] {
        [self.lower_bounds[axis], self.upper_bounds[axis]]
    }

    /// Size of the box along each axis: `max - min`.
    #[inline]
    pub const fn lengths(&self) -> PhysicalSize {
        self.lengths
    }

    /// The center of the enclosed volume.
    ///
    /// ```
    /// use photon_voxels::{BoundingBox, Position};
    ///
    /// let bounds = BoundingBox::new([1.0, 3.0, 5.0], [2.0, 4.0, 6.0]);
    /// assert_eq!(bounds.center(), Position::new(1.5, 3.5, 5.5));
    /// ```
    #[inline]
    pub fn center(&self) -> Position {
        self.lower_bounds.lerp(self.upper_bounds, 0.5)
    }

    /// Returns whether this box, including its boundary, contains the point.
    #[inline]
    pub fn contains(&self, point: Position) -> bool {
        Axis::ALL.into_iter().all(|axis| {
            self.lower_bounds[axis] <= point[axis] && point[axis] <= self.upper_bounds[axis]
        })
    }

    /// Transforms an absolute position to normalized coordinates, in which this box spans
    /// `[-1, 1]` along every axis.
    ///
    /// This is a linear map, not a bounds check: positions outside the box produce
    /// components outside `[-1, 1]`.
    ///
    /// ```
    /// use photon_voxels::{BoundingBox, NormalizedPosition, Position};
    ///
    /// let bounds = BoundingBox::new([0.0, 0.0, 0.0], [10.0, 20.0, 40.0]);
    /// assert_eq!(
    ///     bounds.normalize(Position::new(5.0, 0.0, 50.0)),
    ///     NormalizedPosition::new(0.0, -1.0, 1.5),
    /// );
    /// ```
    #[inline]
    pub fn normalize(&self, position: Position) -> NormalizedPosition {
        let mut normalized = NormalizedPosition::origin();
        for axis in Axis::ALL {
            normalized[axis] = (position[axis] - self.lower_bounds[axis]) / self.lengths[axis]
                * 2.0
                - 1.0;
        }
        normalized
    }

    /// Applies [`BoundingBox::normalize()`] to each of `positions`.
    #[inline]
    pub fn normalize_batch(&self, positions: &[Position]) -> Vec<NormalizedPosition> {
        positions.iter().map(|&p| self.normalize(p)).collect()
    }

    /// Per-axis size of one cell when this box is divided into `divisions` equal parts
    /// along each axis.
    #[inline]
    pub(crate) fn divide(&self, divisions: GridShape) -> PhysicalSize {
        self.lengths
            .zip(divisions.map(FreeCoordinate::from).cast_unit(), |length, n| {
                length / n
            })
    }
}

impl fmt::Debug for BoundingBox {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self {
            lower_bounds: l,
            upper_bounds: u,
            lengths: _,
        } = *self;
        f.debug_tuple("BoundingBox")
            .field(&(l.x..=u.x))
            .field(&(l.y..=u.y))
            .field(&(l.z..=u.z))
            .finish()
    }
}

/// Error when a [`BoundingBox`] would have a minimum not less than its maximum.
#[derive(Clone, Copy, Debug, displaydoc::Display, PartialEq)]
#[displaydoc("bounding box range on axis {axis:x} is empty or inverted: {min}..{max}")]
pub struct InvalidBoundsError {
    axis: Axis,
    min: FreeCoordinate,
    max: FreeCoordinate,
}

impl InvalidBoundsError {
    /// The first axis found to be invalid.
    #[inline]
    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl core::error::Error for InvalidBoundsError {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn unit_cube() -> BoundingBox {
        BoundingBox::new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0])
    }

    #[test]
    fn ranges_round_trip() {
        let ranges = [[-1.5, 2.0], [0.0, 10.0], [-300.0, -100.0]];
        assert_eq!(BoundingBox::from_ranges(ranges).ranges(), ranges);
    }

    #[test]
    fn lengths() {
        let bounds = BoundingBox::from_ranges([[-1.5, 2.0], [0.0, 10.0], [-300.0, -100.0]]);
        assert_eq!(bounds.lengths(), PhysicalSize::new(3.5, 10.0, 200.0));
    }

    #[test]
    fn checked_new_rejects_inverted() {
        let error = BoundingBox::checked_new([0.0, 2.0, 0.0], [1.0, 1.0, 1.0]).unwrap_err();
        assert_eq!(error.axis(), Axis::Y);
        assert_eq!(
            error.to_string(),
            "bounding box range on axis y is empty or inverted: 2..1"
        );
    }

    #[test]
    fn checked_new_rejects_empty_and_nan() {
        assert!(BoundingBox::checked_new([0.0, 0.0, 1.0], [1.0, 1.0, 1.0]).is_err());
        assert!(BoundingBox::checked_new([0.0, 0.0, 0.0], [f64::NAN, 1.0, 1.0]).is_err());
        assert!(BoundingBox::checked_new([0.0, 0.0, 0.0], [1.0, 1.0, 1.0]).is_ok());
    }

    /// The unchecked constructor stores degenerate input as-is.
    #[test]
    fn new_does_not_validate() {
        let bounds = BoundingBox::new([2.0, 0.0, 0.0], [1.0, 1.0, 1.0]);
        assert_eq!(bounds.lengths(), PhysicalSize::new(-1.0, 1.0, 1.0));
    }

    #[test]
    fn normalize_corners_and_center() {
        let bounds = BoundingBox::from_ranges([[-10.0, 10.0], [0.0, 4.0], [100.0, 300.0]]);
        assert_eq!(
            bounds.normalize(bounds.lower_bounds()),
            NormalizedPosition::new(-1.0, -1.0, -1.0)
        );
        assert_eq!(
            bounds.normalize(bounds.upper_bounds()),
            NormalizedPosition::new(1.0, 1.0, 1.0)
        );
        assert_eq!(
            bounds.normalize(bounds.center()),
            NormalizedPosition::new(0.0, 0.0, 0.0)
        );
    }

    #[test]
    fn normalize_interior_is_strictly_inside() {
        let bounds = BoundingBox::from_ranges([[-10.0, 10.0], [0.0, 4.0], [100.0, 300.0]]);
        for t in [0.001, 0.25, 0.5, 0.75, 0.999] {
            let p = bounds.lower_bounds().lerp(bounds.upper_bounds(), t);
            let n = bounds.normalize(p);
            for axis in Axis::ALL {
                assert!(-1.0 < n[axis] && n[axis] < 1.0, "{t} {axis:?} {n:?}");
            }
        }
    }

    #[test]
    fn normalize_does_not_clamp() {
        assert_eq!(
            unit_cube().normalize(Position::new(-1.0, 2.0, 0.5)),
            NormalizedPosition::new(-3.0, 3.0, 0.0)
        );
    }

    #[test]
    fn normalize_batch_matches_single() {
        let bounds = unit_cube();
        let points = [
            Position::new(0.25, 0.5, 0.75),
            Position::new(1.0, 0.0, 2.0),
        ];
        assert_eq!(
            bounds.normalize_batch(&points),
            points.map(|p| bounds.normalize(p)).to_vec()
        );
        assert!(bounds.normalize_batch(&[]).is_empty());
    }

    #[test]
    fn contains_is_inclusive() {
        let bounds = unit_cube();
        assert!(bounds.contains(Position::new(0.0, 0.0, 0.0)));
        assert!(bounds.contains(Position::new(1.0, 1.0, 1.0)));
        assert!(!bounds.contains(Position::new(1.0, 1.0, 1.0001)));
        assert!(!bounds.contains(Position::new(f64::NAN, 0.5, 0.5)));
    }

    #[test]
    fn debug() {
        let bounds = BoundingBox::new([1.0000001, 3.0, 5.0], [2.0, 4.0, 6.0]);
        assert_eq!(
            format!("{bounds:?}"),
            "BoundingBox(1.0000001..=2.0, 3.0..=4.0, 5.0..=6.0)"
        );
        assert_eq!(
            format!("{bounds:#?}\n"),
            indoc::indoc! {"
                BoundingBox(
                    1.0000001..=2.0,
                    3.0..=4.0,
                    5.0..=6.0,
                )
            "}
        );
    }
}
