use core::fmt;
use core::str::FromStr;

/// Enumeration of the axes of three-dimensional space.
///
/// Can be used to infallibly index 3-component arrays and vectors, and is the only
/// way axes are named in this crate; integers and labels are converted to [`Axis`]
/// through [`AxisSelector`] before use.
#[expect(clippy::exhaustive_enums)]
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, exhaust::Exhaust)]
#[cfg_attr(feature = "arbitrary", derive(arbitrary::Arbitrary))]
#[repr(u8)]
#[allow(missing_docs)]
pub enum Axis {
    X = 0,
    Y = 1,
    Z = 2,
}

/// Lookup table from axis label to [`Axis`].
const LABELS: [(&str, Axis); 3] = [("x", Axis::X), ("y", Axis::Y), ("z", Axis::Z)];

impl Axis {
    /// All three axes in the standard order, [X, Y, Z].
    ///
    /// This is also the flattening order of voxel identifiers: X varies fastest.
    pub const ALL: [Self; 3] = [Self::X, Self::Y, Self::Z];

    /// Convert the axis to a number for indexing 3-element arrays.
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the axis with the given position in [`Axis::ALL`], if there is one.
    #[inline]
    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Axis::X),
            1 => Some(Axis::Y),
            2 => Some(Axis::Z),
            _ => None,
        }
    }

    /// Returns the lowercase label of this axis, `"x"`, `"y"`, or `"z"`.
    #[inline]
    pub const fn label(self) -> &'static str {
        LABELS[self as usize].0
    }

    /// Returns the two axes other than `self`, in ascending order.
    ///
    /// ```
    /// use photon_voxels::Axis;
    ///
    /// assert_eq!(Axis::X.others(), [Axis::Y, Axis::Z]);
    /// assert_eq!(Axis::Y.others(), [Axis::X, Axis::Z]);
    /// assert_eq!(Axis::Z.others(), [Axis::X, Axis::Y]);
    /// ```
    #[inline]
    pub const fn others(self) -> [Self; 2] {
        match self {
            Axis::X => [Axis::Y, Axis::Z],
            Axis::Y => [Axis::X, Axis::Z],
            Axis::Z => [Axis::X, Axis::Y],
        }
    }
}

/// Format the axis as one of the strings "x", "y", or "z" (lowercase).
impl fmt::LowerHex for Axis {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
/// Format the axis as one of the strings "X", "Y", or "Z" (uppercase).
impl fmt::UpperHex for Axis {
    #[allow(clippy::missing_inline_in_public_items)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        })
    }
}

impl From<Axis> for u8 {
    #[inline]
    fn from(value: Axis) -> Self {
        value as u8
    }
}
impl From<Axis> for usize {
    #[inline]
    fn from(value: Axis) -> Self {
        value as usize
    }
}

/// Parses the labels `"x"`, `"y"`, and `"z"`. Matching is exact; uppercase is rejected.
impl FromStr for Axis {
    type Err = InvalidAxisError;

    #[inline]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LABELS
            .iter()
            .find(|&&(label, _)| label == s)
            .map(|&(_, axis)| axis)
            .ok_or_else(|| InvalidAxisError::new(format_args!("{s:?}")))
    }
}

/// Something which may name an [`Axis`]: the axis itself, its integer position, or its label.
///
/// This is the closed set of axis specifiers accepted by
/// [`VoxelGrid::select_axis()`](crate::VoxelGrid::select_axis),
/// [`VoxelGrid::digitize()`](crate::VoxelGrid::digitize), and friends.
///
/// ```
/// use photon_voxels::{Axis, AxisSelector};
///
/// assert_eq!(Axis::Y.to_axis(), Ok(Axis::Y));
/// assert_eq!(2usize.to_axis(), Ok(Axis::Z));
/// assert_eq!("x".to_axis(), Ok(Axis::X));
/// assert!("w".to_axis().is_err());
/// assert!((-1i64).to_axis().is_err());
/// ```
pub trait AxisSelector {
    /// Resolves this specifier to an [`Axis`].
    fn to_axis(self) -> Result<Axis, InvalidAxisError>;
}

impl AxisSelector for Axis {
    #[inline]
    fn to_axis(self) -> Result<Axis, InvalidAxisError> {
        Ok(self)
    }
}

impl AxisSelector for usize {
    #[inline]
    fn to_axis(self) -> Result<Axis, InvalidAxisError> {
        Axis::from_index(self).ok_or_else(|| InvalidAxisError::new(self))
    }
}

impl AxisSelector for i32 {
    #[inline]
    fn to_axis(self) -> Result<Axis, InvalidAxisError> {
        usize::try_from(self)
            .ok()
            .and_then(Axis::from_index)
            .ok_or_else(|| InvalidAxisError::new(self))
    }
}

impl AxisSelector for i64 {
    #[inline]
    fn to_axis(self) -> Result<Axis, InvalidAxisError> {
        usize::try_from(self)
            .ok()
            .and_then(Axis::from_index)
            .ok_or_else(|| InvalidAxisError::new(self))
    }
}

impl AxisSelector for char {
    #[inline]
    fn to_axis(self) -> Result<Axis, InvalidAxisError> {
        let mut buf = [0; 4];
        self.encode_utf8(&mut buf)
            .parse()
            .map_err(|_| InvalidAxisError::new(format_args!("{self:?}")))
    }
}

impl AxisSelector for &str {
    #[inline]
    fn to_axis(self) -> Result<Axis, InvalidAxisError> {
        self.parse()
    }
}

/// Error when an axis specifier does not name one of the three [`Axis`] values.
#[derive(Clone, Debug, displaydoc::Display, Eq, PartialEq)]
#[displaydoc("unknown axis {specifier}; expected 0, 1, 2, \"x\", \"y\", or \"z\"")]
pub struct InvalidAxisError {
    /// The rejected specifier, formatted for display.
    specifier: String,
}

impl InvalidAxisError {
    fn new(specifier: impl fmt::Display) -> Self {
        Self {
            specifier: specifier.to_string(),
        }
    }
}

impl core::error::Error for InvalidAxisError {}

mod impl_index_axis {
    use super::Axis;
    use core::ops;

    impl<T> ops::Index<Axis> for [T; 3] {
        type Output = T;

        #[inline]
        fn index(&self, index: Axis) -> &Self::Output {
            &self[index as usize]
        }
    }
    impl<T> ops::IndexMut<Axis> for [T; 3] {
        #[inline]
        fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
            &mut self[index as usize]
        }
    }

    macro_rules! impl_xyz_e {
        ($x:ident $y:ident $z:ident, $($type:tt)*) => {
            impl<T, U> ops::Index<Axis> for $($type)*<T, U> {
                type Output = T;

                #[inline]
                fn index(&self, index: Axis) -> &Self::Output {
                    match index {
                        Axis::X => &self.$x,
                        Axis::Y => &self.$y,
                        Axis::Z => &self.$z,
                    }
                }
            }
            impl<T, U> ops::IndexMut<Axis> for $($type)*<T, U> {
                #[inline]
                fn index_mut(&mut self, index: Axis) -> &mut Self::Output {
                    match index {
                        Axis::X => &mut self.$x,
                        Axis::Y => &mut self.$y,
                        Axis::Z => &mut self.$z,
                    }
                }
            }
        };
    }
    impl_xyz_e!(x y z, euclid::Vector3D);
    impl_xyz_e!(x y z, euclid::Point3D);
    impl_xyz_e!(width height depth, euclid::Size3D);
}

#[cfg(test)]
mod tests {
    use super::*;
    use exhaust::Exhaust as _;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn axis_conversion() {
        assert_eq!(u8::from(Axis::X), 0);
        assert_eq!(u8::from(Axis::Y), 1);
        assert_eq!(u8::from(Axis::Z), 2);

        for axis in Axis::ALL {
            assert_eq!(usize::from(axis), usize::from(u8::from(axis)));
            assert_eq!(usize::from(axis), axis.index());
            assert_eq!(Axis::from_index(axis.index()), Some(axis));
        }
        assert_eq!(Axis::from_index(3), None);
    }

    #[test]
    fn all_matches_exhaust() {
        assert_eq!(Axis::exhaust().collect::<Vec<_>>(), Axis::ALL.to_vec());
    }

    #[test]
    fn axis_fmt() {
        use Axis::*;
        assert_eq!(
            format!("{X:x} {Y:x} {Z:x} {X:X} {Y:X} {Z:X}"),
            "x y z X Y Z"
        );
    }

    #[test]
    fn labels_round_trip() {
        for axis in Axis::exhaust() {
            assert_eq!(axis.label().parse::<Axis>(), Ok(axis));
            assert_eq!(format!("{axis:x}").as_str().to_axis(), Ok(axis));
        }
    }

    #[test]
    fn others_excludes_self_and_is_sorted() {
        for axis in Axis::exhaust() {
            let [a, b] = axis.others();
            assert!(a < b);
            assert_ne!(a, axis);
            assert_ne!(b, axis);
        }
    }

    #[rstest]
    #[case(0usize.to_axis(), Axis::X)]
    #[case(1i32.to_axis(), Axis::Y)]
    #[case(2i64.to_axis(), Axis::Z)]
    #[case('y'.to_axis(), Axis::Y)]
    #[case("z".to_axis(), Axis::Z)]
    fn selectors_accept(#[case] selected: Result<Axis, InvalidAxisError>, #[case] expected: Axis) {
        assert_eq!(selected, Ok(expected));
    }

    #[rstest]
    #[case(3usize.to_axis(), "unknown axis 3; expected 0, 1, 2, \"x\", \"y\", or \"z\"")]
    #[case((-1i32).to_axis(), "unknown axis -1; expected 0, 1, 2, \"x\", \"y\", or \"z\"")]
    #[case(i64::MAX.to_axis(), "unknown axis 9223372036854775807; expected 0, 1, 2, \"x\", \"y\", or \"z\"")]
    #[case('w'.to_axis(), "unknown axis 'w'; expected 0, 1, 2, \"x\", \"y\", or \"z\"")]
    #[case("X".to_axis(), "unknown axis \"X\"; expected 0, 1, 2, \"x\", \"y\", or \"z\"")]
    #[case("".to_axis(), "unknown axis \"\"; expected 0, 1, 2, \"x\", \"y\", or \"z\"")]
    fn selectors_reject(#[case] selected: Result<Axis, InvalidAxisError>, #[case] message: &str) {
        assert_eq!(selected.unwrap_err().to_string(), message);
    }

    #[test]
    fn index_euclid_types() {
        let mut p = euclid::Point3D::<i32, ()>::new(1, 2, 3);
        assert_eq!([p[Axis::X], p[Axis::Y], p[Axis::Z]], [1, 2, 3]);
        p[Axis::Y] = 20;
        assert_eq!(p, euclid::Point3D::new(1, 20, 3));

        let s = euclid::Size3D::<u32, ()>::new(4, 5, 6);
        assert_eq!(s[Axis::Z], 6);
    }
}
