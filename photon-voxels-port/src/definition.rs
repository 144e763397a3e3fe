use photon_voxels::{Axis, BoundingBox, FreeCoordinate, VoxelGrid};

use crate::LoadErrorKind;

/// Contents of a grid-definition file: the per-axis bounds of a photon library's
/// volume and, for a voxelized library, the per-axis voxel counts.
///
/// The serialized form is a JSON object with numeric arrays under the keys `min`, `max`
/// and `numvox`. Other keys are ignored, so a file may carry additional data alongside
/// the definition.
///
/// ```
/// use photon_voxels_port::GridDefinition;
///
/// let definition: GridDefinition = serde_json::from_str(
///     r#"{"min": [-10, -10, -50], "max": [10, 10, 50], "numvox": [4, 4, 10]}"#,
/// ).unwrap();
/// let grid = definition.voxel_grid().unwrap();
/// assert_eq!(grid.to_string(), "Meta x:(-10,10,4) y:(-10,10,4) z:(-50,50,10)");
/// ```
#[derive(Clone, Debug, PartialEq, serde::Deserialize, serde::Serialize)]
#[non_exhaustive]
pub struct GridDefinition {
    /// Lower bound along each axis.
    pub min: Vec<FreeCoordinate>,

    /// Upper bound along each axis.
    pub max: Vec<FreeCoordinate>,

    /// Number of voxels along each axis.
    ///
    /// Stored as real numbers, as some producers write them that way; they are truncated
    /// to integers by [`GridDefinition::voxel_grid()`]. Absent for definitions which only
    /// describe a [`BoundingBox`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numvox: Option<Vec<f64>>,
}

impl GridDefinition {
    /// Constructs a [`GridDefinition`] from its parts.
    pub fn new(
        min: impl Into<Vec<FreeCoordinate>>,
        max: impl Into<Vec<FreeCoordinate>>,
        numvox: Option<Vec<f64>>,
    ) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
            numvox,
        }
    }

    /// Constructs the [`BoundingBox`] this definition describes.
    ///
    /// `numvox` is ignored and may be absent.
    pub fn bounding_box(&self) -> Result<BoundingBox, LoadErrorKind> {
        let min = three_components("min", &self.min)?;
        let max = three_components("max", &self.max)?;
        Ok(BoundingBox::new(min, max))
    }

    /// Constructs the [`VoxelGrid`] this definition describes.
    ///
    /// Each `numvox` value is truncated toward zero, with a logged warning if it was not
    /// already an integer.
    pub fn voxel_grid(&self) -> Result<VoxelGrid, LoadErrorKind> {
        let bounds = self.bounding_box()?;
        let numvox = self
            .numvox
            .as_deref()
            .ok_or(LoadErrorKind::MissingKey { key: "numvox" })?;
        let numvox = three_components("numvox", numvox)?;

        let mut shape = [0u32; 3];
        for axis in Axis::ALL {
            shape[axis] = voxel_count(axis, numvox[axis])?;
        }
        VoxelGrid::new(shape, bounds).map_err(LoadErrorKind::Shape)
    }
}

fn three_components(key: &'static str, values: &[f64]) -> Result<[f64; 3], LoadErrorKind> {
    <[f64; 3]>::try_from(values).map_err(|_| LoadErrorKind::WrongDimension {
        key,
        len: values.len(),
    })
}

fn voxel_count(axis: Axis, value: f64) -> Result<u32, LoadErrorKind> {
    // Also rejects NaN.
    if !(0.0..f64::from(u32::MAX) + 1.0).contains(&value) {
        return Err(LoadErrorKind::InvalidVoxelCount { axis, value });
    }
    let count = value.trunc();
    if count != value {
        log::warn!("numvox along {axis:x} is {value}, which is not an integer; using {count}");
    }
    Ok(count as u32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use photon_voxels::{GridShape, Position};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn definition(numvox: Option<Vec<f64>>) -> GridDefinition {
        GridDefinition::new([-1.0, 0.0, 5.0], [1.0, 4.0, 7.0], numvox)
    }

    #[test]
    fn bounding_box_ignores_numvox() {
        let bounds = definition(None).bounding_box().unwrap();
        assert_eq!(bounds.ranges(), [[-1.0, 1.0], [0.0, 4.0], [5.0, 7.0]]);
        assert_eq!(
            definition(Some(vec![1.0])).bounding_box().unwrap(),
            bounds
        );
    }

    #[test]
    fn voxel_grid() {
        let grid = definition(Some(vec![2.0, 4.0, 8.0])).voxel_grid().unwrap();
        assert_eq!(grid.shape(), GridShape::new(2, 4, 8));
        assert_eq!(grid.index_to_coord([0, 0, 0].into()), Position::new(-0.5, 0.5, 5.125));
    }

    #[test]
    fn voxel_grid_requires_numvox() {
        let error = definition(None).voxel_grid().unwrap_err();
        assert_eq!(error.to_string(), "the definition has no `numvox` entry");
    }

    #[test]
    fn fractional_numvox_truncated() {
        let grid = definition(Some(vec![2.9, 4.0, 1.5])).voxel_grid().unwrap();
        assert_eq!(grid.shape(), GridShape::new(2, 4, 1));
    }

    #[rstest]
    #[case(-1.0)]
    #[case(f64::NAN)]
    #[case(f64::INFINITY)]
    #[case(1e10)]
    fn invalid_numvox(#[case] value: f64) {
        let error = definition(Some(vec![2.0, value, 2.0])).voxel_grid().unwrap_err();
        assert!(
            matches!(error, LoadErrorKind::InvalidVoxelCount { axis: Axis::Y, .. }),
            "{error:?}"
        );
    }

    #[test]
    fn zero_numvox() {
        let error = definition(Some(vec![2.0, 0.5, 2.0])).voxel_grid().unwrap_err();
        assert!(matches!(error, LoadErrorKind::Shape(_)), "{error:?}");
    }

    #[rstest]
    #[case(GridDefinition::new([0.0, 0.0], [1.0, 1.0, 1.0], None), "min", 2)]
    #[case(GridDefinition::new([0.0; 3], [1.0; 4], None), "max", 4)]
    #[case(GridDefinition::new([0.0; 3], [1.0; 3], Some(vec![])), "numvox", 0)]
    fn wrong_dimension(
        #[case] definition: GridDefinition,
        #[case] expected_key: &str,
        #[case] expected_len: usize,
    ) {
        let error = definition.voxel_grid().unwrap_err();
        match error {
            LoadErrorKind::WrongDimension { key, len } => {
                assert_eq!((key, len), (expected_key, expected_len));
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn deserialize_ignores_unknown_keys() {
        let definition: GridDefinition = serde_json::from_str(
            r#"{"min": [0, 0, 0], "max": [1, 2, 3], "values": [0.5, 0.25]}"#,
        )
        .unwrap();
        assert_eq!(
            definition,
            GridDefinition::new([0.0, 0.0, 0.0], [1.0, 2.0, 3.0], None)
        );
    }
}
