use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_json::Value;

use photon_voxels::{Axis, BoundingBox, GridShapeError, VoxelGrid};

use crate::GridDefinition;
use crate::file::Fileish;

/// Name reported in errors for a [`Descriptor::Definition`], which has no file.
const IN_MEMORY_NAME: &str = "<in-memory definition>";

/// Where to find a grid definition.
///
/// Usually obtained by conversion from a configuration value or a path:
///
/// * a JSON mapping with a string under `photonlib.filepath` names a file,
/// * a JSON string, `&str`, `String`, `&Path` or `PathBuf` is itself a file path,
/// * anything else is rejected without any file access.
#[derive(Clone, Debug)]
#[non_exhaustive]
pub enum Descriptor {
    /// A configuration value, resolved as described on [`Descriptor`].
    Config(Value),

    /// A file on the local file system.
    Path(PathBuf),

    /// A file which may be somewhere other than the local file system.
    File(Arc<dyn Fileish>),

    /// A definition already in memory.
    Definition(GridDefinition),
}

impl From<Value> for Descriptor {
    fn from(value: Value) -> Self {
        Self::Config(value)
    }
}
impl From<PathBuf> for Descriptor {
    fn from(path: PathBuf) -> Self {
        Self::Path(path)
    }
}
impl From<&Path> for Descriptor {
    fn from(path: &Path) -> Self {
        Self::Path(path.to_owned())
    }
}
impl From<&str> for Descriptor {
    fn from(path: &str) -> Self {
        Self::Path(PathBuf::from(path))
    }
}
impl From<String> for Descriptor {
    fn from(path: String) -> Self {
        Self::Path(PathBuf::from(path))
    }
}
impl From<Arc<dyn Fileish>> for Descriptor {
    fn from(file: Arc<dyn Fileish>) -> Self {
        Self::File(file)
    }
}
impl From<GridDefinition> for Descriptor {
    fn from(definition: GridDefinition) -> Self {
        Self::Definition(definition)
    }
}

/// Load a [`BoundingBox`] from the `min` and `max` entries of a grid definition.
///
/// ```
/// use photon_voxels_port::load_bounding_box;
///
/// let error = load_bounding_box(serde_json::json!([1, 2, 3])).unwrap_err();
/// assert_eq!(error.to_string(), "failed to load grid definition from '[1,2,3]'");
/// ```
pub fn load_bounding_box(descriptor: impl Into<Descriptor>) -> Result<BoundingBox, LoadError> {
    let (source_path, definition) = read_definition(descriptor.into())?;
    let bounds = definition
        .bounding_box()
        .map_err(|detail| LoadError::new(&source_path, detail))?;
    log::debug!("loaded bounding box {bounds:?} from '{source_path}'");
    Ok(bounds)
}

/// Load a [`VoxelGrid`] from the `min`, `max` and `numvox` entries of a grid definition.
pub fn load_voxel_grid(descriptor: impl Into<Descriptor>) -> Result<VoxelGrid, LoadError> {
    let (source_path, definition) = read_definition(descriptor.into())?;
    let grid = definition
        .voxel_grid()
        .map_err(|detail| LoadError::new(&source_path, detail))?;
    log::debug!("loaded voxel grid {grid} from '{source_path}'");
    Ok(grid)
}

/// Resolve the descriptor and parse the definition it leads to, returning it along with
/// the name to use in errors.
fn read_definition(descriptor: Descriptor) -> Result<(String, GridDefinition), LoadError> {
    match descriptor {
        Descriptor::Config(value) => {
            let path =
                config_file_path(&value).map_err(|detail| LoadError::new(&value, detail))?;
            log::trace!("configuration {value} names grid definition {}", path.display());
            read_file(&path)
        }
        Descriptor::Path(path) => read_file(&path),
        Descriptor::File(file) => read_file(&*file),
        Descriptor::Definition(definition) => Ok((IN_MEMORY_NAME.to_owned(), definition)),
    }
}

fn config_file_path(value: &Value) -> Result<PathBuf, LoadErrorKind> {
    match value {
        Value::String(path) => Ok(PathBuf::from(path)),
        Value::Object(_) => value
            .pointer("/photonlib/filepath")
            .and_then(Value::as_str)
            .map(PathBuf::from)
            .ok_or(LoadErrorKind::MissingFilePath {}),
        Value::Null => Err(LoadErrorKind::UnsupportedDescriptor { found: "null" }),
        Value::Bool(_) => Err(LoadErrorKind::UnsupportedDescriptor { found: "a boolean" }),
        Value::Number(_) => Err(LoadErrorKind::UnsupportedDescriptor { found: "a number" }),
        Value::Array(_) => Err(LoadErrorKind::UnsupportedDescriptor { found: "an array" }),
    }
}

fn read_file(file: &dyn Fileish) -> Result<(String, GridDefinition), LoadError> {
    let source_path = file.display_full_path();
    let bytes = file
        .read()
        .map_err(|error| LoadError::new(&source_path, LoadErrorKind::Read { error }))?;
    let definition = serde_json::from_slice(&bytes).map_err(|error| {
        LoadError::new(&source_path, LoadErrorKind::Parse(Box::new(error)))
    })?;
    Ok((source_path, definition))
}

/// Fatal errors that may be encountered while loading a grid definition.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
#[error("failed to load grid definition from '{source_path}'")]
pub struct LoadError {
    /// The path, as produced by [`Fileish::display_full_path()`] or similar, of the file
    /// being loaded. If the descriptor could not be resolved to a file, this is the
    /// descriptor itself.
    pub source_path: String,

    #[source]
    detail: LoadErrorKind,
}

impl LoadError {
    fn new(source_path: impl ToString, detail: LoadErrorKind) -> Self {
        Self {
            source_path: source_path.to_string(),
            detail,
        }
    }

    /// Returns the specific reason why loading failed.
    pub fn kind(&self) -> &LoadErrorKind {
        &self.detail
    }
}

/// Specific reason why loading a grid definition failed.
/// Always contained within a [`LoadError`], except when returned by [`GridDefinition`]
/// methods.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum LoadErrorKind {
    /// The descriptor was neither a configuration mapping nor a path.
    #[non_exhaustive]
    #[error("the descriptor must be a configuration mapping or a file path string, not {found}")]
    UnsupportedDescriptor {
        /// The kind of value which was given instead.
        found: &'static str,
    },

    /// The configuration mapping did not contain a file path.
    #[non_exhaustive]
    #[error("the configuration has no string at `photonlib.filepath`")]
    MissingFilePath {},

    /// An IO error occurred while reading the file.
    #[non_exhaustive]
    #[error("failed to read the file")]
    Read {
        /// The IO error that occurred while reading.
        #[source]
        error: io::Error,
    },

    /// The data was not a JSON object with the expected entries.
    #[non_exhaustive]
    #[error("failed to parse the grid definition")]
    Parse(
        /// Details of the parse error.
        #[source]
        Box<dyn std::error::Error + Send + Sync>,
    ),

    /// An entry required for the requested type was absent.
    #[non_exhaustive]
    #[error("the definition has no `{key}` entry")]
    MissingKey {
        /// Key of the entry.
        key: &'static str,
    },

    /// An entry had some number of components other than 3.
    #[non_exhaustive]
    #[error("`{key}` has {len} components; expected 3")]
    WrongDimension {
        /// Key of the entry.
        key: &'static str,
        /// Number of components it had.
        len: usize,
    },

    /// A `numvox` component was not a number of voxels.
    #[non_exhaustive]
    #[error("`numvox` along {axis:x} is {value}, which is not a valid voxel count")]
    InvalidVoxelCount {
        /// The axis whose count is invalid.
        axis: Axis,
        /// The invalid value.
        value: f64,
    },

    /// The voxel counts were valid numbers but do not form a usable grid.
    #[non_exhaustive]
    #[error("invalid grid shape")]
    Shape(#[source] GridShapeError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn config_file_path_accepts_mapping_and_string() {
        assert_eq!(
            config_file_path(&json!({"photonlib": {"filepath": "/data/plib.json"}})).unwrap(),
            PathBuf::from("/data/plib.json")
        );
        assert_eq!(
            config_file_path(&json!("relative/plib.json")).unwrap(),
            PathBuf::from("relative/plib.json")
        );
    }

    #[test]
    fn config_file_path_rejects_other_values() {
        for (value, expected) in [
            (json!(null), "null"),
            (json!(true), "a boolean"),
            (json!(3.5), "a number"),
            (json!(["a.json"]), "an array"),
        ] {
            match config_file_path(&value) {
                Err(LoadErrorKind::UnsupportedDescriptor { found }) => {
                    assert_eq!(found, expected);
                }
                other => panic!("unexpected result {other:?} for {value}"),
            }
        }
    }

    #[test]
    fn config_file_path_missing() {
        for value in [
            json!({}),
            json!({"photonlib": {}}),
            json!({"photonlib": {"filepath": 7}}),
            json!({"filepath": "plib.json"}),
        ] {
            assert!(
                matches!(config_file_path(&value), Err(LoadErrorKind::MissingFilePath {})),
                "{value}"
            );
        }
    }
}
