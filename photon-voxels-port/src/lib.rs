//! Loading [`photon_voxels`] types from photon-library grid definitions.
//!
//! A grid definition is a JSON object with per-axis numeric arrays:
//!
//! | Key      | Meaning                  | Required by                                  |
//! |----------|--------------------------|----------------------------------------------|
//! | `min`    | lower bound of each axis | [`load_bounding_box()`], [`load_voxel_grid()`] |
//! | `max`    | upper bound of each axis | [`load_bounding_box()`], [`load_voxel_grid()`] |
//! | `numvox` | voxel count of each axis | [`load_voxel_grid()`]                         |
//!
//! The definition to load is named by a [`Descriptor`], which is most often a
//! configuration value of the form `{"photonlib": {"filepath": "..."}}` or a bare path.
//!
//! ```no_run
//! use photon_voxels_port::load_voxel_grid;
//!
//! let config = serde_json::json!({"photonlib": {"filepath": "plib_meta.json"}});
//! let grid = load_voxel_grid(config)?;
//! println!("{grid}");
//! # Ok::<(), photon_voxels_port::LoadError>(())
//! ```

// Crate-specific lint settings. (General settings can be found in the workspace manifest.)
#![forbid(unsafe_code)]

mod definition;
pub use definition::*;

pub mod file;

mod load;
pub use load::*;
