//! Hierarchical hexagonal spatial index.
//!
//! Items are bucketed by H3 cell at one resolution; remote items share a single bucket that
//! every query matches. Radius queries expand the center cell into k-rings sized from the
//! average edge length of the resolution, and cross-resolution compatibility is decided on
//! the coarser common ancestor with a great-circle fallback where the grid is discontinuous.

pub mod cell;
pub mod geo;
pub mod grid;
pub mod index;
pub mod resolution;

mod error;

pub use h3o::{CellIndex, Resolution};

pub use cell::{CellKey, Indexable, Locatable, REMOTE_KEY};
pub use error::{Error, Result};
pub use geo::{GeoPoint, haversine_km};
pub use grid::HexGrid;
pub use index::{BuildStats, HexIndex, HexIndexBuilder};
