//! **rasterpath-core**: core types for raster-image pathfinding.
//!
//! This crate provides the foundational types used across the *rasterpath*
//! workspace: `(row, col)` geometry primitives, an owned rectangular
//! [`Grid`], and the Grid Builder that turns grayscale intensities into a
//! boolean walkability grid.

pub mod geom;
pub mod grid;
pub mod mask;

pub use geom::{Point, Range};
pub use grid::{Grid, GridError};
pub use mask::{MaskConfig, build_mask, percentile, threshold};
