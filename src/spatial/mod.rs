//! Pixel grids and tile sampling
//!
//! This module contains the spatial side of the pipeline:
//! - Read-only pixel sources and the built-in sample image
//! - Square tiles and toroidal window sampling

/// Pixel sources and colors
pub mod source;
/// Tile data structures and wraparound sampling
pub mod tiles;

pub use source::{Color, PixelSource};
pub use tiles::{RawTile, TileSampler};
