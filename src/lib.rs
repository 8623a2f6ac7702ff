//! Tile catalogs for tile-based procedural image synthesis
//!
//! The system samples a square window at every pixel of a source image,
//! wrapping around the edges, then deduplicates the windows by exact pixel
//! content and counts how often each distinct tile occurs. The resulting
//! catalog is the input a wave function collapse style generator works from.

#![forbid(unsafe_code)]

/// Tile deduplication and frequency counting
pub mod catalog;
/// Input/output operations, rendering and error handling
pub mod io;
/// Pixel sources and wraparound tile sampling
pub mod spatial;

pub use catalog::{CanonicalKey, CatalogEntry, TileCatalog, canonicalize};
pub use io::error::{CatalogError, Result};
pub use spatial::tiles::sample;
pub use spatial::{Color, PixelSource, RawTile, TileSampler};
