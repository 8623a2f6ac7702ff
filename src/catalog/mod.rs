//! Tile deduplication and frequency counting

/// Deduplicated catalog entries and their counts
pub mod entries;
/// Canonical content keys for tiles
pub mod key;

pub use entries::{CatalogEntry, Insertion, TileCatalog};
pub use key::{CanonicalKey, canonicalize};
