//! Deduplicated tile catalogs with occurrence counts
//!
//! Tiles are folded in the order they arrive. The first tile seen for a key
//! becomes that entry's representative; later duplicates only bump the count.
//! Entry order is first-occurrence order, which keeps preview layouts and
//! downstream tile indices reproducible.

use std::collections::HashMap;

use crate::catalog::key::{CanonicalKey, canonicalize};
use crate::io::error::Result;
use crate::spatial::{PixelSource, RawTile, TileSampler};

/// One distinct tile and how many sampled tiles share its content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogEntry {
    key: CanonicalKey,
    representative: RawTile,
    count: usize,
}

impl CatalogEntry {
    /// Canonical key shared by every tile counted here
    pub const fn key(&self) -> &CanonicalKey {
        &self.key
    }

    /// First tile sampled with this content
    pub const fn representative(&self) -> &RawTile {
        &self.representative
    }

    /// Number of sampled tiles with this content
    pub const fn count(&self) -> usize {
        self.count
    }
}

/// Outcome of folding one tile into a catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Insertion {
    /// Position of the matching entry in insertion order
    pub index: usize,
    /// Whether the tile created a new entry
    pub is_new: bool,
}

/// Distinct tiles in first-occurrence order, indexed by canonical key
#[derive(Debug, Clone, Default)]
pub struct TileCatalog {
    entries: Vec<CatalogEntry>,
    index_by_key: HashMap<CanonicalKey, usize>,
    total_count: usize,
}

impl TileCatalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a sequence of tiles into a new catalog
    pub fn build(tiles: impl IntoIterator<Item = RawTile>) -> Self {
        let mut catalog = Self::new();
        for tile in tiles {
            catalog.insert(tile);
        }
        catalog
    }

    /// Sample every window of `source` and catalog the results
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero
    pub fn from_source(source: &PixelSource, size: usize) -> Result<Self> {
        let sampler = TileSampler::new(source, size)?;
        Ok(Self::build(sampler))
    }

    /// Fold one tile into the catalog
    ///
    /// A tile whose content is already present is dropped after its entry's
    /// count is incremented.
    pub fn insert(&mut self, tile: RawTile) -> Insertion {
        let key = canonicalize(&tile);
        self.total_count += 1;

        if let Some(&index) = self.index_by_key.get(&key) {
            if let Some(entry) = self.entries.get_mut(index) {
                entry.count += 1;
            }
            return Insertion {
                index,
                is_new: false,
            };
        }

        let index = self.entries.len();
        self.index_by_key.insert(key.clone(), index);
        self.entries.push(CatalogEntry {
            key,
            representative: tile,
            count: 1,
        });
        Insertion {
            index,
            is_new: true,
        }
    }

    /// Entries in first-occurrence order
    pub fn entries(&self) -> std::slice::Iter<'_, CatalogEntry> {
        self.entries.iter()
    }

    /// Entry at a position in first-occurrence order
    pub fn entry(&self, index: usize) -> Option<&CatalogEntry> {
        self.entries.get(index)
    }

    /// Entry whose tiles have the given key
    pub fn get(&self, key: &CanonicalKey) -> Option<&CatalogEntry> {
        self.index_by_key
            .get(key)
            .and_then(|&index| self.entries.get(index))
    }

    /// Entry whose content matches `tile`
    pub fn find(&self, tile: &RawTile) -> Option<&CatalogEntry> {
        self.get(&canonicalize(tile))
    }

    /// Number of distinct tiles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tiles have been folded in
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of tiles folded in, duplicates included
    pub const fn total_count(&self) -> usize {
        self.total_count
    }

    /// Share of all folded tiles held by each entry, in insertion order
    ///
    /// Sums to 1.0 for a non-empty catalog.
    pub fn relative_frequencies(&self) -> Vec<f64> {
        let total = self.total_count as f64;
        self.entries
            .iter()
            .map(|entry| entry.count as f64 / total)
            .collect()
    }

    /// Entry indices ordered by descending count, ties by insertion order
    pub fn indices_by_count(&self) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..self.entries.len()).collect();
        indices.sort_by_key(|&index| {
            std::cmp::Reverse(self.entries.get(index).map_or(0, CatalogEntry::count))
        });
        indices
    }
}

impl<'a> IntoIterator for &'a TileCatalog {
    type Item = &'a CatalogEntry;
    type IntoIter = std::slice::Iter<'a, CatalogEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl FromIterator<RawTile> for TileCatalog {
    fn from_iter<I: IntoIterator<Item = RawTile>>(iter: I) -> Self {
        Self::build(iter)
    }
}
