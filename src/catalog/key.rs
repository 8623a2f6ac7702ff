//! Content-derived keys for detecting duplicate tiles

use crate::spatial::RawTile;

/// Exact encoding of a tile's pixel content
///
/// Holds the tile side length and every channel of every pixel in row-major
/// order in one contiguous buffer. Two keys are equal only when both tiles
/// have the same size and identical channels at every offset, so the key can
/// be used directly in hashed or ordered collections. Rotated or reflected
/// tiles produce different keys.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CanonicalKey {
    size: usize,
    channels: Box<[u8]>,
}

impl CanonicalKey {
    /// Side length of the tile this key was derived from
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Flattened RGBA channels in row-major order
    pub fn channels(&self) -> &[u8] {
        &self.channels
    }
}

impl From<&RawTile> for CanonicalKey {
    fn from(tile: &RawTile) -> Self {
        canonicalize(tile)
    }
}

/// Derive the canonical key of a tile
pub fn canonicalize(tile: &RawTile) -> CanonicalKey {
    let channels = tile
        .pixels()
        .flat_map(|color| color.iter())
        .copied()
        .collect();

    CanonicalKey {
        size: tile.size(),
        channels,
    }
}
