//! Square tiles and toroidal window sampling
//!
//! Every pixel of a source anchors one window. Windows that run past the
//! right or bottom edge continue from the opposite edge, so a source of
//! `W x H` pixels always yields exactly `W * H` tiles regardless of tile size.

use ndarray::Array2;

use crate::io::error::{Result, invalid_argument};
use crate::spatial::source::{Color, PixelSource};

/// A square grid of colors cut from a pixel source
///
/// Owns its pixels; sampling copies out of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTile {
    pixels: Array2<Color>,
}

impl RawTile {
    /// Create a tile by evaluating `f(x, y)` at every local offset
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> Color) -> Result<Self> {
        validate_tile_size(size)?;
        let pixels = Array2::from_shape_fn((size, size), |(y, x)| f(x, y));
        Ok(Self { pixels })
    }

    /// Create a tile from rows of colors
    ///
    /// # Errors
    ///
    /// Returns an error if there are no rows or the rows do not form a square
    pub fn from_rows(rows: &[Vec<Color>]) -> Result<Self> {
        let size = rows.len();
        validate_tile_size(size)?;
        if let Some(row) = rows.iter().find(|row| row.len() != size) {
            return Err(invalid_argument(
                "rows",
                &row.len(),
                &format!("every row of a {size}x{size} tile needs {size} colors"),
            ));
        }
        Self::from_fn(size, |x, y| {
            rows.get(y)
                .and_then(|row| row.get(x))
                .copied()
                .unwrap_or_default()
        })
    }

    /// Side length in pixels
    pub fn size(&self) -> usize {
        self.pixels.nrows()
    }

    /// Color at local column `x`, row `y`
    pub fn get(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels.get((y, x)).copied()
    }

    /// Mutable color at local column `x`, row `y`
    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut Color> {
        self.pixels.get_mut((y, x))
    }

    /// Pixels in row-major order
    pub fn pixels(&self) -> impl Iterator<Item = &Color> + '_ {
        self.pixels.iter()
    }

    /// Copy out as rows of colors
    pub fn rows(&self) -> Vec<Vec<Color>> {
        self.pixels.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Convert into an RGBA image of the same size
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let size = self.size() as u32;
        image::RgbaImage::from_fn(size, size, |x, y| {
            image::Rgba(self.get(x as usize, y as usize).unwrap_or_default())
        })
    }
}

/// Lazily samples one tile per source pixel in row-major order
///
/// Yields the tile anchored at `(0, 0)`, then `(1, 0)`, across the first row
/// and on through the last row.
#[derive(Debug, Clone)]
pub struct TileSampler<'a> {
    source: &'a PixelSource,
    size: usize,
    next_index: usize,
}

impl<'a> TileSampler<'a> {
    /// Prepare to sample `size x size` windows from `source`
    ///
    /// # Errors
    ///
    /// Returns an error if `size` is zero
    pub fn new(source: &'a PixelSource, size: usize) -> Result<Self> {
        validate_tile_size(size)?;
        Ok(Self {
            source,
            size,
            next_index: 0,
        })
    }

    /// Side length of the sampled tiles
    pub const fn tile_size(&self) -> usize {
        self.size
    }

    /// Total number of tiles this sampler yields
    pub fn total(&self) -> usize {
        self.source.width() * self.source.height()
    }

    /// Sample the window anchored at source column `x`, row `y`
    pub fn tile_at(&self, x: usize, y: usize) -> RawTile {
        let pixels = Array2::from_shape_fn((self.size, self.size), |(oy, ox)| {
            self.source.at_wrapped(x + ox, y + oy)
        });
        RawTile { pixels }
    }
}

impl Iterator for TileSampler<'_> {
    type Item = RawTile;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.total() {
            return None;
        }
        let width = self.source.width();
        let (x, y) = (self.next_index % width, self.next_index / width);
        self.next_index += 1;
        Some(self.tile_at(x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.total().saturating_sub(self.next_index);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for TileSampler<'_> {}

/// Sample every `size x size` window of `source`, wrapping at the edges
///
/// # Errors
///
/// Returns an error if `size` is zero
pub fn sample(source: &PixelSource, size: usize) -> Result<Vec<RawTile>> {
    Ok(TileSampler::new(source, size)?.collect())
}

fn validate_tile_size(size: usize) -> Result<()> {
    if size == 0 {
        return Err(invalid_argument(
            "size",
            &size,
            &"tile size must be positive",
        ));
    }
    Ok(())
}
