//! Preview rendering of a source image next to its distinct tiles

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

use crate::catalog::TileCatalog;
use crate::io::configuration::{
    PREVIEW_BACKGROUND, PREVIEW_BUFFER_SIZE, PREVIEW_DISPLAY_SIZE, PREVIEW_MARGIN,
};
use crate::io::error::{Result, invalid_argument};
use crate::io::image::save_rgba_image;
use crate::spatial::{Color, PixelSource};

/// Sizes and colors used when composing a preview
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewConfig {
    /// Minimum side length of the unscaled buffer
    pub buffer_size: u32,
    /// Longest side the scaled preview may reach
    pub display_size: u32,
    /// Gap around and between tiles
    pub margin: u32,
    /// Buffer fill color
    pub background: Color,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            buffer_size: PREVIEW_BUFFER_SIZE,
            display_size: PREVIEW_DISPLAY_SIZE,
            margin: PREVIEW_MARGIN,
            background: PREVIEW_BACKGROUND,
        }
    }
}

impl PreviewConfig {
    /// Tiles whose right edge passes this column end their row
    pub const fn wrap_threshold(&self) -> u32 {
        self.buffer_size / 2 / 4
    }

    /// Largest integer factor that keeps a `width x height` buffer within the display
    pub const fn scale_factor(&self, width: u32, height: u32) -> u32 {
        let longest = if width > height { width } else { height };
        if longest == 0 || self.display_size < longest {
            1
        } else {
            self.display_size / longest
        }
    }
}

/// Where everything lands on the unscaled preview buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewLayout {
    /// Buffer width in pixels
    pub width: u32,
    /// Buffer height in pixels
    pub height: u32,
    /// Top-left corner of the source image
    pub source_origin: (u32, u32),
    /// Top-left corner of each tile that starts on the buffer, in catalog order
    ///
    /// Tiles whose row begins below the buffer are left out.
    pub tile_origins: Vec<(u32, u32)>,
}

/// Lays out catalog entries and writes the composed preview
///
/// Tiles are placed left to right starting at `(margin, margin)`. Once a tile
/// extends past the wrap threshold the next tile starts a new row. The buffer
/// is `buffer_size` square, enlarged only to fit a bigger source, which is
/// centered on it. Tiles that run off the bottom are clipped.
#[derive(Debug, Clone, Default)]
pub struct CatalogRenderer {
    config: PreviewConfig,
}

impl CatalogRenderer {
    /// Create a renderer with the given configuration
    pub const fn new(config: PreviewConfig) -> Self {
        Self { config }
    }

    /// Configuration in use
    pub const fn config(&self) -> &PreviewConfig {
        &self.config
    }

    /// Compute placements for a source of `source_size` and tiles of `tile_sizes`
    pub fn layout(
        &self,
        source_size: (u32, u32),
        tile_sizes: impl IntoIterator<Item = u32>,
    ) -> PreviewLayout {
        let width = self.config.buffer_size.max(source_size.0);
        let height = self.config.buffer_size.max(source_size.1);
        let margin = self.config.margin;
        let threshold = self.config.wrap_threshold();
        let (mut x, mut y) = (margin, margin);
        let mut tile_origins = Vec::new();

        for size in tile_sizes {
            if y >= height {
                break;
            }
            tile_origins.push((x, y));

            if x + size > threshold {
                y += size + margin;
                x = margin;
            } else {
                x += size + margin;
            }
        }

        PreviewLayout {
            width,
            height,
            source_origin: ((width - source_size.0) / 2, (height - source_size.1) / 2),
            tile_origins,
        }
    }

    /// Compose the unscaled preview buffer
    pub fn compose(&self, source: &PixelSource, catalog: &TileCatalog) -> RgbaImage {
        let source_image = source.to_rgba_image();
        let layout = self.layout(
            source_image.dimensions(),
            catalog.entries().map(|entry| entry.representative().size() as u32),
        );

        let mut buffer =
            RgbaImage::from_pixel(layout.width, layout.height, Rgba(self.config.background));
        let (sx, sy) = layout.source_origin;
        imageops::replace(&mut buffer, &source_image, i64::from(sx), i64::from(sy));

        for (entry, &(tx, ty)) in catalog.entries().zip(&layout.tile_origins) {
            let tile_image = entry.representative().to_rgba_image();
            imageops::replace(&mut buffer, &tile_image, i64::from(tx), i64::from(ty));
        }

        buffer
    }

    /// Compose the preview and scale it up to at most `display_size`
    pub fn render(&self, source: &PixelSource, catalog: &TileCatalog) -> RgbaImage {
        let buffer = self.compose(source, catalog);
        let factor = self.config.scale_factor(buffer.width(), buffer.height());
        if factor == 1 {
            return buffer;
        }
        imageops::resize(
            &buffer,
            buffer.width() * factor,
            buffer.height() * factor,
            FilterType::Nearest,
        )
    }

    /// Render the preview and save it as a PNG
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The configured buffer size is zero
    /// - The parent directory cannot be created
    /// - The image cannot be saved to the specified path
    pub fn export<P: AsRef<Path>>(
        &self,
        source: &PixelSource,
        catalog: &TileCatalog,
        output_path: P,
    ) -> Result<()> {
        if self.config.buffer_size == 0 {
            return Err(invalid_argument(
                "buffer_size",
                &self.config.buffer_size,
                &"preview buffer must be at least one pixel",
            ));
        }
        let preview = self.render(source, catalog);
        save_rgba_image(&preview, output_path.as_ref())?;
        log::debug!(
            "Wrote {}x{} preview to '{}'",
            preview.width(),
            preview.height(),
            output_path.as_ref().display()
        );
        Ok(())
    }
}
