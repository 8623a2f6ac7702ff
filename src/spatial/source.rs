//! Read-only pixel grids that tiles are sampled from

use ndarray::Array2;

use crate::io::error::{Result, invalid_argument};

/// RGBA color with four 8-bit channels
pub type Color = [u8; 4];

/// Addressable grid of colors with explicit dimensions
///
/// Pixels are stored as `(row, col)` so that iteration follows the row-major
/// order used by sampling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSource {
    pixels: Array2<Color>,
}

impl PixelSource {
    /// Create a source from a row-major pixel buffer
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero or the buffer length is
    /// not `width * height`
    pub fn new(width: usize, height: usize, pixels: Vec<Color>) -> Result<Self> {
        validate_dimensions(width, height)?;
        let len = pixels.len();
        let pixels = Array2::from_shape_vec((height, width), pixels).map_err(|shape_error| {
            invalid_argument(
                "pixels",
                &len,
                &format!(
                    "expected {} pixels for a {width}x{height} source ({shape_error})",
                    width * height
                ),
            )
        })?;
        Ok(Self { pixels })
    }

    /// Create a source by evaluating `f(x, y)` at every position
    ///
    /// # Errors
    ///
    /// Returns an error if either dimension is zero
    pub fn from_fn(
        width: usize,
        height: usize,
        mut f: impl FnMut(usize, usize) -> Color,
    ) -> Result<Self> {
        validate_dimensions(width, height)?;
        let pixels = Array2::from_shape_fn((height, width), |(y, x)| f(x, y));
        Ok(Self { pixels })
    }

    /// Create a source from a decoded RGBA image
    ///
    /// # Errors
    ///
    /// Returns an error if the image has zero width or height
    pub fn from_rgba_image(image: &image::RgbaImage) -> Result<Self> {
        Self::from_fn(image.width() as usize, image.height() as usize, |x, y| {
            image
                .get_pixel_checked(x as u32, y as u32)
                .map_or([0; 4], |pixel| pixel.0)
        })
    }

    /// Width in pixels
    pub fn width(&self) -> usize {
        self.pixels.ncols()
    }

    /// Height in pixels
    pub fn height(&self) -> usize {
        self.pixels.nrows()
    }

    /// Color at column `x`, row `y`, or `None` outside the grid
    pub fn at(&self, x: usize, y: usize) -> Option<Color> {
        self.pixels.get((y, x)).copied()
    }

    /// Color at `(x, y)` with both coordinates wrapped onto the grid
    pub fn at_wrapped(&self, x: usize, y: usize) -> Color {
        self.at(x % self.width(), y % self.height())
            .unwrap_or_default()
    }

    /// Convert back into an RGBA image
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        image::RgbaImage::from_fn(self.width() as u32, self.height() as u32, |x, y| {
            image::Rgba(self.at(x as usize, y as usize).unwrap_or_default())
        })
    }
}

fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    if width == 0 {
        return Err(invalid_argument(
            "width",
            &width,
            &"pixel source must be at least one pixel wide",
        ));
    }
    if height == 0 {
        return Err(invalid_argument(
            "height",
            &height,
            &"pixel source must be at least one pixel tall",
        ));
    }
    Ok(())
}

/// Build the two-line sample image
///
/// The grid is filled with `background`, then a vertical line is drawn down
/// column 1 and a horizontal line across row `height - 2`. Lines falling
/// outside a small grid are clipped.
///
/// # Errors
///
/// Returns an error if either dimension is zero
pub fn sample_input_image(
    width: usize,
    height: usize,
    line: Color,
    background: Color,
) -> Result<PixelSource> {
    let line_row = height.checked_sub(2);
    PixelSource::from_fn(width, height, |x, y| {
        if x == 1 || Some(y) == line_row {
            line
        } else {
            background
        }
    })
}
