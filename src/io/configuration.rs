//! Pipeline constants and runtime configuration defaults

use crate::spatial::Color;

/// Side length of sampled tiles when none is given
pub const DEFAULT_TILE_SIZE: usize = 3;

// Built-in sample image, used when no target is given
/// Width of the built-in sample image
pub const SAMPLE_WIDTH: usize = 4;
/// Height of the built-in sample image
pub const SAMPLE_HEIGHT: usize = 8;
/// Line color of the built-in sample image
pub const SAMPLE_LINE_COLOR: Color = [200, 200, 200, 255];
/// Background color of the built-in sample image
pub const SAMPLE_BACKGROUND: Color = [0, 0, 0, 255];
/// File stem used for outputs produced from the built-in sample
pub const SAMPLE_OUTPUT_STEM: &str = "sample";

// Preview layout
/// Minimum side length of the unscaled preview buffer
pub const PREVIEW_BUFFER_SIZE: u32 = 100;
/// Side length the preview buffer is scaled up to
pub const PREVIEW_DISPLAY_SIZE: u32 = 800;
/// Gap between tiles in the preview, in buffer pixels
pub const PREVIEW_MARGIN: u32 = 2;
/// Fill color of the preview buffer
pub const PREVIEW_BACKGROUND: Color = [40, 40, 40, 255];

// Output settings
/// Suffix added to preview filenames
pub const PREVIEW_SUFFIX: &str = "_catalog";
/// Suffix added to the directory holding exported tiles
pub const TILES_SUFFIX: &str = "_tiles";

/// Number of most frequent entries listed in the per-file summary
pub const SUMMARY_TOP_ENTRIES: usize = 5;

// Progress bar display settings
/// Threshold for switching to batch progress mode
pub const MAX_INDIVIDUAL_PROGRESS_BARS: usize = 5;
/// Number of tiles folded between progress bar refreshes
pub const PROGRESS_UPDATE_STRIDE: usize = 256;
