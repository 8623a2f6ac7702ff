//! PNG loading into pixel sources and PNG export of rendered images

use std::path::Path;

use image::RgbaImage;

use crate::catalog::TileCatalog;
use crate::io::error::{CatalogError, Result};
use crate::spatial::PixelSource;

/// Decode an image file into a pixel source
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The decoded image has zero width or height
pub fn load_pixel_source<P: AsRef<Path>>(path: P) -> Result<PixelSource> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| CatalogError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    PixelSource::from_rgba_image(&img.to_rgba8())
}

/// Save an RGBA image, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The image cannot be encoded or written
pub fn save_rgba_image<P: AsRef<Path>>(img: &RgbaImage, output_path: P) -> Result<()> {
    let output_path = output_path.as_ref();
    if let Some(parent) = output_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| CatalogError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    img.save(output_path)
        .map_err(|e| CatalogError::ImageExport {
            path: output_path.to_path_buf(),
            source: e,
        })?;

    Ok(())
}

/// Name of the exported file for the entry at `index` seen `count` times
pub fn tile_file_name(index: usize, count: usize) -> String {
    format!("tile_{index:03}_x{count}.png")
}

/// Write every catalog representative as its own PNG inside `directory`
///
/// Returns the number of files written.
///
/// # Errors
///
/// Returns an error if the directory cannot be created or any tile fails to save
pub fn export_catalog_tiles<P: AsRef<Path>>(catalog: &TileCatalog, directory: P) -> Result<usize> {
    let directory = directory.as_ref();
    std::fs::create_dir_all(directory).map_err(|e| CatalogError::FileSystem {
        path: directory.to_path_buf(),
        operation: "create directory",
        source: e,
    })?;

    for (index, entry) in catalog.entries().enumerate() {
        let path = directory.join(tile_file_name(index, entry.count()));
        save_rgba_image(&entry.representative().to_rgba_image(), path)?;
    }

    log::debug!(
        "Exported {} tiles to '{}'",
        catalog.len(),
        directory.display()
    );
    Ok(catalog.len())
}
