//! Input/output around the catalog pipeline

/// Command-line interface and batch processing
pub mod cli;
/// Constants and configuration defaults
pub mod configuration;
/// Error types shared by the whole crate
pub mod error;
/// PNG loading and export
pub mod image;
/// Preview rendering of catalogs
pub mod preview;
/// Progress bars for batch processing
pub mod progress;
