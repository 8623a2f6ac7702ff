//! Command-line interface for cataloging the tiles of PNG files

use crate::catalog::TileCatalog;
use crate::io::configuration::{
    DEFAULT_TILE_SIZE, PREVIEW_SUFFIX, PROGRESS_UPDATE_STRIDE, SAMPLE_BACKGROUND, SAMPLE_HEIGHT,
    SAMPLE_LINE_COLOR, SAMPLE_OUTPUT_STEM, SAMPLE_WIDTH, SUMMARY_TOP_ENTRIES, TILES_SUFFIX,
};
use crate::io::error::{CatalogError, Result, unsupported_target};
use crate::io::image::{export_catalog_tiles, load_pixel_source};
use crate::io::preview::CatalogRenderer;
use crate::io::progress::ProgressManager;
use crate::spatial::source::sample_input_image;
use crate::spatial::{PixelSource, TileSampler};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(name = "tilecatalog")]
#[command(
    author,
    version,
    about = "Sample wrapping tiles from images and catalog the distinct ones"
)]
/// Command-line arguments for the tile catalog tool
pub struct Cli {
    /// Input PNG file or directory to process (built-in sample when omitted)
    #[arg(value_name = "TARGET")]
    pub target: Option<PathBuf>,

    /// Side length of sampled tiles
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub size: usize,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,

    /// Also export every distinct tile as its own PNG
    #[arg(short, long)]
    pub tiles: bool,

    /// Directory for outputs of the built-in sample
    #[arg(short, long, value_name = "DIR", default_value = ".")]
    pub output: PathBuf,
}

impl Cli {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Where a source comes from and where its outputs go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Job {
    /// A PNG file on disk; outputs sit next to it
    File(PathBuf),
    /// The built-in sample; outputs go to the given directory
    Sample(PathBuf),
}

impl Job {
    /// Path used to name outputs
    pub fn stem_path(&self) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Sample(directory) => directory.join(format!("{SAMPLE_OUTPUT_STEM}.png")),
        }
    }

    /// Path of the rendered preview
    pub fn preview_path(&self) -> PathBuf {
        sibling_path(&self.stem_path(), PREVIEW_SUFFIX, ".png")
    }

    /// Directory receiving exported tiles
    pub fn tiles_path(&self) -> PathBuf {
        sibling_path(&self.stem_path(), TILES_SUFFIX, "")
    }

    fn load(&self) -> Result<PixelSource> {
        match self {
            Self::File(path) => load_pixel_source(path),
            Self::Sample(_) => sample_input_image(
                SAMPLE_WIDTH,
                SAMPLE_HEIGHT,
                SAMPLE_LINE_COLOR,
                SAMPLE_BACKGROUND,
            ),
        }
    }
}

fn sibling_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let name = format!("{}{suffix}{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Orchestrates batch cataloging of PNG files with progress tracking
pub struct FileProcessor {
    cli: Cli,
    renderer: CatalogRenderer,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);
        Self::with_progress_manager(cli, progress_manager)
    }

    /// Create a file processor reporting to the given progress manager
    pub fn with_progress_manager(cli: Cli, progress_manager: Option<ProgressManager>) -> Self {
        Self {
            cli,
            renderer: CatalogRenderer::default(),
            progress_manager,
        }
    }

    /// Progress manager in use, if progress is shown
    pub const fn progress_manager(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    /// Process every job selected by the CLI arguments
    ///
    /// Returns the catalogs built, in processing order.
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, loading, sampling or export fails
    pub fn process(&mut self) -> Result<Vec<TileCatalog>> {
        let jobs = self.collect_jobs()?;

        if jobs.is_empty() {
            log::info!("Nothing to process");
            return Ok(Vec::new());
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.initialize(jobs.len());
        }

        let catalogs = jobs
            .iter()
            .enumerate()
            .map(|(index, job)| self.process_job(job, index))
            .collect::<Result<Vec<_>>>();

        // Bars are cleared whether or not a job failed
        if let Some(ref mut pm) = self.progress_manager {
            pm.finish();
        }

        catalogs
    }

    /// Jobs selected by the target argument, sorted, with finished files skipped
    ///
    /// The built-in sample is always processed.
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a PNG file nor a readable directory
    pub fn collect_jobs(&self) -> Result<Vec<Job>> {
        let Some(target) = &self.cli.target else {
            return Ok(vec![Job::Sample(self.cli.output.clone())]);
        };

        if target.is_file() {
            if is_png(target) {
                Ok(self.keep_unfinished(vec![Job::File(target.clone())]))
            } else {
                Err(unsupported_target(target, "Target file must be a PNG image"))
            }
        } else if target.is_dir() {
            let files = list_png_files(target)?;
            Ok(self.keep_unfinished(files.into_iter().map(Job::File).collect()))
        } else {
            Err(unsupported_target(
                target,
                "Target must be a PNG file or directory",
            ))
        }
    }

    fn keep_unfinished(&self, jobs: Vec<Job>) -> Vec<Job> {
        if !self.cli.skip_existing() {
            return jobs;
        }

        jobs.into_iter()
            .filter(|job| {
                let exists = job.preview_path().exists();
                if exists {
                    log::warn!(
                        "Skipping: {} (output exists)",
                        job.stem_path().display()
                    );
                }
                !exists
            })
            .collect()
    }

    fn process_job(&mut self, job: &Job, index: usize) -> Result<TileCatalog> {
        let start_time = Instant::now();
        let source = job.load()?;
        let sampler = TileSampler::new(&source, self.cli.size)?;

        if let Some(ref mut pm) = self.progress_manager {
            pm.start_file(index, &job.stem_path(), sampler.total());
        }

        let mut catalog = TileCatalog::new();
        let mut distinct = 0;
        for (folded, tile) in sampler.enumerate() {
            if catalog.insert(tile).is_new {
                distinct += 1;
            }
            if (folded + 1) % PROGRESS_UPDATE_STRIDE == 0 {
                if let Some(ref mut pm) = self.progress_manager {
                    pm.update_tiles(index, folded + 1, distinct);
                }
            }
        }

        self.renderer
            .export(&source, &catalog, job.preview_path())?;

        if self.cli.tiles {
            export_catalog_tiles(&catalog, job.tiles_path())?;
        }

        if let Some(ref mut pm) = self.progress_manager {
            pm.complete_file(index, catalog.len());
        }

        log_summary(job, &catalog, start_time);
        Ok(catalog)
    }
}

fn log_summary(job: &Job, catalog: &TileCatalog, start_time: Instant) {
    log::info!(
        "{}: {} tiles sampled, {} distinct ({:.1?})",
        job.stem_path().display(),
        catalog.total_count(),
        catalog.len(),
        start_time.elapsed()
    );

    let frequencies = catalog.relative_frequencies();
    for index in catalog.indices_by_count().into_iter().take(SUMMARY_TOP_ENTRIES) {
        if let (Some(entry), Some(share)) = (catalog.entry(index), frequencies.get(index)) {
            log::debug!(
                "  tile {index}: x{} ({:.1}%)",
                entry.count(),
                share * 100.0
            );
        }
    }
}

/// Source PNGs directly inside `directory`, sorted, previews excluded
///
/// # Errors
///
/// Returns an error if the directory or one of its entries cannot be read
pub fn list_png_files(directory: &Path) -> Result<Vec<PathBuf>> {
    let read_error = |source| CatalogError::FileSystem {
        path: directory.to_path_buf(),
        operation: "read directory",
        source,
    };

    let mut files = Vec::new();
    for entry in std::fs::read_dir(directory).map_err(read_error)? {
        let path = entry.map_err(read_error)?.path();
        if is_png(&path) && !is_generated(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

fn is_png(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some("png")
}

// Previews written into a scanned directory are not sources themselves
fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(PREVIEW_SUFFIX))
}
