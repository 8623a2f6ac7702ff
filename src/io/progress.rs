//! Multi-file progress tracking with automatic batching for large sets

use crate::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::path::Path;
use std::sync::LazyLock;

/// Progress of a single file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileProgress {
    /// Name shown next to the bar
    pub name: String,
    /// Tiles folded into the catalog so far
    pub done: usize,
    /// Tiles the source will yield
    pub total: usize,
    /// Distinct tiles found so far
    pub distinct: usize,
}

/// Coordinates progress display for batch operations
///
/// Shows one bar per file for small batches; larger batches add a single
/// files-completed bar and keep only the most recent files visible.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    file_bars: Vec<ProgressBar>,
    file_states: Vec<FileProgress>,
    finished: bool,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

static TILE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{msg} [{bar:30.cyan/blue}] {prefix}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Files: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

impl ProgressManager {
    /// Create a new progress manager
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            file_bars: Vec::new(),
            file_states: Vec::new(),
            finished: false,
        }
    }

    /// Create a progress manager that draws nothing
    pub fn hidden() -> Self {
        Self {
            multi_progress: MultiProgress::with_draw_target(
                indicatif::ProgressDrawTarget::hidden(),
            ),
            ..Self::new()
        }
    }

    /// Initialize progress bars based on file count
    pub fn initialize(&mut self, file_count: usize) {
        // Switch to batch mode for large file sets to avoid terminal spam
        if file_count > MAX_INDIVIDUAL_PROGRESS_BARS + 1 {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let bars_to_create = file_count.min(MAX_INDIVIDUAL_PROGRESS_BARS);
        for _ in 0..bars_to_create {
            let pb = ProgressBar::new(0);
            pb.set_style(TILE_STYLE.clone());
            self.file_bars.push(self.multi_progress.add(pb));
        }
    }

    /// Configure progress for a new file expecting `total_tiles` tiles
    pub fn start_file(&mut self, index: usize, path: &Path, total_tiles: usize) {
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        if index >= self.file_states.len() {
            self.file_states.resize(index + 1, FileProgress::default());
        }
        if let Some(state) = self.file_states.get_mut(index) {
            *state = FileProgress {
                name,
                done: 0,
                total: total_tiles,
                distinct: 0,
            };
        }
        self.update_bars();
    }

    /// Report how many tiles of a file have been folded and how many were new
    pub fn update_tiles(&mut self, index: usize, done: usize, distinct: usize) {
        if let Some(state) = self.file_states.get_mut(index) {
            state.done = done.min(state.total);
            state.distinct = distinct.min(state.done);
        }
        self.update_bars();
    }

    /// Mark file as completed with its final distinct count
    pub fn complete_file(&mut self, index: usize, distinct: usize) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.inc(1);
        }

        if let Some(state) = self.file_states.get_mut(index) {
            state.name = format!("✓ {}", state.name);
            state.done = state.total;
            state.distinct = distinct.min(state.total);
        }
        self.update_bars();
    }

    /// Current state of the file at `index`
    pub fn file_state(&self, index: usize) -> Option<&FileProgress> {
        self.file_states.get(index)
    }

    /// Clean up all progress displays
    pub fn finish(&mut self) {
        if let Some(ref batch_bar) = self.batch_bar {
            batch_bar.finish_with_message("All files processed");
        }
        if let Err(error) = self.multi_progress.clear() {
            log::debug!("Failed to clear progress bars: {error}");
        }
        self.finished = true;
    }

    /// Whether `finish` has run
    pub const fn is_finished(&self) -> bool {
        self.finished
    }

    /// Update all progress bars to show the last N started files
    fn update_bars(&self) {
        let active: Vec<&FileProgress> = self
            .file_states
            .iter()
            .filter(|state| !state.name.is_empty())
            .collect();

        let start_idx = active.len().saturating_sub(MAX_INDIVIDUAL_PROGRESS_BARS);
        let visible = active.get(start_idx..).unwrap_or(&[]);

        for (bar_idx, state) in visible.iter().enumerate() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(state.total as u64);
                bar.set_position(state.done as u64);
                let max_width = state.total.to_string().len();
                bar.set_message(format!(
                    "{:>max_width$}/{} ({} distinct)",
                    state.done, state.total, state.distinct
                ));
                bar.set_prefix(state.name.clone());
            }
        }

        for bar_idx in visible.len()..self.file_bars.len() {
            if let Some(bar) = self.file_bars.get(bar_idx) {
                bar.set_length(0);
                bar.set_position(0);
                bar.set_message(String::new());
                bar.set_prefix(String::new());
            }
        }
    }
}
