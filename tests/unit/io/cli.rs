//! Tests for command-line parsing and batch processing

#[cfg(test)]
mod tests {
    use clap::Parser;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tilecatalog::io::cli::{Cli, FileProcessor, Job, list_png_files};
    use tilecatalog::io::configuration::DEFAULT_TILE_SIZE;
    use tilecatalog::io::image::save_rgba_image;
    use tilecatalog::io::progress::ProgressManager;
    use tilecatalog::{CatalogError, PixelSource};

    fn quiet_cli(extra: &[&str]) -> Cli {
        let mut args = vec!["program", "--quiet"];
        args.extend_from_slice(extra);
        Cli::parse_from(args)
    }

    fn write_png(path: &Path) {
        let source = PixelSource::from_fn(3, 3, |x, y| [(x * 80) as u8, (y * 80) as u8, 0, 255])
            .unwrap();
        save_rgba_image(&source.to_rgba_image(), path).unwrap();
    }

    // Tests the tool runs with no arguments at all
    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::parse_from(["program"]);

        assert_eq!(cli.target, None);
        assert_eq!(cli.size, DEFAULT_TILE_SIZE);
        assert_eq!(cli.output, PathBuf::from("."));
        assert!(!cli.quiet);
        assert!(!cli.tiles);
        assert!(cli.skip_existing());
        assert!(cli.should_show_progress());
    }

    #[test]
    fn test_cli_parse_all_args() {
        let cli = Cli::parse_from([
            "program", "input.png", "--size", "5", "--quiet", "--no-skip", "--tiles", "--output",
            "out",
        ]);

        assert_eq!(cli.target, Some(PathBuf::from("input.png")));
        assert_eq!(cli.size, 5);
        assert!(cli.quiet);
        assert!(!cli.skip_existing());
        assert!(!cli.should_show_progress());
        assert!(cli.tiles);
        assert_eq!(cli.output, PathBuf::from("out"));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(["program", "a.png", "-s", "2", "-q", "-n", "-t", "-o", "x"]);

        assert_eq!(cli.size, 2);
        assert!(cli.quiet);
        assert!(cli.no_skip);
        assert!(cli.tiles);
        assert_eq!(cli.output, PathBuf::from("x"));
    }

    #[test]
    fn test_job_output_paths() {
        let file = Job::File(PathBuf::from("images/brick.png"));
        assert_eq!(file.preview_path(), PathBuf::from("images/brick_catalog.png"));
        assert_eq!(file.tiles_path(), PathBuf::from("images/brick_tiles"));

        let sample = Job::Sample(PathBuf::from("out"));
        assert_eq!(sample.stem_path(), PathBuf::from("out/sample.png"));
        assert_eq!(sample.preview_path(), PathBuf::from("out/sample_catalog.png"));
    }

    // Tests the built-in sample is cataloged when no target is given
    #[test]
    fn test_process_builtin_sample() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().to_string_lossy().to_string();
        let mut processor = FileProcessor::new(quiet_cli(&["--output", &output, "--tiles"]));

        let catalogs = processor.process().unwrap();

        assert_eq!(catalogs.len(), 1);
        let catalog = catalogs.first().unwrap();
        assert_eq!(catalog.total_count(), 32);
        assert_eq!(catalog.len(), 16);
        assert!(dir.path().join("sample_catalog.png").exists());
        assert!(dir.path().join("sample_tiles").join("tile_000_x5.png").exists());
    }

    // Tests directories are scanned in sorted order and previews are not re-read
    #[test]
    fn test_collect_jobs_from_directory() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("b.png"));
        write_png(&dir.path().join("a.png"));
        write_png(&dir.path().join("a_catalog.png"));
        std::fs::write(dir.path().join("notes.txt"), "not an image").unwrap();

        let target = dir.path().to_string_lossy().to_string();
        let processor = FileProcessor::new(quiet_cli(&[&target, "--no-skip"]));

        let jobs = processor.collect_jobs().unwrap();

        assert_eq!(
            jobs,
            vec![
                Job::File(dir.path().join("a.png")),
                Job::File(dir.path().join("b.png")),
            ]
        );
    }

    // Tests files with an existing preview are skipped unless --no-skip is given
    #[test]
    fn test_existing_output_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_png(&dir.path().join("a.png"));
        write_png(&dir.path().join("a_catalog.png"));
        let target = dir.path().join("a.png").to_string_lossy().to_string();

        let skipping = FileProcessor::new(quiet_cli(&[&target]));
        assert!(skipping.collect_jobs().unwrap().is_empty());

        let mut forced = FileProcessor::new(quiet_cli(&[&target, "--no-skip", "-s", "1"]));
        let catalogs = forced.process().unwrap();
        assert_eq!(catalogs.first().map(|catalog| catalog.len()), Some(9));
    }

    #[test]
    fn test_rejects_non_png_target() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "text").unwrap();
        let target = path.to_string_lossy().to_string();

        let processor = FileProcessor::new(quiet_cli(&[&target]));
        assert!(processor.collect_jobs().is_err());

        let missing = dir.path().join("missing").to_string_lossy().to_string();
        let processor = FileProcessor::new(quiet_cli(&[&missing]));
        assert!(processor.collect_jobs().is_err());
    }

    // Tests the built-in sample is regenerated even when its preview exists
    #[test]
    fn test_builtin_sample_is_never_skipped() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().to_string_lossy().to_string();

        for _ in 0..2 {
            let mut processor = FileProcessor::new(quiet_cli(&["--output", &output]));
            let catalogs = processor.process().unwrap();
            assert_eq!(catalogs.len(), 1);
        }
        assert!(dir.path().join("sample_catalog.png").exists());
    }

    // Tests an unreadable directory is reported with its path and the failed operation
    #[test]
    fn test_list_png_files_reports_directory() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("gone");

        let result = list_png_files(&missing);

        assert!(matches!(
            result,
            Err(CatalogError::FileSystem {
                ref path,
                operation: "read directory",
                ..
            }) if *path == missing
        ));
    }

    // Tests progress bars are cleaned up when a job fails
    #[test]
    fn test_progress_finished_after_failure() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().to_string_lossy().to_string();
        let cli = Cli::parse_from(["program", "--output", &output, "-s", "0"]);
        let mut processor =
            FileProcessor::with_progress_manager(cli, Some(ProgressManager::hidden()));

        assert!(processor.process().is_err());
        assert!(
            processor
                .progress_manager()
                .is_some_and(ProgressManager::is_finished)
        );
    }

    #[test]
    fn test_zero_tile_size_fails() {
        let dir = TempDir::new().unwrap();
        let output = dir.path().to_string_lossy().to_string();
        let mut processor = FileProcessor::new(quiet_cli(&["--output", &output, "-s", "0"]));

        assert!(processor.process().is_err());
        assert!(!dir.path().join("sample_catalog.png").exists());
    }
}
