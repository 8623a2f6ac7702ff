//! Checks that `tests/unit/` mirrors `src/` file for file

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    const SRC_DIR: &str = "src";
    const UNIT_DIR: &str = "tests/unit";
    const TESTS_DIR: &str = "tests";

    // Entry points and module roots only wire things together
    fn needs_unit_test(relative: &str) -> bool {
        relative != "main.rs" && relative != "lib.rs" && !relative.ends_with("mod.rs")
    }

    // `tests/unit.rs` pulls in `tests/unit/`, `tests/meta.rs` pulls in `tests/meta/`
    fn is_harness_root(path: &Path, base: &Path) -> bool {
        path.parent() == Some(base) && path.with_extension("").is_dir()
    }

    /// Relative paths of every directory and `.rs` file below `base`
    fn relative_paths(base: &Path) -> io::Result<BTreeSet<String>> {
        let mut paths = BTreeSet::new();
        collect(base, base, &mut paths)?;
        Ok(paths)
    }

    fn collect(dir: &Path, base: &Path, paths: &mut BTreeSet<String>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            let relative = path
                .strip_prefix(base)
                .map_err(io::Error::other)?
                .to_string_lossy()
                .replace('\\', "/");

            if path.is_dir() {
                paths.insert(relative);
                collect(&path, base, paths)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                paths.insert(relative);
            }
        }
        Ok(())
    }

    fn rust_files(dir: &Path, files: &mut Vec<std::path::PathBuf>) -> io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                rust_files(&path, files)?;
            } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                files.push(path);
            }
        }
        Ok(())
    }

    #[test]
    fn test_all_src_files_have_unit_tests() {
        let src = relative_paths(Path::new(SRC_DIR)).unwrap_or_default();
        let unit = relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();
        assert!(!src.is_empty(), "Failed to read {SRC_DIR}");

        let missing: Vec<String> = src
            .iter()
            .filter(|path| needs_unit_test(path) && !unit.contains(*path))
            .map(|path| format!("  - src/{path} -> tests/unit/{path}"))
            .collect();

        assert!(
            missing.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing.join("\n")
        );
    }

    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let src = relative_paths(Path::new(SRC_DIR)).unwrap_or_default();
        let unit = relative_paths(Path::new(UNIT_DIR)).unwrap_or_default();

        let orphaned: Vec<String> = unit
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src.contains(*path))
            .map(|path| format!("  - tests/unit/{path} -> src/{path} (missing)"))
            .collect();

        assert!(
            orphaned.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned.join("\n")
        );
    }

    #[test]
    fn test_all_test_files_contain_tests() {
        let base = Path::new(TESTS_DIR);
        let mut files = Vec::new();
        let scan = rust_files(base, &mut files);
        assert!(scan.is_ok(), "Failed to scan {TESTS_DIR}: {scan:?}");

        let without_tests: Vec<String> = files
            .iter()
            .filter(|path| {
                path.file_name().and_then(|name| name.to_str()) != Some("mod.rs")
                    && !is_harness_root(path, base)
            })
            .filter(|path| {
                fs::read_to_string(path).is_ok_and(|content| !content.contains("#[test]"))
            })
            .map(|path| format!("  - {}", path.display()))
            .collect();

        assert!(
            without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            without_tests.join("\n")
        );
    }
}
