//! Checks that `tests/unit` mirrors `src` and that every test file is wired in

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::fs;
    use std::io;
    use std::path::Path;

    // Entry points and module organization files don't require separate test files
    fn is_exempt(relative_path: &str) -> bool {
        relative_path == "main.rs" || relative_path == "lib.rs" || relative_path.ends_with("mod.rs")
    }

    fn source_and_test_paths() -> (HashSet<String>, HashSet<String>) {
        let src_dir = Path::new("src");
        let tests_dir = Path::new("tests/unit");

        let src_paths = collect_relative_paths(src_dir, src_dir).unwrap_or_else(|error| {
            assert!(src_dir.exists(), "Failed to read src directory: {error}");
            HashSet::new()
        });
        let test_paths = if tests_dir.exists() {
            collect_relative_paths(tests_dir, tests_dir).unwrap_or_default()
        } else {
            HashSet::new()
        };

        (src_paths, test_paths)
    }

    // Tests every source file has a unit test file at the mirrored path
    // Verified by deleting tests/unit/algorithm/search.rs
    #[test]
    fn test_all_src_files_have_unit_tests() {
        let (src_paths, test_paths) = source_and_test_paths();

        let mut missing_tests: Vec<&String> = src_paths
            .iter()
            .filter(|path| !is_exempt(path) && !test_paths.contains(*path))
            .collect();
        missing_tests.sort();

        assert!(
            missing_tests.is_empty(),
            "The following src files/directories are missing unit test counterparts:\n{}",
            missing_tests
                .iter()
                .map(|src_path| format!("  - src/{src_path} -> tests/unit/{src_path}"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Tests no unit test file outlives its source file
    // Verified by adding tests/unit/spatial/grid.rs without a source file
    #[test]
    fn test_all_unit_tests_have_src_counterparts() {
        let (src_paths, test_paths) = source_and_test_paths();

        let mut orphaned_tests: Vec<&String> = test_paths
            .iter()
            .filter(|path| !path.ends_with("mod.rs") && !src_paths.contains(*path))
            .collect();
        orphaned_tests.sort();

        assert!(
            orphaned_tests.is_empty(),
            "The following unit test files/directories have no corresponding src files:\n{}",
            orphaned_tests
                .iter()
                .map(|test_path| format!("  - tests/unit/{test_path} -> src/{test_path} (missing)"))
                .collect::<Vec<_>>()
                .join("\n")
        );
    }

    // Tests each unit test file is declared by its directory's mod.rs, so it is compiled
    // Verified by removing `pub mod pruning;` from tests/unit/algorithm/mod.rs
    #[test]
    fn test_unit_test_files_are_declared() {
        let tests_dir = Path::new("tests/unit");
        let mut undeclared = Vec::new();

        let result = check_declarations(tests_dir, &mut undeclared);
        if let Err(error) = result {
            assert!(!tests_dir.exists(), "Failed to scan unit tests: {error}");
        }

        assert!(
            undeclared.is_empty(),
            "The following unit test modules are not declared in a mod.rs:\n{}",
            undeclared.join("\n")
        );
    }

    fn check_declarations(dir: &Path, undeclared: &mut Vec<String>) -> Result<(), io::Error> {
        let declarations = fs::read_to_string(dir.join("mod.rs")).unwrap_or_default();

        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();
            let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let is_module = path.is_dir()
                || (path.extension().and_then(|ext| ext.to_str()) == Some("rs") && stem != "mod");
            if is_module && !declarations.contains(&format!("pub mod {stem};")) {
                undeclared.push(format!("  - {}", path.display()));
            }
            if path.is_dir() {
                check_declarations(&path, undeclared)?;
            }
        }

        Ok(())
    }

    fn collect_relative_paths(dir: &Path, base: &Path) -> Result<HashSet<String>, io::Error> {
        let mut paths = HashSet::new();

        if dir.is_dir() {
            for entry_result in fs::read_dir(dir)? {
                let path = entry_result?.path();

                let relative_path = match path.strip_prefix(base) {
                    Ok(stripped) => stripped.to_string_lossy().to_string(),
                    Err(_original_error) => {
                        return Err(io::Error::other("Failed to strip prefix"));
                    }
                };

                if path.is_dir() {
                    paths.insert(relative_path);
                    paths.extend(collect_relative_paths(&path, base)?);
                } else if path.extension().and_then(|ext| ext.to_str()) == Some("rs") {
                    paths.insert(relative_path);
                }
            }
        }

        Ok(paths)
    }

    // Tests every test file holds at least one #[test]
    // Verified by adding an empty tests/unit/io/text.rs
    #[test]
    fn test_all_test_files_contain_tests() {
        let tests_dir = Path::new("tests");
        let mut files_without_tests = Vec::new();

        let result = check_test_files(tests_dir, tests_dir, &mut files_without_tests);
        if let Err(error) = result {
            assert!(
                tests_dir.exists(),
                "Failed to scan tests directory: {error}"
            );
        }

        assert!(
            files_without_tests.is_empty(),
            "The following test files don't contain any #[test] functions:\n{}",
            files_without_tests.join("\n")
        );
    }

    fn check_test_files(
        dir: &Path,
        base_dir: &Path,
        files_without_tests: &mut Vec<String>,
    ) -> Result<(), io::Error> {
        for entry_result in fs::read_dir(dir)? {
            let path = entry_result?.path();

            if path.is_dir() {
                check_test_files(&path, base_dir, files_without_tests)?;
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("rs") {
                continue;
            }
            let Some(file_name) = path.file_name().and_then(|name| name.to_str()) else {
                continue;
            };

            // The harness root and module organization files hold no tests
            if (path.parent() == Some(base_dir) && file_name == "main.rs") || file_name == "mod.rs" {
                continue;
            }

            if !fs::read_to_string(&path)?.contains("#[test]") {
                files_without_tests.push(format!("  - {}", path.display()));
            }
        }

        Ok(())
    }
}
