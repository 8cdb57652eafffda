#![allow(dead_code)]

use anyhow::Result;
use diffy::{DiffOptions, PatchFormatter};
use slide_edit_mcp::{apply, BatchError, EditOperation};
use std::fs;
use std::path::{Path, PathBuf};

/// Runs every `tests/snapshots/<group>/<case>/` directory holding an `input.html` and an
/// `operations.json`. A case expects either `output.html`, or `error.txt` (with an optional
/// `output.html` for the partially edited document).
pub struct SnapshotRunner {
    update_mode: bool,
    test_filter: Option<String>,
    root: PathBuf,
}

#[derive(Debug, Clone)]
pub struct SnapshotTest {
    pub name: String,
    pub input_path: PathBuf,
    pub operations_path: PathBuf,
    pub output_path: PathBuf,
    pub error_path: PathBuf,
}

#[derive(Debug)]
pub struct SnapshotResult {
    pub test: SnapshotTest,
    pub actual_output: Option<String>,
    pub expected_output: Option<String>,
    pub actual_error: Option<String>,
    pub expected_error: Option<String>,
    pub error: Option<String>,
}

impl SnapshotResult {
    pub fn output_matches(&self) -> bool {
        match (&self.actual_output, &self.expected_output) {
            (Some(actual), Some(expected)) => actual == expected,
            (None, None) => true,
            _ => false,
        }
    }

    pub fn error_matches(&self) -> bool {
        match (&self.actual_error, &self.expected_error) {
            (Some(actual), Some(expected)) => actual.trim() == expected.trim(),
            (None, None) => true,
            _ => false,
        }
    }

    pub fn passed(&self) -> bool {
        self.error.is_none() && self.output_matches() && self.error_matches()
    }
}

impl SnapshotRunner {
    pub fn new(update_mode: bool, test_filter: Option<String>) -> Self {
        Self {
            update_mode,
            test_filter,
            root: Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/snapshots"),
        }
    }

    pub fn discover_tests(&self) -> Result<Vec<SnapshotTest>> {
        let mut tests = Vec::new();
        Self::discover_tests_recursive(&self.root, &self.root, &mut tests)?;
        tests.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tests)
    }

    /// Filter tests based on the TEST_FILTER environment variable
    /// Supports patterns like:
    /// - "structural" (matches all tests starting with this)
    /// - "structural::delete_middle" (exact match)
    /// - "errors,sequences" (multiple patterns separated by commas)
    fn filter_tests(&self, tests: Vec<SnapshotTest>) -> Vec<SnapshotTest> {
        let Some(filter) = &self.test_filter else {
            return tests;
        };
        let patterns: Vec<&str> = filter.split(',').map(|s| s.trim()).collect();

        tests
            .into_iter()
            .filter(|test| {
                patterns.iter().any(|pattern| {
                    if pattern.is_empty() {
                        false
                    } else if pattern.contains("::") {
                        test.name == *pattern
                    } else {
                        test.name.starts_with(pattern)
                    }
                })
            })
            .collect()
    }

    fn discover_tests_recursive(
        root: &Path,
        dir: &Path,
        tests: &mut Vec<SnapshotTest>,
    ) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_dir() {
                continue;
            }

            let operations_path = path.join("operations.json");
            if operations_path.exists() {
                let name = path
                    .strip_prefix(root)
                    .unwrap_or(&path)
                    .to_string_lossy()
                    .replace(['/', '\\'], "::");

                tests.push(SnapshotTest {
                    name,
                    input_path: path.join("input.html"),
                    operations_path,
                    output_path: path.join("output.html"),
                    error_path: path.join("error.txt"),
                });
            } else {
                // Recurse into groups
                Self::discover_tests_recursive(root, &path, tests)?;
            }
        }
        Ok(())
    }

    pub fn run_test(&self, test: SnapshotTest) -> SnapshotResult {
        let mut result = SnapshotResult {
            test,
            actual_output: None,
            expected_output: None,
            actual_error: None,
            expected_error: None,
            error: None,
        };

        match Self::execute_test(&result.test) {
            Ok(Ok(output)) => result.actual_output = Some(output),
            Ok(Err(batch_error)) => {
                result.actual_error = Some(batch_error.to_string());
                if batch_error.applied() > 0 {
                    result.actual_output = Some(batch_error.partial_html);
                }
            }
            Err(e) => {
                result.error = Some(e.to_string());
                return result;
            }
        }

        if self.update_mode {
            if let Err(e) = Self::update_snapshot(&result) {
                result.error = Some(format!("Failed to write snapshot: {e}"));
            }
            result.expected_output = result.actual_output.clone();
            result.expected_error = result.actual_error.clone();
        } else {
            result.expected_output = fs::read_to_string(&result.test.output_path).ok();
            result.expected_error = fs::read_to_string(&result.test.error_path).ok();
        }

        result
    }

    fn execute_test(test: &SnapshotTest) -> Result<Result<String, BatchError>> {
        let input = fs::read_to_string(&test.input_path)?;
        let operations: Vec<EditOperation> =
            serde_json::from_str(&fs::read_to_string(&test.operations_path)?)?;
        Ok(apply(&input, &operations))
    }

    fn update_snapshot(result: &SnapshotResult) -> Result<()> {
        let test = &result.test;
        write_or_remove(&test.output_path, result.actual_output.as_deref())?;
        write_or_remove(&test.error_path, result.actual_error.as_deref())?;
        Ok(())
    }

    /// Run all discovered tests (filtered if TEST_FILTER is set)
    pub fn run_all_tests(&self) -> Result<Vec<SnapshotResult>> {
        let tests = self.filter_tests(self.discover_tests()?);
        assert_ne!(tests.len(), 0, "no snapshot tests found");

        if let Some(filter) = &self.test_filter {
            println!("🔍 Running filtered tests: {filter}");
            println!("   Found {} matching test(s)", tests.len());
        }

        Ok(tests.into_iter().map(|test| self.run_test(test)).collect())
    }

    pub fn print_summary(&self, results: &[SnapshotResult]) {
        let total = results.len();
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = total - passed;

        let mut diff_options = DiffOptions::new();
        diff_options.set_original_filename("expected");
        diff_options.set_modified_filename("actual");
        let f = PatchFormatter::new()
            .with_color()
            .missing_newline_message(false);

        println!("\n===📊 Snapshot Test Summary===");
        println!("  Total:  {total}");
        println!("  Passed: {passed}");
        println!("  Failed: {failed}");
        if self.update_mode {
            println!("  Mode:   UPDATE (expected outputs written)");
        } else {
            println!("  Mode:   VERIFY");
        }

        for result in results.iter().filter(|r| !r.passed()) {
            println!("\n❌ {}", result.test.name);
            println!(
                "To update snapshot for just this test, run `UPDATE_SNAPSHOTS=1 TEST_FILTER={} cargo test`",
                result.test.name
            );
            if let Some(error) = &result.error {
                println!("Error:\n{error}");
                continue;
            }
            if !result.error_matches() {
                let patch = diff_options.create_patch(
                    result.expected_error.as_deref().unwrap_or_default(),
                    result.actual_error.as_deref().unwrap_or_default(),
                );
                println!("\n***ERROR DIFF***\n\n{}", f.fmt_patch(&patch));
            }
            if !result.output_matches() {
                let patch = diff_options.create_patch(
                    result.expected_output.as_deref().unwrap_or_default(),
                    result.actual_output.as_deref().unwrap_or_default(),
                );
                println!("\n***OUTPUT DIFF***\n\n{}", f.fmt_patch(&patch));
            }
        }
    }
}

fn write_or_remove(path: &Path, contents: Option<&str>) -> Result<()> {
    match contents {
        Some(contents) => fs::write(path, contents)?,
        None if path.exists() => fs::remove_file(path)?,
        None => {}
    }
    Ok(())
}
