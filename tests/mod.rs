mod snapshot_runner;

use snapshot_runner::{SnapshotResult, SnapshotRunner, SnapshotTest};
use std::env;

#[test]
fn run_snapshot_tests() {
    let update_mode = env::var("UPDATE_SNAPSHOTS").is_ok() || env::var("UPDATE_SNAPSHOT").is_ok();
    let test_filter = env::var("TEST_FILTER").ok();

    let runner = SnapshotRunner::new(update_mode, test_filter);

    let results = runner.run_all_tests().expect("Failed to run snapshot tests");

    runner.print_summary(&results);

    if !update_mode {
        let failed_count = results.iter().filter(|r| !r.passed()).count();
        if failed_count > 0 {
            panic!("❌ {failed_count} snapshot test(s) failed");
        }
    }
}

#[test]
fn snapshot_output_comparison_is_exact() {
    let result = |actual: &str, expected: &str, error: Option<(&str, &str)>| SnapshotResult {
        test: SnapshotTest {
            name: "structural::delete_last".into(),
            input_path: "input.html".into(),
            operations_path: "operations.json".into(),
            output_path: "output.html".into(),
            error_path: "error.txt".into(),
        },
        actual_output: Some(actual.into()),
        expected_output: Some(expected.into()),
        actual_error: error.map(|(actual, _)| actual.into()),
        expected_error: error.map(|(_, expected)| expected.into()),
        error: None,
    };

    assert!(result("<p>kept</p>\n", "<p>kept</p>\n", None).passed());
    assert!(!result("<p>kept</p>\n\n  ", "<p>kept</p>\n", None).passed());
    assert!(!result("<p>kept</p>", "\n\n<p>kept</p>", None).passed());
    assert!(result("", "", Some(("edit 1 of 1 failed", "edit 1 of 1 failed\n"))).passed());
}
