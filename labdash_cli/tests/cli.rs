// Copyright 2025 the Labdash Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! End to end tests of the `labdash` binary.

use std::path::Path;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

const METRICS: &str = r#"{
    "series": [
        {"name": "loss", "step": [0, 100, 200, 300], "value": [2.0, 1.2, 0.8, 0.5], "smoothed": [2.0, 1.5, 1.0, 0.7]},
        {"name": "accuracy", "step": [0, 100, 200, 300], "value": [0.1, 0.4, 0.6, 0.7]}
    ],
    "insights": [{"type": "info", "message": "loss is decreasing"}]
}"#;

fn write(root: &Path, rel: &str, body: &str) {
    let path = root.join(rel);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, body).unwrap();
}

fn labdash(cwd: &Path) -> Command {
    let mut cmd = Command::cargo_bin("labdash").unwrap();
    cmd.current_dir(cwd);
    cmd
}

#[test]
fn help_lists_subcommands() {
    let dir = tempfile::tempdir().unwrap();
    labdash(dir.path())
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("render"))
        .stdout(predicate::str::contains("report"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn render_writes_svg() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "metrics.json", METRICS);
    let out = dir.path().join("chart.svg");
    labdash(dir.path())
        .args(["render", "--input", "metrics.json", "--width", "640", "--out"])
        .arg(&out)
        .assert()
        .success();
    let svg = std::fs::read_to_string(out).unwrap();
    assert!(svg.starts_with("<svg"));
    assert!(svg.contains("width=\"640\""));
    assert!(svg.contains("smoothed-line"));
}

#[test]
fn render_log_without_positive_values_is_empty() {
    let dir = tempfile::tempdir().unwrap();
    write(
        dir.path(),
        "neg.json",
        r#"{"series": [{"name": "x", "step": [0, 1], "value": [-1, -2]}]}"#,
    );
    labdash(dir.path())
        .args(["render", "--input", "neg.json", "--log"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<svg").not());
}

#[test]
fn render_rejects_unknown_kind() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "metrics.json", METRICS);
    labdash(dir.path())
        .args(["render", "--input", "metrics.json", "--kind", "bogus"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown analysis"));
}

#[test]
fn render_missing_input_fails() {
    let dir = tempfile::tempdir().unwrap();
    labdash(dir.path())
        .args(["render", "--input", "nope.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("failed to read"));
}

#[test]
fn inspect_prints_last_values() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "metrics.json", METRICS);
    labdash(dir.path())
        .args(["inspect", "--input", "metrics.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0\tloss\t4 points\tlast 0.5\tsmoothed 0.7"))
        .stdout(predicate::str::contains("1\taccuracy\t4 points\tlast 0.7\tsmoothed 0.7"))
        .stdout(predicate::str::contains("info: loss is decreasing"));
}

#[test]
fn report_renders_available_cards() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data/metrics/r1.json", METRICS);
    write(
        dir.path(),
        "data/status/r1.json",
        r#"{"is_running": false, "last_updated": 1700000000}"#,
    );
    labdash(dir.path())
        .args(["report", "--root", "data", "--uuid", "r1", "--entity", "run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("<h2>Metrics</h2>"))
        .stdout(predicate::str::contains("<h2>Gradients</h2>").not())
        .stdout(predicate::str::contains("on Tue Nov 14 2023 at 22:13:20"));
}

#[test]
fn report_needs_existing_root() {
    let dir = tempfile::tempdir().unwrap();
    labdash(dir.path())
        .args(["report", "--root", "missing", "--uuid", "r1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("does not exist"));
}

#[test]
fn prefs_toggle_is_stored() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "data/metrics/r1.json", METRICS);
    labdash(dir.path())
        .args([
            "prefs", "--root", "data", "--uuid", "r1", "--kind", "metrics", "--toggle", "1",
            "--chart-type", "log",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("[x] 1 accuracy"))
        .stdout(predicate::str::contains("chart type: log"));
    let stored =
        std::fs::read_to_string(dir.path().join("data/metrics/preferences/r1.json")).unwrap();
    let prefs: serde_json::Value = serde_json::from_str(&stored).unwrap();
    assert_eq!(prefs["chart_type"], 1);
}

#[test]
fn settings_file_sets_default_width() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "metrics.json", METRICS);
    write(dir.path(), "labdash.toml", "width = 400\n");
    labdash(dir.path())
        .args(["render", "--input", "metrics.json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("width=\"400\""));
}
