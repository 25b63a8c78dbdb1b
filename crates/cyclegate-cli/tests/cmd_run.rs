//! Integration tests for `cyclegate run`.
#![allow(clippy::expect_used)]

use std::io::Write as _;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Path to the compiled `cyclegate` binary.
fn cyclegate_bin() -> PathBuf {
    let mut path = std::env::current_exe().expect("current exe");
    path.pop();
    if path.ends_with("deps") {
        path.pop();
    }
    path.push("cyclegate");
    path
}

/// Path to a shared fixture file.
fn fixture(name: &str) -> PathBuf {
    let mut path = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    path.push("../../tests/fixtures");
    path.push(name);
    path
}

/// Runs `cyclegate` with the given args, feeding `input` on stdin.
fn run_with_stdin(args: &[&str], input: &str) -> std::process::Output {
    let mut child = Command::new(cyclegate_bin())
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cyclegate");
    child
        .stdin
        .as_mut()
        .expect("child stdin")
        .write_all(input.as_bytes())
        .expect("write stdin");
    child.wait_with_output().expect("wait for cyclegate")
}

// ---------------------------------------------------------------------------
// run: human mode over stdin
// ---------------------------------------------------------------------------

#[test]
fn chain_of_links_is_accepted() {
    let out = run_with_stdin(&["run"], "1 2\n2 3\n3 4\n");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout,
        "link accepted: 1 -> 2\nlink accepted: 2 -> 3\nlink accepted: 3 -> 4\n"
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("3 accepted, 0 rejected"),
        "stderr: {stderr}"
    );
}

#[test]
fn closing_link_is_rejected_but_run_succeeds() {
    let out = run_with_stdin(&["run"], "1 2\n2 3\n3 1\n1 3\n");
    assert!(
        out.status.success(),
        "rejected links are not errors: {:?}",
        out.status.code()
    );
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("cycle found: 3 -> 1"), "stdout: {stdout}");
    assert!(
        stdout.contains("link accepted: 1 -> 3"),
        "the shortcut must still be accepted: {stdout}"
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("3 accepted, 1 rejected"),
        "stderr: {stderr}"
    );
}

#[test]
fn strict_mode_turns_rejections_into_exit_1() {
    let out = run_with_stdin(&["run", "--strict"], "1 2\n2 1\n");
    assert_eq!(out.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 rejected link"), "stderr: {stderr}");
}

#[test]
fn self_loop_is_reported_distinctly() {
    let out = run_with_stdin(&["run"], "5 5\n");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(
        stdout.contains("self-loop rejected: 5 -> 5"),
        "stdout: {stdout}"
    );
}

#[test]
fn out_of_range_names_the_value_and_universe() {
    let out = run_with_stdin(&["run", "--nodes", "8"], "9 1\n");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("out of range: 9"), "stdout: {stdout}");
    assert!(stdout.contains("0..8"), "stdout: {stdout}");
}

#[test]
fn negative_identifier_is_out_of_range() {
    let out = run_with_stdin(&["run", "--nodes", "8"], "-1 3\n");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("out of range: -1"), "stdout: {stdout}");
}

#[test]
fn malformed_line_is_ignored_not_fatal() {
    let out = run_with_stdin(&["run"], "1 2\nnot numbers\n2 3\n");
    assert!(out.status.success(), "exit code: {:?}", out.status.code());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("link accepted: 1 -> 2"), "stdout: {stdout}");
    assert!(
        stdout.contains("link accepted: 2 -> 3"),
        "the loop must continue after a bad line: {stdout}"
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("input ignored:"), "stderr: {stderr}");
    assert!(
        stderr.contains("2 accepted, 0 rejected"),
        "ignored lines do not count as rejections: {stderr}"
    );
}

#[test]
fn blank_lines_are_skipped_silently() {
    let out = run_with_stdin(&["run"], "1 2\n\n   \n2 3\n");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("input ignored:"), "stderr: {stderr}");
    assert!(
        stderr.contains("2 accepted, 0 rejected"),
        "stderr: {stderr}"
    );
}

#[test]
fn quiet_keeps_only_the_summary() {
    let out = run_with_stdin(&["run", "--quiet"], "1 2\nbad line\n2 1\n");
    assert!(out.status.success());
    assert!(
        out.stdout.is_empty(),
        "quiet suppresses outcome lines: {:?}",
        String::from_utf8_lossy(&out.stdout)
    );
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(!stderr.contains("input ignored:"), "stderr: {stderr}");
    assert!(
        stderr.contains("1 accepted, 1 rejected"),
        "summary survives quiet mode: {stderr}"
    );
}

// ---------------------------------------------------------------------------
// run: JSON mode
// ---------------------------------------------------------------------------

#[test]
fn json_mode_emits_one_object_per_pair() {
    let out = run_with_stdin(&["run", "--format", "json", "--nodes", "8"], "1 2\n2 1\n9 0\n");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    let records: Vec<serde_json::Value> = stdout
        .lines()
        .map(|l| serde_json::from_str(l).expect("each stdout line is JSON"))
        .collect();
    assert_eq!(records.len(), 3);

    assert_eq!(records[0]["origin"], 1);
    assert_eq!(records[0]["destination"], 2);
    assert_eq!(records[0]["outcome"], "accepted");

    assert_eq!(records[1]["outcome"], "rejected_cycle");

    assert_eq!(records[2]["outcome"], "rejected_out_of_range");
    assert_eq!(records[2]["value"], 9);
}

#[test]
fn json_mode_summary_is_structured() {
    let out = run_with_stdin(&["run", "--format", "json"], "1 2\n2 1\n");
    let stderr = String::from_utf8_lossy(&out.stderr);
    let summary: serde_json::Value = stderr
        .lines()
        .last()
        .map(|l| serde_json::from_str(l).expect("summary line is JSON"))
        .expect("summary present");
    assert_eq!(summary["summary"]["accepted"], 1);
    assert_eq!(summary["summary"]["rejected"], 1);
}

// ---------------------------------------------------------------------------
// run: window dump
// ---------------------------------------------------------------------------

#[test]
fn window_dump_shows_the_relation_on_stderr() {
    let out = run_with_stdin(&["run", "--nodes", "8", "--window", "3x3"], "0 1\n");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    // Row 1 has bits for itself and its ancestor 0.
    assert!(stderr.contains("1 0 0\n1 1 0\n0 0 1\n"), "stderr: {stderr}");
}

#[test]
fn window_with_anchor_is_offset() {
    let out = run_with_stdin(&["run", "--nodes", "8", "--window", "2x2+5,5"], "5 6\n");
    assert!(out.status.success());
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("1 0\n1 1\n"), "stderr: {stderr}");
}

#[test]
fn window_past_the_universe_is_exit_2() {
    let out = run_with_stdin(&["run", "--nodes", "8", "--window", "9x9"], "");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("window out of range"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// run: file input
// ---------------------------------------------------------------------------

#[test]
fn file_argument_is_processed_like_stdin() {
    let out = Command::new(cyclegate_bin())
        .args(["run", fixture("chain.links").to_str().expect("path")])
        .output()
        .expect("run cyclegate");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert_eq!(
        stdout,
        "link accepted: 1 -> 2\nlink accepted: 2 -> 3\nlink accepted: 3 -> 4\n"
    );
}

#[test]
fn cycle_attempt_fixture_reports_the_rejection() {
    let out = Command::new(cyclegate_bin())
        .args(["run", fixture("cycle-attempt.links").to_str().expect("path")])
        .output()
        .expect("run cyclegate");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("cycle found: 3 -> 1"), "stdout: {stdout}");
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(
        stderr.contains("3 accepted, 1 rejected"),
        "stderr: {stderr}"
    );
}

#[test]
fn missing_file_is_exit_2() {
    let out = Command::new(cyclegate_bin())
        .args(["run", "/no/such/file.links"])
        .output()
        .expect("run cyclegate");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("file not found"), "stderr: {stderr}");
}

// ---------------------------------------------------------------------------
// run: universe configuration
// ---------------------------------------------------------------------------

#[test]
fn nodes_zero_is_exit_2() {
    let out = run_with_stdin(&["run", "--nodes", "0"], "");
    assert_eq!(out.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("--nodes"), "stderr: {stderr}");
}

#[test]
fn nodes_env_var_sets_the_universe() {
    let mut child = Command::new(cyclegate_bin())
        .args(["run"])
        .env("CYCLEGATE_NODES", "4")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("spawn cyclegate");
    child
        .stdin
        .as_mut()
        .expect("child stdin")
        .write_all(b"5 1\n")
        .expect("write stdin");
    let out = child.wait_with_output().expect("wait for cyclegate");
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("out of range: 5"), "stdout: {stdout}");
    assert!(stdout.contains("0..4"), "stdout: {stdout}");
}

// ---------------------------------------------------------------------------
// version
// ---------------------------------------------------------------------------

#[test]
fn version_flag_prints_the_package_version() {
    let out = Command::new(cyclegate_bin())
        .arg("--version")
        .output()
        .expect("run cyclegate");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("cyclegate"), "stdout: {stdout}");
}
