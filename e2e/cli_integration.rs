// e2e/cli_integration.rs — CLI integration tests
//
// Tests the `corebox` binary as a black-box multi-call tool using
// std::process::Command. Covers suite dispatch, alias dispatch, argument
// parsing, per-file error recovery, output ordering, and exit codes.

use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

/// Locate the `corebox` binary produced by Cargo.
fn corebox_bin() -> PathBuf {
    // CARGO_BIN_EXE_corebox is set by Cargo when running integration tests.
    // Fall back to walking up from the test binary location.
    if let Ok(p) = std::env::var("CARGO_BIN_EXE_corebox") {
        return PathBuf::from(p);
    }
    let mut p = std::env::current_exe().unwrap();
    p.pop(); // remove test binary filename
    if p.ends_with("deps") {
        p.pop();
    }
    p.push("corebox");
    p
}

/// Deterministic binary payload of `len` bytes (covers non-UTF-8 values).
fn patterned(len: usize) -> Vec<u8> {
    (0..len).map(|i| (i % 251) as u8).collect()
}

fn write_file(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// ── cat: concatenation ───────────────────────────────────────────────────────

#[test]
fn cat_streams_a_single_file() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "input.txt", b"Hello, corebox!\n");

    let output = Command::new(corebox_bin())
        .args(["cat", input.to_str().unwrap()])
        .output()
        .expect("failed to run corebox cat");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"Hello, corebox!\n");
    assert!(output.stderr.is_empty());
}

#[test]
fn cat_concatenates_in_argument_order() {
    // The middle file straddles several 1024-byte chunks; byte order must be
    // file order regardless of size.
    let dir = TempDir::new().unwrap();
    let a = write_file(&dir, "a.bin", b"alpha");
    let big = patterned(5000);
    let b = write_file(&dir, "b.bin", &big);
    let c = write_file(&dir, "c.bin", b"gamma");

    let output = Command::new(corebox_bin())
        .args([
            "cat",
            a.to_str().unwrap(),
            b.to_str().unwrap(),
            c.to_str().unwrap(),
        ])
        .output()
        .expect("failed to run corebox cat");
    assert!(output.status.success());

    let mut expected = b"alpha".to_vec();
    expected.extend_from_slice(&big);
    expected.extend_from_slice(b"gamma");
    assert_eq!(output.stdout, expected);
}

#[test]
fn cat_with_no_files_emits_nothing_and_succeeds() {
    let output = Command::new(corebox_bin())
        .arg("cat")
        .output()
        .expect("failed to run corebox cat");
    assert!(output.status.success());
    assert!(output.stdout.is_empty());
    assert!(output.stderr.is_empty());
}

#[test]
fn cat_repeats_a_duplicated_path() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "twice.txt", b"ab");

    let output = Command::new(corebox_bin())
        .args(["cat", input.to_str().unwrap(), input.to_str().unwrap()])
        .output()
        .expect("failed to run corebox cat");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"abab");
}

// ── cat: per-file error recovery ─────────────────────────────────────────────

#[test]
fn cat_reports_missing_file_and_continues() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");
    let good = write_file(&dir, "good.txt", b"still here");

    let output = Command::new(corebox_bin())
        .args(["cat", missing.to_str().unwrap(), good.to_str().unwrap()])
        .output()
        .expect("failed to run corebox cat");

    // Per-file failures are diagnostics, not a failure exit.
    assert!(output.status.success());
    assert_eq!(output.stdout, b"still here");

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_eq!(stderr.lines().count(), 1, "stderr: {stderr}");
    assert!(stderr.contains("cat: failed to open"), "stderr: {stderr}");
    assert!(stderr.contains("missing.txt"), "stderr: {stderr}");
}

// ── cat: usage errors ────────────────────────────────────────────────────────

#[test]
fn cat_unknown_long_option_is_a_usage_error() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "input.txt", b"never printed");

    let output = Command::new(corebox_bin())
        .args(["cat", "-n", "--bogus", input.to_str().unwrap()])
        .output()
        .expect("failed to run corebox cat");
    assert!(!output.status.success());
    assert!(output.stdout.is_empty(), "usage errors precede any file I/O");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("--bogus"), "stderr: {stderr}");
}

#[test]
fn cat_unknown_short_flag_names_the_character() {
    let output = Command::new(corebox_bin())
        .args(["cat", "-nz"])
        .output()
        .expect("failed to run corebox cat");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("-z"), "stderr: {stderr}");
}

#[test]
fn cat_numbering_flag_leaves_output_unchanged() {
    let dir = TempDir::new().unwrap();
    let input = write_file(&dir, "lines.txt", b"one\ntwo\n");

    let output = Command::new(corebox_bin())
        .args(["cat", "-n", input.to_str().unwrap()])
        .output()
        .expect("failed to run corebox cat");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"one\ntwo\n");
}

// ── cat: help / version precedence ───────────────────────────────────────────

#[test]
fn cat_help_short_circuits_file_processing() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.txt");

    let output = Command::new(corebox_bin())
        .args(["cat", "--help", missing.to_str().unwrap()])
        .output()
        .expect("failed to run corebox cat");
    assert!(output.status.success());
    assert!(output.stderr.is_empty(), "no diagnostic: the copy loop never ran");
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout: {stdout}");
    assert!(stdout.contains("[FILE]"), "stdout: {stdout}");
}

#[test]
fn cat_version_prints_the_banner() {
    let output = Command::new(corebox_bin())
        .args(["cat", "--version"])
        .output()
        .expect("failed to run corebox cat");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("corebox"), "stdout: {stdout}");
    assert!(stdout.contains("v0.1.0"), "stdout: {stdout}");
}

// ── suite dispatch ───────────────────────────────────────────────────────────

#[test]
fn suite_help_lists_commands() {
    let output = Command::new(corebox_bin())
        .arg("--help")
        .output()
        .expect("failed to run corebox");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("cat"), "stdout: {stdout}");
}

#[test]
fn suite_bare_invocation_fails_with_usage() {
    let output = Command::new(corebox_bin())
        .output()
        .expect("failed to run corebox");
    assert!(!output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "stdout: {stdout}");
}

#[test]
fn suite_unknown_command_fails() {
    let output = Command::new(corebox_bin())
        .arg("frobnicate")
        .output()
        .expect("failed to run corebox");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("frobnicate"), "stderr: {stderr}");
}

// ── multi-call alias dispatch ────────────────────────────────────────────────

#[test]
fn binary_installed_as_cat_dispatches_to_cat() {
    let dir = TempDir::new().unwrap();
    let alias = dir.path().join("cat");
    fs::copy(corebox_bin(), &alias).unwrap();
    let input = write_file(&dir, "input.txt", b"via alias");

    let output = Command::new(&alias)
        .arg(input.to_str().unwrap())
        .output()
        .expect("failed to run cat alias");
    assert!(output.status.success());
    assert_eq!(output.stdout, b"via alias");
}
