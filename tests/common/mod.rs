//! Shared helpers for MyPL's end-to-end integration tests.
//!
//! Each test file under `tests/` is compiled as its own crate, so not
//! every helper here is used by every file.
#![allow(dead_code)]

use std::io::Write;
use std::process::Command;

use mypl::driver;

/// Compiles and runs a MyPL program in-process, returning its captured
/// stdout. Panics (failing the test) if any phase errors.
pub fn compile_and_run(source: &str) -> String {
    driver::run_source_capturing(source, "")
        .unwrap_or_else(|e| panic!("expected program to run to completion, got: {e}"))
}

/// Like [`compile_and_run`], but feeds `stdin` to the program's `input()`
/// calls.
pub fn compile_and_run_with_input(source: &str, stdin: &str) -> String {
    driver::run_source_capturing(source, stdin)
        .unwrap_or_else(|e| panic!("expected program to run to completion, got: {e}"))
}

/// Runs `source` through the pipeline and returns the first diagnostic's
/// rendered message, or panics if it ran to completion.
pub fn compile_error(source: &str) -> String {
    match driver::run_source_capturing(source, "") {
        Ok(out) => panic!("expected a pipeline error, got output {out:?}"),
        Err(e) => e.to_string(),
    }
}

/// Path to the `mypl` binary built by cargo for this test run.
pub fn mypl_binary() -> String {
    env!("CARGO_BIN_EXE_mypl").to_string()
}

/// Writes `source` to a temp file named `name.mypl`, runs `mypl run` on
/// it as a real subprocess, and returns (exit code, stdout, stderr).
///
/// Used for the handful of tests that care about process-level behavior
/// spec.md §6 promises: the exit code convention and the CLI's file I/O.
pub fn run_as_subprocess(source: &str, name: &str) -> (i32, String, String) {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join(format!("{name}.mypl"));
    std::fs::File::create(&path)
        .and_then(|mut f| f.write_all(source.as_bytes()))
        .expect("failed to write source fixture");

    let output = Command::new(mypl_binary())
        .arg("run")
        .arg(&path)
        .output()
        .expect("failed to run mypl binary");

    (
        output.status.code().unwrap_or(-1),
        String::from_utf8_lossy(&output.stdout).into_owned(),
        String::from_utf8_lossy(&output.stderr).into_owned(),
    )
}
