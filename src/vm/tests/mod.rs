mod calls;
mod scenarios;

use crate::driver;

/// Compiles and runs `src`, feeding it no stdin, and returns whatever it
/// wrote to "stdout".
pub(super) fn run(src: &str) -> String {
    run_with_input(src, "")
}

pub(super) fn run_with_input(src: &str, stdin: &str) -> String {
    driver::run_source_capturing(src, stdin)
        .unwrap_or_else(|e| panic!("expected program to run to completion, got: {e}"))
}

/// Compiles and runs `src`, expecting a fatal VM error, and returns its
/// message text.
pub(super) fn run_err(src: &str) -> String {
    match driver::run_source_capturing(src, "") {
        Ok(out) => panic!("expected a VM error, program ran to completion with output {out:?}"),
        Err(e) => e.to_string(),
    }
}
