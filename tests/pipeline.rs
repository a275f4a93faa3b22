//! Process-level smoke tests: the `mypl run` CLI, exit codes, and the
//! diagnostic format promised by spec.md §6.

mod common;

use common::run_as_subprocess;

#[test]
fn successful_program_exits_zero_and_writes_stdout() {
    let (code, stdout, stderr) = run_as_subprocess(r#"void main() { print("hello"); }"#, "ok");
    assert_eq!(code, 0);
    assert_eq!(stdout, "hello");
    assert_eq!(stderr, "");
}

#[test]
fn lexer_error_exits_nonzero_with_a_diagnostic() {
    let (code, _stdout, stderr) = run_as_subprocess("void main() { int x = 01; }", "lex_err");
    assert_ne!(code, 0);
    assert!(!stderr.is_empty(), "expected a diagnostic on stderr");
}

#[test]
fn parser_error_exits_nonzero_with_a_diagnostic() {
    let (code, _stdout, stderr) = run_as_subprocess("void main() { return; }", "parse_err");
    assert_ne!(code, 0);
    assert!(!stderr.is_empty(), "expected a diagnostic on stderr");
}

#[test]
fn semantic_error_exits_nonzero() {
    let (code, _stdout, _stderr) =
        run_as_subprocess("void main() { int x = true; }", "sem_err");
    assert_ne!(code, 0);
}

#[test]
fn vm_fault_exits_nonzero() {
    let (code, _stdout, stderr) =
        run_as_subprocess("void main() { print(itos(1 / 0)); }", "vm_err");
    assert_ne!(code, 0);
    assert!(stderr.contains("VM Error"), "stderr: {stderr}");
}

#[test]
fn missing_file_exits_nonzero() {
    use std::process::Command;
    let output = Command::new(common::mypl_binary())
        .arg("run")
        .arg("/nonexistent/path/does-not-exist.mypl")
        .output()
        .expect("failed to run mypl binary");
    assert!(!output.status.success());
}
