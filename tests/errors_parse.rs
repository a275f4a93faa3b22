//! Parser error scenarios (spec.md §7, §8).

mod common;

use common::compile_error;

#[test]
fn bare_return_with_no_expression_is_a_parse_error() {
    let msg = compile_error("void main() { return; }");
    assert!(msg.starts_with("Parser Error:"), "got: {msg}");
    assert!(msg.contains("\";\""), "expected the offending lexeme, got: {msg}");
}

#[test]
fn else_before_elseif_is_a_parse_error() {
    let src = r#"
        void main() {
            if (true) { } else { } elseif (false) { }
        }
    "#;
    let msg = compile_error(src);
    assert!(msg.starts_with("Parser Error:"), "got: {msg}");
}

#[test]
fn missing_closing_brace_is_a_parse_error() {
    let msg = compile_error("void main() { print(\"hi\");");
    assert!(msg.starts_with("Parser Error:"), "got: {msg}");
}

#[test]
fn try_without_catch_is_a_parse_error() {
    let src = r#"
        void main() {
            try { print("hi"); }
        }
    "#;
    let msg = compile_error(src);
    assert!(msg.starts_with("Parser Error:"), "got: {msg}");
}

#[test]
fn struct_missing_name_is_a_parse_error() {
    let msg = compile_error("struct { int x; }");
    assert!(msg.starts_with("Parser Error:"), "got: {msg}");
    assert!(msg.contains("\"{\""), "expected the offending lexeme, got: {msg}");
}
