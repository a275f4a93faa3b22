//! Runtime fault scenarios (spec.md §7's `VMError`, §8).
//!
//! Division by zero and other non-coercion/non-bounds faults are fatal
//! even inside a `try`, so each of these terminates the program.

mod common;

use common::compile_error;

#[test]
fn division_by_zero_is_a_fatal_vm_error() {
    let msg = compile_error("void main() { int x = 1 / 0; }");
    assert!(msg.starts_with("VM Error:"), "got: {msg}");
}

#[test]
fn division_by_zero_inside_a_try_is_still_fatal() {
    let src = r#"
        void main() {
            try {
                int x = 1 / 0;
            } catch {
                print("unreachable");
            }
        }
    "#;
    let msg = compile_error(src);
    assert!(msg.starts_with("VM Error:"), "got: {msg}");
}

#[test]
fn array_index_out_of_bounds_uncaught_is_fatal() {
    let src = r#"
        void main() {
            array int a = new int[2];
            int x = a[5];
        }
    "#;
    let msg = compile_error(src);
    assert!(msg.starts_with("VM Error:"), "got: {msg}");
}

#[test]
fn array_index_out_of_bounds_is_trappable() {
    let src = r#"
        void main() {
            array int a = new int[2];
            try {
                int x = a[5];
            } catch {
                print("caught");
            }
        }
    "#;
    assert_eq!(common::compile_and_run(src), "caught");
}

#[test]
fn negative_array_index_is_fatal_when_uncaught() {
    let src = r#"
        void main() {
            array int a = new int[2];
            int x = a[0 - 1];
        }
    "#;
    let msg = compile_error(src);
    assert!(msg.starts_with("VM Error:"), "got: {msg}");
}

#[test]
fn vm_error_message_names_the_trapping_function() {
    let msg = compile_error("void main() { int x = 1 / 0; }");
    assert!(msg.contains("'main'"), "got: {msg}");
}

#[test]
fn stoi_on_garbage_uncaught_is_fatal() {
    let msg = compile_error(r#"void main() { int x = stoi("not a number"); }"#);
    assert!(msg.starts_with("VM Error:"), "got: {msg}");
}
