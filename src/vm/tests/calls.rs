//! User-defined function calls (spec §4.5 `CALL`/`RET`): argument order,
//! recursion, and multiple parameters.

use super::run;

#[test]
fn call_passes_arguments_in_declaration_order() {
    let src = r#"
        int sub(int a, int b) {
            return a - b;
        }
        void main() {
            print(itos(sub(10, 3)));
        }
    "#;
    assert_eq!(run(src), "7");
}

#[test]
fn recursive_call_computes_factorial() {
    let src = r#"
        int fact(int n) {
            if (n <= 1) {
                return 1;
            }
            return n * fact(n - 1);
        }
        void main() {
            print(itos(fact(5)));
        }
    "#;
    assert_eq!(run(src), "120");
}

#[test]
fn void_function_with_no_explicit_return_is_fine() {
    let src = r#"
        void greet() {
            print("hi");
        }
        void main() {
            greet();
        }
    "#;
    assert_eq!(run(src), "hi");
}

#[test]
fn struct_argument_is_passed_by_reference() {
    let src = r#"
        struct Box { int v; }
        void bump(Box b) {
            b.v = b.v + 1;
        }
        void main() {
            Box box = new Box(1);
            bump(box);
            print(itos(box.v));
        }
    "#;
    assert_eq!(run(src), "2");
}
