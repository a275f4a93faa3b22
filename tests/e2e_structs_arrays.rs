//! Struct and array end-to-end scenarios, run through the full pipeline.

mod common;

use common::compile_and_run;

#[test]
fn struct_with_multiple_fields() {
    let src = r#"
        struct Point { int x; int y; }
        void main() {
            Point p = new Point(3, 4);
            print(itos(p.x * p.x + p.y * p.y));
        }
    "#;
    assert_eq!(compile_and_run(src), "25");
}

#[test]
fn function_returning_a_struct() {
    let src = r#"
        struct Point { int x; int y; }
        Point origin() {
            return new Point(0, 0);
        }
        void main() {
            Point p = origin();
            print(itos(p.x));
            print(itos(p.y));
        }
    "#;
    assert_eq!(compile_and_run(src), "00");
}

#[test]
fn array_loop_sum_with_length() {
    let src = r#"
        void main() {
            array int a = new int[5];
            for (int i = 0; i < length(a); i = i + 1) {
                a[i] = i * 2;
            }
            int sum = 0;
            for (int i = 0; i < length(a); i = i + 1) {
                sum = sum + a[i];
            }
            print(itos(sum));
        }
    "#;
    assert_eq!(compile_and_run(src), "20");
}

#[test]
fn empty_struct_is_legal() {
    let src = r#"
        struct Empty { }
        void main() {
            Empty e = new Empty();
            print("ok");
        }
    "#;
    assert_eq!(compile_and_run(src), "ok");
}

#[test]
fn struct_field_default_is_null_before_assignment() {
    let src = r#"
        struct Holder { string s; }
        void main() {
            Holder h = new Holder(null);
            if (h.s == null) {
                print("null-field");
            }
        }
    "#;
    assert_eq!(compile_and_run(src), "null-field");
}
