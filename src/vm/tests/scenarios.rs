//! The six end-to-end scenarios from spec.md §8, run through the full
//! lex → parse → check → codegen → VM pipeline.

use super::run;

#[test]
fn scenario_1_hello_world() {
    assert_eq!(run(r#"void main() { print("hello"); }"#), "hello");
}

#[test]
fn scenario_2_for_loop_sum() {
    let src = r#"
        void main() {
            int s = 0;
            for (int i = 0; i <= 10; i = i + 1) {
                s = s + i;
            }
            print(itos(s));
        }
    "#;
    assert_eq!(run(src), "55");
}

#[test]
fn scenario_3_array_sum() {
    let src = r#"
        void main() {
            array int a = new int[3];
            a[0] = 1;
            a[1] = 2;
            a[2] = 3;
            print(itos(a[0] + a[1] + a[2]));
        }
    "#;
    assert_eq!(run(src), "6");
}

#[test]
fn scenario_4_struct_construction() {
    let src = r#"
        struct P { int x; int y; }
        void main() {
            P p = new P(3, 4);
            print(itos(p.x * p.x + p.y * p.y));
        }
    "#;
    assert_eq!(run(src), "25");
}

#[test]
fn scenario_5_trappable_stoi_failure() {
    let src = r#"
        void main() {
            try {
                int x = stoi("oops");
            } catch {
                print("ERR");
            }
        }
    "#;
    assert_eq!(run(src), "ERR");
}

#[test]
fn scenario_6_trappable_array_oob() {
    let src = r#"
        void main() {
            array int a = new int[2];
            try {
                a[5] = 1;
            } catch {
                print("oob");
            }
        }
    "#;
    assert_eq!(run(src), "oob");
}
