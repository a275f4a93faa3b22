use crate::ast::{RValue, Stmt, Term};

use super::{parse, parse_err};

fn expr_of(src: &str) -> crate::ast::Expr {
    let program = parse(&format!("void main() {{ return {src}; }}"));
    let Stmt::Return(ret) = program.funs.into_iter().next().unwrap().body.into_iter().next().unwrap() else {
        panic!("expected a return statement");
    };
    ret.expr
}

#[test]
fn parses_simple_literal() {
    let e = expr_of("5");
    assert!(!e.not_op);
    assert!(e.op.is_none());
    assert!(matches!(e.first, Term::Simple(RValue::Simple(_))));
}

#[test]
fn parses_negated_expr() {
    let e = expr_of("not true");
    assert!(e.not_op);
}

#[test]
fn parses_binary_expr_as_flat_chain() {
    let e = expr_of("1 + 2 + 3");
    assert!(e.op.is_some());
    let rest = e.rest.expect("expected a rest expr");
    // Right-leaning: "1 + (2 + 3)", never a nested Term on the left.
    assert!(rest.op.is_some());
}

#[test]
fn parses_parenthesized_term() {
    let e = expr_of("(1 + 2)");
    assert!(matches!(e.first, Term::Complex(_)));
}

#[test]
fn parses_new_array() {
    let e = expr_of("new int[5]");
    let Term::Simple(RValue::New(new_val)) = e.first else {
        panic!("expected a New rvalue");
    };
    assert!(new_val.is_array());
}

#[test]
fn parses_new_struct() {
    let e = expr_of("new Point(1, 2)");
    let Term::Simple(RValue::New(new_val)) = e.first else {
        panic!("expected a New rvalue");
    };
    assert!(!new_val.is_array());
    assert_eq!(new_val.struct_params.unwrap().len(), 2);
}

#[test]
fn parses_call_expr() {
    let e = expr_of("length(s)");
    assert!(matches!(e.first, Term::Simple(RValue::Call(_))));
}

#[test]
fn parses_var_path_with_index() {
    let e = expr_of("items[0]");
    let Term::Simple(RValue::Var(path)) = e.first else {
        panic!("expected a Var rvalue");
    };
    assert_eq!(path.len(), 1);
    assert!(path[0].array_index.is_some());
}

#[test]
fn parses_dotted_var_path() {
    let e = expr_of("p.x");
    let Term::Simple(RValue::Var(path)) = e.first else {
        panic!("expected a Var rvalue");
    };
    assert_eq!(path.len(), 2);
}

#[test]
fn missing_closing_paren_is_an_error() {
    let msg = parse_err("void main() { return (1 + 2; }");
    assert!(msg.contains("Parser Error"), "{msg}");
}
