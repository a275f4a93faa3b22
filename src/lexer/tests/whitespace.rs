use super::kinds;
use crate::lexer::Lexer;
use crate::token::TokenKind::*;

#[test]
fn whitespace_between_tokens_is_skipped() {
    assert_eq!(kinds("  1   +\t2  \n "), vec![IntVal, Plus, IntVal]);
}

#[test]
fn empty_input_yields_only_eos() {
    let toks = Lexer::new("").tokenize().unwrap();
    assert_eq!(toks.len(), 1);
    assert_eq!(toks[0].kind, Eos);
}

#[test]
fn line_and_column_tracking_across_newlines() {
    let toks = Lexer::new("1\n  22").tokenize().unwrap();
    assert_eq!(toks[0].span.line, 1);
    assert_eq!(toks[0].span.column, 1);
    assert_eq!(toks[1].span.line, 2);
    assert_eq!(toks[1].span.column, 3);
}
