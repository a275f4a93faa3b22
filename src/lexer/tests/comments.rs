use super::{kinds, lex};
use crate::token::TokenKind::*;

#[test]
fn comment_is_tokenized_not_discarded() {
    let toks = lex("// a comment\nx");
    assert_eq!(toks[0].kind, Comment);
    assert_eq!(toks[0].lexeme, " a comment");
    assert_eq!(toks[1].kind, Id);
}

#[test]
fn comment_runs_to_end_of_input_with_no_trailing_newline() {
    let toks = lex("x // trailing");
    assert_eq!(kinds("x // trailing"), vec![Id, Comment]);
    assert_eq!(toks[1].lexeme, " trailing");
}

#[test]
fn comment_does_not_swallow_the_newline() {
    let toks = lex("//c\n1");
    assert_eq!(toks[0].kind, Comment);
    assert_eq!(toks[1].kind, IntVal);
}

#[test]
fn single_slash_is_divide_not_a_comment_start() {
    assert_eq!(kinds("1 / 2"), vec![IntVal, Divide, IntVal]);
}
