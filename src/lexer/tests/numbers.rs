use super::lex;
use crate::token::TokenKind;

#[test]
fn lexes_plain_integer() {
    let toks = lex("42");
    assert_eq!(toks[0].kind, TokenKind::IntVal);
    assert_eq!(toks[0].lexeme, "42");
}

#[test]
fn lexes_zero() {
    let toks = lex("0");
    assert_eq!(toks[0].kind, TokenKind::IntVal);
    assert_eq!(toks[0].lexeme, "0");
}

#[test]
fn lexes_double() {
    let toks = lex("3.14");
    assert_eq!(toks[0].kind, TokenKind::DoubleVal);
    assert_eq!(toks[0].lexeme, "3.14");
}

#[test]
fn leading_zero_is_an_error() {
    let err = crate::lexer::Lexer::new("007").tokenize().unwrap_err();
    assert!(err.message.contains("leading zero"));
}

#[test]
fn dot_without_following_digit_is_an_error() {
    let err = crate::lexer::Lexer::new("3.").tokenize().unwrap_err();
    assert!(err.message.contains("double literal"));
}

#[test]
fn integer_followed_by_dot_method_like_access_still_errors_without_digit() {
    // MyPL has no float-free member access syntax that starts with a digit,
    // so `1.foo` is rejected at the malformed-double stage rather than
    // being split into `1`, `.`, `foo`.
    let err = crate::lexer::Lexer::new("1.foo").tokenize().unwrap_err();
    assert!(err.message.contains("double literal"));
}
