mod comments;
mod numbers;
mod whitespace;

use crate::lexer::Lexer;
use crate::token::{Token, TokenKind};

/// Tokenizes `src` and drops the trailing `Eos` token, for tests that only
/// care about the "real" tokens.
pub(super) fn lex(src: &str) -> Vec<Token> {
    let mut toks = Lexer::new(src).tokenize().expect("expected lexing to succeed");
    assert_eq!(toks.pop().unwrap().kind, TokenKind::Eos);
    toks
}

pub(super) fn kinds(src: &str) -> Vec<TokenKind> {
    lex(src).into_iter().map(|t| t.kind).collect()
}
