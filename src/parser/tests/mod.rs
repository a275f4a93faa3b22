mod expressions;

use crate::ast::Program;
use crate::lexer::Lexer;
use crate::parser::Parser;

pub(super) fn parse(src: &str) -> Program {
    let tokens = Lexer::new(src).tokenize().expect("expected lexing to succeed");
    Parser::new(tokens).parse().expect("expected parsing to succeed")
}

pub(super) fn parse_err(src: &str) -> String {
    let tokens = Lexer::new(src).tokenize().expect("expected lexing to succeed");
    Parser::new(tokens)
        .parse()
        .expect_err("expected parsing to fail")
        .to_string()
}
