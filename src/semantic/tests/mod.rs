mod expressions;

use crate::ast::Program;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::semantic::SemanticChecker;

pub(super) fn check(src: &str) -> Program {
    let program = parse(src);
    SemanticChecker::check(&program).expect("expected checking to succeed");
    program
}

pub(super) fn check_err(src: &str) -> String {
    let program = parse(src);
    SemanticChecker::check(&program).expect_err("expected checking to fail").to_string()
}

fn parse(src: &str) -> Program {
    let tokens = Lexer::new(src).tokenize().expect("expected lexing to succeed");
    Parser::new(tokens).parse().expect("expected parsing to succeed")
}
