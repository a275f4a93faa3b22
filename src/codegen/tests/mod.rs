mod var_table;

use crate::ast::Program;
use crate::codegen::{CodeGenerator, FrameTemplate};
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::semantic::SemanticChecker;

pub(super) fn compile(src: &str) -> Vec<FrameTemplate> {
    let program = parse(src);
    SemanticChecker::check(&program).expect("expected checking to succeed");
    CodeGenerator::generate(&program).expect("expected codegen to succeed")
}

pub(super) fn find<'a>(templates: &'a [FrameTemplate], name: &str) -> &'a FrameTemplate {
    templates
        .iter()
        .find(|t| t.function_name == name)
        .unwrap_or_else(|| panic!("no template named '{name}'"))
}

fn parse(src: &str) -> Program {
    let tokens = Lexer::new(src).tokenize().expect("expected lexing to succeed");
    Parser::new(tokens).parse().expect("expected parsing to succeed")
}
