//! Wires the pipeline's phases together: lex, parse, check, generate, run.
//!
//! Shared by the CLI binary and the root-level integration tests so both
//! exercise the exact same sequencing.

use log::{debug, info};

use crate::ast::Program;
use crate::codegen::{CodeGenerator, FrameTemplate};
use crate::diagnostics::Diagnostic;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::semantic::SemanticChecker;
use crate::vm::Vm;

/// Runs every phase up to and including code generation, stopping short
/// of execution. Used by tests that only want to assert on compiled
/// output, and by [`run_source`] itself.
pub fn compile(source: &str) -> Result<Vec<FrameTemplate>, Diagnostic> {
    info!("lexing ({} bytes)", source.len());
    let tokens = Lexer::new(source).tokenize()?;
    debug!("lexed {} tokens", tokens.len());

    info!("parsing");
    let program: Program = Parser::new(tokens).parse()?;
    debug!("parsed {} structs, {} functions", program.structs.len(), program.funs.len());

    info!("checking");
    SemanticChecker::check(&program)?;

    info!("generating bytecode");
    let templates = CodeGenerator::generate(&program)?;
    debug!("generated {} frame templates", templates.len());

    Ok(templates)
}

/// Compiles `source` and runs it to completion against the process's
/// standard streams.
pub fn run_source(source: &str, trace: bool) -> Result<(), Diagnostic> {
    let templates = compile(source)?;
    let mut vm = Vm::new(templates);
    info!("running");
    if trace {
        vm.dump_templates().lines().for_each(|line| debug!("{line}"));
        vm.run_with_trace()?;
    } else {
        vm.run()?;
    }
    Ok(())
}

/// Compiles and runs `source` against in-memory buffers, returning
/// whatever it wrote to "stdout" as a `String`. `stdin` feeds `READ`.
///
/// Used by integration tests that want to assert on a program's output
/// without going through the process's real standard streams.
pub fn run_source_capturing(source: &str, stdin: &str) -> Result<String, Diagnostic> {
    let templates = compile(source)?;
    let mut vm = Vm::new(templates);
    let mut input = std::io::Cursor::new(stdin.as_bytes());
    let mut output = Vec::new();
    vm.run_io(&mut input, &mut output)?;
    Ok(String::from_utf8_lossy(&output).into_owned())
}
