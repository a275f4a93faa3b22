//! Pretty-printed diagnostics for every MyPL error kind.
//!
//! Grounded in the reference compiler's `report_error`: build an
//! [`ariadne`] report over the offending span and print it to stderr.
//! `VmError` has no source span (spec §7: positions are erased from
//! compiled templates by the time the VM runs), so it falls back to its
//! plain [`std::fmt::Display`] rendering instead.

use ariadne::{Color, Label, Report, ReportKind, Source};

use crate::codegen::CodegenError;
use crate::lexer::LexError;
use crate::parser::ParseError;
use crate::semantic::SemanticError;
use crate::token::Span;
use crate::vm::VmError;

/// An error from any phase of the pipeline, unified for reporting.
pub enum Diagnostic {
    Lex(LexError),
    Parse(ParseError),
    Semantic(SemanticError),
    Codegen(CodegenError),
    Vm(VmError),
}

impl From<CodegenError> for Diagnostic {
    fn from(e: CodegenError) -> Self {
        Diagnostic::Codegen(e)
    }
}

impl From<LexError> for Diagnostic {
    fn from(e: LexError) -> Self {
        Diagnostic::Lex(e)
    }
}

impl From<ParseError> for Diagnostic {
    fn from(e: ParseError) -> Self {
        Diagnostic::Parse(e)
    }
}

impl From<SemanticError> for Diagnostic {
    fn from(e: SemanticError) -> Self {
        Diagnostic::Semantic(e)
    }
}

impl From<VmError> for Diagnostic {
    fn from(e: VmError) -> Self {
        Diagnostic::Vm(e)
    }
}

/// Prints `error` to stderr, using `filename`/`source` to render a
/// source-highlighted `ariadne` report wherever a span is available.
pub fn report(filename: &str, source: &str, error: &Diagnostic) {
    let spanned = match error {
        Diagnostic::Lex(e) => Some((e.message.as_str(), e.span)),
        Diagnostic::Parse(e) => Some((e.message.as_str(), e.span)),
        Diagnostic::Semantic(e) => e.span.map(|span| (e.message.as_str(), span)),
        Diagnostic::Codegen(_) | Diagnostic::Vm(_) => None,
    };

    let Some((message, span)) = spanned else {
        eprintln!("{error}");
        return;
    };

    let range = byte_range(source, span);
    Report::build(ReportKind::Error, (filename, range.clone()))
        .with_message(message)
        .with_label(
            Label::new((filename, range))
                .with_message(message)
                .with_color(Color::Red),
        )
        .finish()
        .eprint((filename, Source::from(source)))
        .ok();
}

/// `ariadne` wants a byte range; MyPL tokens only carry a start offset, so
/// the range runs to the next character boundary (or the end of the file
/// for a token at EOF).
fn byte_range(source: &str, span: Span) -> std::ops::Range<usize> {
    let start = span.offset.min(source.len());
    let end = source[start..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| start + i)
        .unwrap_or(source.len());
    start..end
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Diagnostic::Lex(e) => write!(f, "{e}"),
            Diagnostic::Parse(e) => write!(f, "{e}"),
            Diagnostic::Semantic(e) => write!(f, "{e}"),
            Diagnostic::Codegen(e) => write!(f, "{e}"),
            Diagnostic::Vm(e) => write!(f, "{e}"),
        }
    }
}
