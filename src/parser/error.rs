//! Parse error type.

use crate::token::{Span, Token};

/// An error raised while parsing a token stream into an AST.
///
/// Carries the message and the location of the offending token, matching
/// the diagnostic convention shared by every MyPL error kind.
#[derive(Debug)]
pub struct ParseError {
    pub message: String,
    pub span: Span,
}

impl ParseError {
    pub(super) fn new(message: impl Into<String>, span: Span) -> Self {
        ParseError {
            message: message.into(),
            span,
        }
    }

    pub(super) fn unexpected(expected: &str, found: &Token) -> Self {
        ParseError::new(
            format!(
                "expected {expected}, found {} \"{}\"",
                found.kind.describe(),
                found.lexeme
            ),
            found.span,
        )
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Parser Error: {} at line {}, column {}",
            self.message, self.span.line, self.span.column
        )
    }
}

impl std::error::Error for ParseError {}
