//! Hand-written lexer turning MyPL source text into a [`Token`] stream.
//!
//! # Module Structure
//!
//! - [`cursor`] — byte-position tracking and character advance
//! - [`skip`] — whitespace skipping
//! - [`tokens`] — the actual token-recognition rules
//! - [`error`] — [`LexError`]
//!
//! Comments are tokenized as [`TokenKind::Comment`] rather than discarded;
//! [`crate::parser`] is responsible for filtering them out of the stream it
//! consumes, so a comment can legally appear anywhere whitespace can.

mod cursor;
mod error;
mod skip;
mod tokens;

pub use error::LexError;

use crate::token::{Token, TokenKind};

/// Tokenizes MyPL source text one token at a time.
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            pos: 0,
            line: 1,
            column: 1,
        }
    }

    /// Produces the next token, or `None` once the end of the stream has
    /// been reported via a single [`TokenKind::Eos`] token.
    ///
    /// Returns `Ok(None)` only after the `Eos` token has already been
    /// handed back once; callers that want every token including `Eos`
    /// should prefer [`Lexer::tokenize`].
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        self.skip_whitespace();

        let span = self.start_span();
        let Some(c) = self.current_char() else {
            return Ok(Token::new(TokenKind::Eos, "", span));
        };

        if c == '/' && self.peek_char() == Some('/') {
            return Ok(self.lex_comment());
        }
        if c == '"' {
            return self.lex_string();
        }
        if c.is_ascii_digit() {
            return self.lex_number();
        }
        if c.is_alphabetic() {
            return Ok(self.lex_identifier_or_keyword());
        }
        self.lex_symbol()
    }

    /// Tokenizes the entire input, including the trailing [`TokenKind::Eos`].
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let tok = self.next_token()?;
            let is_eos = tok.kind == TokenKind::Eos;
            tokens.push(tok);
            if is_eos {
                break;
            }
        }
        Ok(tokens)
    }
}

#[cfg(test)]
mod tests;
