//! Whitespace skipping for the lexer.

use super::Lexer;

impl<'a> Lexer<'a> {
    /// Consumes contiguous whitespace characters (spaces, tabs, newlines, CR).
    ///
    /// Comments are *not* skipped here — they are tokenized as
    /// [`crate::token::TokenKind::Comment`] and left for the parser to
    /// filter, matching the reference lexer's behavior.
    pub(super) fn skip_whitespace(&mut self) {
        while let Some(c) = self.current_char() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }
}
