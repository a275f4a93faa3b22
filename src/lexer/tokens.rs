//! Token recognition rules: symbols, literals, identifiers and keywords.

use crate::token::{Span, Token, TokenKind};

use super::error::LexError;
use super::Lexer;

impl<'a> Lexer<'a> {
    /// Reads a `//`-to-end-of-line comment and returns it as a `Comment` token.
    ///
    /// The lexeme excludes the leading `//` but keeps the remaining text
    /// verbatim (no trimming), matching the reference lexer's behavior.
    pub(super) fn lex_comment(&mut self) -> Token {
        let span = self.start_span();
        self.advance(); // consume first '/'
        self.advance(); // consume second '/'
        let start = self.pos;
        while let Some(c) = self.current_char() {
            if c == '\n' {
                break;
            }
            self.advance();
        }
        let text = self.input[start..self.pos].to_string();
        Token::new(TokenKind::Comment, text, span)
    }

    /// Reads a double-quoted string literal.
    ///
    /// Escape sequences are left in their raw two-character form (`\n`,
    /// `\t`) — decoding happens in [`crate::codegen`].
    pub(super) fn lex_string(&mut self) -> Result<Token, LexError> {
        let span = self.start_span();
        self.advance(); // consume opening '"'
        let start = self.pos;
        loop {
            match self.current_char() {
                None => return Err(LexError::unterminated_string(span)),
                Some('"') => break,
                Some('\n') => return Err(LexError::unterminated_string(span)),
                Some('\\') => {
                    self.advance();
                    if self.current_char().is_none() {
                        return Err(LexError::unterminated_string(span));
                    }
                    self.advance();
                }
                Some(_) => self.advance(),
            }
        }
        let text = self.input[start..self.pos].to_string();
        self.advance(); // consume closing '"'
        Ok(Token::new(TokenKind::StringVal, text, span))
    }

    /// Reads an integer or double literal.
    ///
    /// Integers may not have a leading zero unless the literal is exactly
    /// `0`; a `.` in a double literal must be followed by at least one
    /// digit.
    pub(super) fn lex_number(&mut self) -> Result<Token, LexError> {
        let span = self.start_span();
        let start = self.pos;

        let leads_with_zero = self.current_char() == Some('0');
        while matches!(self.current_char(), Some(c) if c.is_ascii_digit()) {
            self.advance();
        }

        let int_len = self.pos - start;
        if leads_with_zero && int_len > 1 {
            return Err(LexError::leading_zero(span));
        }

        if self.current_char() == Some('.') {
            self.advance();
            if !matches!(self.current_char(), Some(c) if c.is_ascii_digit()) {
                return Err(LexError::malformed_double(span));
            }
            while matches!(self.current_char(), Some(c) if c.is_ascii_digit()) {
                self.advance();
            }
            let text = self.input[start..self.pos].to_string();
            return Ok(Token::new(TokenKind::DoubleVal, text, span));
        }

        let text = self.input[start..self.pos].to_string();
        Ok(Token::new(TokenKind::IntVal, text, span))
    }

    /// Reads an identifier and classifies it as a keyword or plain `Id`.
    pub(super) fn lex_identifier_or_keyword(&mut self) -> Token {
        let span = self.start_span();
        let start = self.pos;
        while matches!(self.current_char(), Some(c) if c.is_alphanumeric() || c == '_') {
            self.advance();
        }
        let text = &self.input[start..self.pos];
        let kind = TokenKind::keyword(text).unwrap_or(TokenKind::Id);
        Token::new(kind, text, span)
    }

    /// Reads punctuation and operators, including the two-character forms
    /// `==`, `!=`, `<=`, `>=`.
    pub(super) fn lex_symbol(&mut self) -> Result<Token, LexError> {
        let span = self.start_span();
        let c = self.current_char().expect("lex_symbol called at EOF");
        self.advance();

        let two_char = |lexer: &mut Self, second: char, kind: TokenKind, lexeme: &str| {
            if lexer.current_char() == Some(second) {
                lexer.advance();
                Some(Token::new(kind, lexeme, span))
            } else {
                None
            }
        };

        let single = |kind: TokenKind, lexeme: &str| Token::new(kind, lexeme, span);

        Ok(match c {
            '.' => single(TokenKind::Dot, "."),
            ',' => single(TokenKind::Comma, ","),
            '(' => single(TokenKind::LParen, "("),
            ')' => single(TokenKind::RParen, ")"),
            '{' => single(TokenKind::LBrace, "{"),
            '}' => single(TokenKind::RBrace, "}"),
            ';' => single(TokenKind::Semicolon, ";"),
            '[' => single(TokenKind::LBracket, "["),
            ']' => single(TokenKind::RBracket, "]"),
            '*' => single(TokenKind::Times, "*"),
            '/' => single(TokenKind::Divide, "/"),
            '+' => single(TokenKind::Plus, "+"),
            '-' => single(TokenKind::Minus, "-"),
            '=' => two_char(self, '=', TokenKind::Equal, "==")
                .unwrap_or_else(|| single(TokenKind::Assign, "=")),
            '<' => two_char(self, '=', TokenKind::LessEq, "<=")
                .unwrap_or_else(|| single(TokenKind::Less, "<")),
            '>' => two_char(self, '=', TokenKind::GreaterEq, ">=")
                .unwrap_or_else(|| single(TokenKind::Greater, ">")),
            '!' => {
                if self.current_char() == Some('=') {
                    self.advance();
                    Token::new(TokenKind::NotEqual, "!=", span)
                } else {
                    return Err(LexError::unexpected_character('!', span));
                }
            }
            other => return Err(LexError::unexpected_character(other, span)),
        })
    }

    pub(super) fn start_span(&self) -> Span {
        Span::new(self.pos, self.line, self.column)
    }
}
