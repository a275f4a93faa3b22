//! Expression parsing.
//!
//! Builds the flat, right-leaning `Expr` chain the spec mandates — no
//! precedence climbing. See [`crate::ast::expr`] for why.

use crate::ast::{CallExpr, Expr, NewRValue, RValue, Term, VarRef};
use crate::token::{Token, TokenKind};

use super::error::ParseError;
use super::Parser;

fn is_bin_op(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Times
            | TokenKind::Divide
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Equal
            | TokenKind::NotEqual
            | TokenKind::Less
            | TokenKind::Greater
            | TokenKind::LessEq
            | TokenKind::GreaterEq
    )
}

fn is_literal(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::IntVal | TokenKind::DoubleVal | TokenKind::StringVal | TokenKind::BoolVal | TokenKind::NullVal
    )
}

impl Parser {
    /// `'not'? Primary (BinOp Expr)?`
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        let not_op = if self.check(TokenKind::Not) {
            self.advance();
            true
        } else {
            false
        };

        let first = self.parse_term()?;

        if is_bin_op(self.current_kind()) {
            let op = self.advance();
            let rest = self.parse_expr()?;
            Ok(Expr::binary(not_op, first, op, rest))
        } else {
            Ok(Expr {
                not_op,
                first,
                op: None,
                rest: None,
            })
        }
    }

    /// `'(' Expr ')' | RValue`
    fn parse_term(&mut self) -> Result<Term, ParseError> {
        if self.check(TokenKind::LParen) {
            self.advance();
            let inner = self.parse_expr()?;
            self.expect(TokenKind::RParen)?;
            Ok(Term::Complex(Box::new(inner)))
        } else {
            Ok(Term::Simple(self.parse_rvalue()?))
        }
    }

    /// `Literal | 'null' | 'new' NewTail | ID (CallTail | VarTail)`
    fn parse_rvalue(&mut self) -> Result<RValue, ParseError> {
        if is_literal(self.current_kind()) {
            return Ok(RValue::Simple(self.advance()));
        }
        if self.check(TokenKind::New) {
            self.advance();
            return self.parse_new_tail();
        }
        if self.check(TokenKind::Id) {
            let name = self.advance();
            if self.check(TokenKind::LParen) {
                let args = self.parse_call_tail()?;
                return Ok(RValue::Call(CallExpr { name, args }));
            }
            let path = self.parse_var_tail(name)?;
            return Ok(RValue::Var(path));
        }
        Err(ParseError::unexpected("an expression", self.current()))
    }

    /// `BaseType '[' Expr ']' | ID '(' Args? ')' | ID '[' Expr ']'`
    fn parse_new_tail(&mut self) -> Result<RValue, ParseError> {
        if self.current_kind().is_base_type() {
            let type_name = self.advance();
            self.expect(TokenKind::LBracket)?;
            let size = self.parse_expr()?;
            self.expect(TokenKind::RBracket)?;
            return Ok(RValue::New(NewRValue::array(type_name, size)));
        }
        if self.check(TokenKind::Id) {
            let type_name = self.advance();
            if self.check(TokenKind::LParen) {
                let args = self.parse_call_tail()?;
                return Ok(RValue::New(NewRValue::structure(type_name, args)));
            }
            if self.check(TokenKind::LBracket) {
                self.advance();
                let size = self.parse_expr()?;
                self.expect(TokenKind::RBracket)?;
                return Ok(RValue::New(NewRValue::array(type_name, size)));
            }
            return Err(ParseError::unexpected("'(' or '['", self.current()));
        }
        Err(ParseError::unexpected("a type name after 'new'", self.current()))
    }

    /// `'(' Args? ')'`, with the opening `(` as the current token.
    pub(super) fn parse_call_tail(&mut self) -> Result<Vec<Expr>, ParseError> {
        self.expect(TokenKind::LParen)?;
        let args = if self.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_args()?
        };
        self.expect(TokenKind::RParen)?;
        Ok(args)
    }

    /// `Expr (',' Expr)*`
    fn parse_args(&mut self) -> Result<Vec<Expr>, ParseError> {
        let mut args = vec![self.parse_expr()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            args.push(self.parse_expr()?);
        }
        Ok(args)
    }

    /// `('[' Expr ']')? ('.' ID ('[' Expr ']')?)*`, given the already
    /// consumed head identifier. Shared by rvalue paths and lvalue paths.
    pub(super) fn parse_var_tail(&mut self, head: Token) -> Result<Vec<VarRef>, ParseError> {
        let head_index = self.parse_optional_index()?;
        let mut path = vec![VarRef::new(head, head_index)];

        while self.check(TokenKind::Dot) {
            self.advance();
            let name = self.expect_id()?;
            let index = self.parse_optional_index()?;
            path.push(VarRef::new(name, index));
        }

        Ok(path)
    }

    fn parse_optional_index(&mut self) -> Result<Option<Expr>, ParseError> {
        if self.check(TokenKind::LBracket) {
            self.advance();
            let index = self.parse_expr()?;
            self.expect(TokenKind::RBracket)?;
            Ok(Some(index))
        } else {
            Ok(None)
        }
    }
}
