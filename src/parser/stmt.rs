//! Statement parsing.

use crate::ast::{
    AssignStmt, BasicIf, CallExpr, ForStmt, IfStmt, ReturnStmt, Stmt, TryCatchStmt, VarDecl,
    VarDef, WhileStmt,
};
use crate::token::TokenKind;

use super::error::ParseError;
use super::Parser;

impl Parser {
    /// `'{' Stmt* '}'`
    pub(super) fn parse_block(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.expect(TokenKind::LBrace)?;
        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(stmts)
    }

    fn parse_stmt(&mut self) -> Result<Stmt, ParseError> {
        match self.current_kind() {
            TokenKind::If => Ok(Stmt::If(self.parse_if_stmt()?)),
            TokenKind::While => Ok(Stmt::While(self.parse_while_stmt()?)),
            TokenKind::For => Ok(Stmt::For(self.parse_for_stmt()?)),
            TokenKind::Try => Ok(Stmt::TryCatch(self.parse_try_stmt()?)),
            TokenKind::Return => self.parse_return_stmt(),
            k if k.is_base_type() || k == TokenKind::Array => self.parse_var_decl_stmt(),
            // A leading `ID` is ambiguous between a struct-typed `VarDecl`
            // (`Point p = ...;`) and an `AssignOrCall` (`p.x = ...;`,
            // `foo();`). One more token of lookahead resolves it: a second
            // `ID` immediately after can only be a declared variable name.
            TokenKind::Id if self.peek_kind(1) == TokenKind::Id => self.parse_var_decl_stmt(),
            TokenKind::Id => self.parse_assign_or_call_stmt(),
            _ => Err(ParseError::unexpected("a statement", self.current())),
        }
    }

    fn parse_var_decl_stmt(&mut self) -> Result<Stmt, ParseError> {
        let decl = self.parse_var_decl()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::VarDecl(decl))
    }

    /// `DataType ID ('=' Expr)?`
    pub(super) fn parse_var_decl(&mut self) -> Result<VarDecl, ParseError> {
        let data_type = self.parse_data_type()?;
        let name = self.expect_id()?;
        let init = if self.check(TokenKind::Assign) {
            self.advance();
            Some(self.parse_expr()?)
        } else {
            None
        };
        Ok(VarDecl {
            var_def: VarDef { data_type, name },
            init,
        })
    }

    /// `ID ('(' Args? ')' | VarTail '=' Expr) ';'`
    fn parse_assign_or_call_stmt(&mut self) -> Result<Stmt, ParseError> {
        let name = self.expect_id()?;
        if self.check(TokenKind::LParen) {
            let args = self.parse_call_tail()?;
            self.expect(TokenKind::Semicolon)?;
            return Ok(Stmt::Call(CallExpr { name, args }));
        }
        let lvalue = self.parse_var_tail(name)?;
        self.expect(TokenKind::Assign)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Assign(AssignStmt { lvalue, expr }))
    }

    /// `ID VarTail '=' Expr`, without the trailing `;` — used for the
    /// for-loop step, which is always a bare assignment (spec §4.2).
    fn parse_assign_stmt(&mut self) -> Result<AssignStmt, ParseError> {
        let name = self.expect_id()?;
        let lvalue = self.parse_var_tail(name)?;
        self.expect(TokenKind::Assign)?;
        let expr = self.parse_expr()?;
        Ok(AssignStmt { lvalue, expr })
    }

    /// `'return' Expr ';'`
    fn parse_return_stmt(&mut self) -> Result<Stmt, ParseError> {
        self.expect(TokenKind::Return)?;
        let expr = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(Stmt::Return(ReturnStmt { expr }))
    }

    /// `'if' '(' Expr ')' Block ('elseif' '(' Expr ')' Block)* ('else' Block)?`
    fn parse_if_stmt(&mut self) -> Result<IfStmt, ParseError> {
        self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        let if_part = BasicIf { condition, body };

        let mut elseifs = Vec::new();
        while self.check(TokenKind::Elseif) {
            self.advance();
            self.expect(TokenKind::LParen)?;
            let condition = self.parse_expr()?;
            self.expect(TokenKind::RParen)?;
            let body = self.parse_block()?;
            elseifs.push(BasicIf { condition, body });
        }

        let else_body = if self.check(TokenKind::Else) {
            self.advance();
            self.parse_block()?
        } else {
            Vec::new()
        };

        Ok(IfStmt {
            if_part,
            elseifs,
            else_body,
        })
    }

    /// `'while' '(' Expr ')' Block`
    fn parse_while_stmt(&mut self) -> Result<WhileStmt, ParseError> {
        self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(WhileStmt { condition, body })
    }

    /// `'for' '(' VarDecl ';' Expr ';' AssignStmt ')' Block`
    fn parse_for_stmt(&mut self) -> Result<ForStmt, ParseError> {
        self.expect(TokenKind::For)?;
        self.expect(TokenKind::LParen)?;
        let var_decl = self.parse_var_decl()?;
        self.expect(TokenKind::Semicolon)?;
        let condition = self.parse_expr()?;
        self.expect(TokenKind::Semicolon)?;
        let step = self.parse_assign_stmt()?;
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(ForStmt {
            var_decl,
            condition,
            step,
            body,
        })
    }

    /// `'try' Block 'catch' Block`
    fn parse_try_stmt(&mut self) -> Result<TryCatchStmt, ParseError> {
        self.expect(TokenKind::Try)?;
        let try_body = self.parse_block()?;
        self.expect(TokenKind::Catch)?;
        let catch_body = self.parse_block()?;
        Ok(TryCatchStmt {
            try_body,
            catch_body,
        })
    }
}
