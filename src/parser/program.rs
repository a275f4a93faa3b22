//! Top-level parsing: `Program`, `StructDef`, `FunDef`.

use crate::ast::{FunDef, Program, StructDef, VarDef};
use crate::token::TokenKind;

use super::error::ParseError;
use super::Parser;

impl Parser {
    pub(super) fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::default();
        while !self.is_eof() {
            if self.check(TokenKind::Struct) {
                program.structs.push(self.parse_struct_def()?);
            } else {
                program.funs.push(self.parse_fun_def()?);
            }
        }
        Ok(program)
    }

    /// `'struct' ID '{' Field* '}'`
    fn parse_struct_def(&mut self) -> Result<StructDef, ParseError> {
        self.expect(TokenKind::Struct)?;
        let name = self.expect_id()?;
        self.expect(TokenKind::LBrace)?;
        let mut fields = Vec::new();
        while !self.check(TokenKind::RBrace) {
            fields.push(self.parse_field()?);
        }
        self.expect(TokenKind::RBrace)?;
        Ok(StructDef { name, fields })
    }

    /// `DataType ID ';'`
    fn parse_field(&mut self) -> Result<VarDef, ParseError> {
        let data_type = self.parse_data_type()?;
        let name = self.expect_id()?;
        self.expect(TokenKind::Semicolon)?;
        Ok(VarDef { data_type, name })
    }

    /// `(DataType | 'void') ID '(' Params? ')' '{' Stmt* '}'`
    fn parse_fun_def(&mut self) -> Result<FunDef, ParseError> {
        let return_type = self.parse_return_type()?;
        let name = self.expect_id()?;
        self.expect(TokenKind::LParen)?;
        let params = if self.check(TokenKind::RParen) {
            Vec::new()
        } else {
            self.parse_params()?
        };
        self.expect(TokenKind::RParen)?;
        let body = self.parse_block()?;
        Ok(FunDef {
            return_type,
            name,
            params,
            body,
        })
    }

    /// `Param (',' Param)*`
    fn parse_params(&mut self) -> Result<Vec<VarDef>, ParseError> {
        let mut params = vec![self.parse_param()?];
        while self.check(TokenKind::Comma) {
            self.advance();
            params.push(self.parse_param()?);
        }
        Ok(params)
    }

    /// `DataType ID`
    fn parse_param(&mut self) -> Result<VarDef, ParseError> {
        let data_type = self.parse_data_type()?;
        let name = self.expect_id()?;
        Ok(VarDef { data_type, name })
    }
}
