//! `DataType` parsing: `BaseType | ID | 'array' (BaseType | ID)`.

use crate::ast::DataType;
use crate::token::TokenKind;

use super::error::ParseError;
use super::Parser;

impl Parser {
    /// `DataType | 'void'` — only valid as a function's return type.
    pub(super) fn parse_return_type(&mut self) -> Result<DataType, ParseError> {
        if self.check(TokenKind::VoidType) {
            let type_name = self.advance();
            return Ok(DataType::new(false, type_name));
        }
        self.parse_data_type()
    }

    pub(super) fn parse_data_type(&mut self) -> Result<DataType, ParseError> {
        if self.check(TokenKind::Array) {
            self.advance();
            let type_name = self.parse_base_or_struct_name()?;
            return Ok(DataType::new(true, type_name));
        }
        let type_name = self.parse_base_or_struct_name()?;
        Ok(DataType::new(false, type_name))
    }

    fn parse_base_or_struct_name(&mut self) -> Result<crate::token::Token, ParseError> {
        if self.current_kind().is_base_type() {
            Ok(self.advance())
        } else if self.check(TokenKind::Id) {
            Ok(self.advance())
        } else {
            Err(ParseError::unexpected("a type name", self.current()))
        }
    }
}
