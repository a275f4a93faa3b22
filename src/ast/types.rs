//! The `DataType` annotation used on variables, fields, and parameters.

use std::fmt;

use crate::token::Token;

/// A type annotation: an `is_array` flag plus the base type or struct name.
///
/// `type_name` is the token carrying the lexeme — one of the base types
/// (`int`, `double`, `bool`, `string`), the keyword `void`, or a
/// user-declared struct identifier.
#[derive(Debug, Clone, PartialEq)]
pub struct DataType {
    pub is_array: bool,
    pub type_name: Token,
}

impl DataType {
    pub fn new(is_array: bool, type_name: Token) -> Self {
        DataType { is_array, type_name }
    }

    pub fn name(&self) -> &str {
        &self.type_name.lexeme
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_array {
            write!(f, "array {}", self.name())
        } else {
            write!(f, "{}", self.name())
        }
    }
}
