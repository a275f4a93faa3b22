//! Top-level program structure for the MyPL AST.

use crate::token::Token;

use super::stmt::{Stmt, VarDef};
use super::types::DataType;

#[derive(Debug, Clone)]
pub struct StructDef {
    pub name: Token,
    pub fields: Vec<VarDef>,
}

#[derive(Debug, Clone)]
pub struct FunDef {
    pub return_type: DataType,
    pub name: Token,
    pub params: Vec<VarDef>,
    pub body: Vec<Stmt>,
}

/// The root AST node: every struct definition followed by every function
/// definition, in source order.
#[derive(Debug, Clone, Default)]
pub struct Program {
    pub structs: Vec<StructDef>,
    pub funs: Vec<FunDef>,
}
