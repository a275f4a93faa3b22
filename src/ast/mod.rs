//! Abstract syntax tree for MyPL programs.
//!
//! The AST is a closed set of tagged-variant node kinds (no visitor
//! dispatch attached to the nodes themselves, per spec §9) produced by
//! [`crate::parser`], validated by [`crate::semantic`], and consumed by
//! [`crate::codegen`].
//!
//! # Module Structure
//!
//! - [`types`] — the [`DataType`] annotation
//! - [`expr`] — expressions, terms, rvalues, variable paths, calls
//! - [`stmt`] — statements
//! - [`program`] — [`Program`], [`StructDef`], [`FunDef`]

mod expr;
mod program;
mod stmt;
mod types;

pub use expr::{CallExpr, Expr, NewRValue, RValue, Term, VarRef};
pub use program::{FunDef, Program, StructDef};
pub use stmt::{AssignStmt, BasicIf, ForStmt, IfStmt, ReturnStmt, Stmt, TryCatchStmt, VarDecl, VarDef, WhileStmt};
pub use types::DataType;
