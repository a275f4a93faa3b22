//! Expression nodes for the MyPL AST.
//!
//! MyPL's grammar builds a flat, right-leaning expression chain rather than
//! a precedence tree (see spec §4.2, §9): `Expr` always holds its first
//! `Term` plus an optional `(op, rest)` pair, never a nested binary-op
//! node. [`crate::semantic`] and [`crate::codegen`] must walk this shape
//! literally — introducing precedence climbing here would change which
//! programs parse and how they evaluate.

use crate::token::{Span, Token};

/// A single step of a variable path: a name plus an optional array index.
///
/// Used both as an lvalue path (in [`super::stmt::AssignStmt`]) and as an
/// rvalue path (in [`RValue::Var`]).
#[derive(Debug, Clone)]
pub struct VarRef {
    pub name: Token,
    pub array_index: Option<Box<Expr>>,
}

impl VarRef {
    pub fn new(name: Token, array_index: Option<Expr>) -> Self {
        VarRef {
            name,
            array_index: array_index.map(Box::new),
        }
    }
}

/// A function call, either to a built-in (dispatched to a dedicated
/// opcode in codegen) or to a user-defined function (`CALL`).
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub name: Token,
    pub args: Vec<Expr>,
}

/// `new` expression: either a struct construction or an array allocation.
/// Exactly one of `array_expr` and `struct_params` is present.
#[derive(Debug, Clone)]
pub struct NewRValue {
    pub type_name: Token,
    pub array_expr: Option<Box<Expr>>,
    pub struct_params: Option<Vec<Expr>>,
}

impl NewRValue {
    pub fn array(type_name: Token, size: Expr) -> Self {
        NewRValue {
            type_name,
            array_expr: Some(Box::new(size)),
            struct_params: None,
        }
    }

    pub fn structure(type_name: Token, params: Vec<Expr>) -> Self {
        NewRValue {
            type_name,
            array_expr: None,
            struct_params: Some(params),
        }
    }

    pub fn is_array(&self) -> bool {
        self.array_expr.is_some()
    }
}

/// The non-recursive forms an expression's leaf value can take.
#[derive(Debug, Clone)]
pub enum RValue {
    /// A literal token: int, double, string, bool, or `null`.
    Simple(Token),
    New(NewRValue),
    /// A call to a built-in or user-defined function.
    Call(CallExpr),
    /// A (possibly dotted/indexed) variable path.
    Var(Vec<VarRef>),
}

/// A `Term` is either a bare rvalue or a fully parenthesized sub-expression.
#[derive(Debug, Clone)]
pub enum Term {
    Simple(RValue),
    Complex(Box<Expr>),
}

/// An expression: `not`? term (op rest)?
///
/// `op` and `rest` are both present or both absent (spec §3 invariant).
#[derive(Debug, Clone)]
pub struct Expr {
    pub not_op: bool,
    pub first: Term,
    pub op: Option<Token>,
    pub rest: Option<Box<Expr>>,
}

impl Expr {
    pub fn simple(first: Term) -> Self {
        Expr {
            not_op: false,
            first,
            op: None,
            rest: None,
        }
    }

    pub fn negated(first: Term) -> Self {
        Expr {
            not_op: true,
            first,
            op: None,
            rest: None,
        }
    }

    pub fn binary(not_op: bool, first: Term, op: Token, rest: Expr) -> Self {
        Expr {
            not_op,
            first,
            op: Some(op),
            rest: Some(Box::new(rest)),
        }
    }

    /// The source location this expression starts at — the span of its
    /// leading token, found by walking down through `first` (a
    /// parenthesized `Term::Complex` recurses into its inner expression).
    /// Used to locate checker errors against a condition or a `return`
    /// expression rather than leaving them unspanned.
    pub fn span(&self) -> Span {
        self.first.span()
    }
}

impl Term {
    pub fn span(&self) -> Span {
        match self {
            Term::Simple(rvalue) => rvalue.span(),
            Term::Complex(expr) => expr.span(),
        }
    }
}

impl RValue {
    pub fn span(&self) -> Span {
        match self {
            RValue::Simple(tok) => tok.span,
            RValue::New(new_rvalue) => new_rvalue.type_name.span,
            RValue::Call(call) => call.name.span,
            RValue::Var(path) => path.first().expect("var path is never empty").name.span,
        }
    }
}
