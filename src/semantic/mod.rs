//! Semantic checker for MyPL: typing, scoping, and declaration rules
//! (spec §4.3).
//!
//! # Module Structure
//!
//! - [`error`] — [`SemanticError`]
//! - [`types`] — [`Ty`], the checker's resolved type representation
//! - `symbol_table` — [`symbol_table::SymbolTable`], scoped name → `Ty`
//! - `typecheck_expr` — expression, term, and rvalue typing
//! - `typecheck_stmt` — statement typing and scope management
//!
//! The checker never mutates the AST; it either accepts a [`Program`] or
//! returns the first [`SemanticError`] it encounters (spec §4.3: "No
//! partial emission on failure").

mod error;
mod symbol_table;
mod typecheck_expr;
mod typecheck_stmt;
pub mod types;

#[cfg(test)]
mod tests;

pub use error::SemanticError;
pub use types::Ty;

use std::collections::{HashMap, HashSet};

use crate::ast::{FunDef, Program, StructDef, VarDef};
use crate::token::Token;

use symbol_table::SymbolTable;
use types::TypeKind;

/// Built-in function names (spec §4.3) — reserved, cannot be redefined by
/// user code and dispatch to dedicated VM opcodes rather than a `CALL`.
pub const BUILTINS: &[&str] = &[
    "print", "input", "itos", "itod", "dtos", "dtoi", "stoi", "stod", "length", "get",
];

/// A resolved struct: its declared field names, in source order, paired
/// with their [`Ty`].
#[derive(Debug, Clone)]
pub(crate) struct StructInfo {
    pub fields: Vec<(String, Ty)>,
}

impl StructInfo {
    fn field_ty(&self, name: &str) -> Option<&Ty> {
        self.fields.iter().find(|(n, _)| n == name).map(|(_, ty)| ty)
    }
}

/// A resolved function signature: parameter types in declaration order
/// plus the return type.
#[derive(Debug, Clone)]
pub(crate) struct FunInfo {
    pub params: Vec<Ty>,
    pub return_ty: Ty,
}

/// Visits a validated [`Program`], enforcing MyPL's typing and scoping
/// rules (spec §4.3).
pub struct SemanticChecker {
    structs: HashMap<String, StructInfo>,
    funs: HashMap<String, FunInfo>,
    symbols: SymbolTable,
}

impl SemanticChecker {
    pub fn new() -> Self {
        SemanticChecker {
            structs: HashMap::new(),
            funs: HashMap::new(),
            symbols: SymbolTable::new(),
        }
    }

    /// Checks a whole program: global declarations first, then each
    /// struct's field types, then each function body.
    pub fn check(program: &Program) -> Result<(), SemanticError> {
        let mut checker = SemanticChecker::new();
        checker.check_program(program)
    }

    fn check_program(&mut self, program: &Program) -> Result<(), SemanticError> {
        self.collect_structs(program)?;
        self.collect_functions(program)?;
        self.check_main(program)?;

        for struct_def in &program.structs {
            self.check_struct_fields(struct_def)?;
        }
        for fun in &program.funs {
            self.check_fun(fun)?;
        }
        Ok(())
    }

    // Pre-pass: global declaration collection (spec §4.3).

    fn collect_structs(&mut self, program: &Program) -> Result<(), SemanticError> {
        let struct_names: HashSet<String> =
            program.structs.iter().map(|s| s.name.lexeme.clone()).collect();

        for struct_def in &program.structs {
            let name = struct_def.name.lexeme.clone();
            if self.structs.contains_key(&name) {
                return Err(SemanticError::new(
                    format!("duplicate struct definition '{name}'"),
                    struct_def.name.span,
                ));
            }

            let mut fields = Vec::new();
            let mut seen = HashSet::new();
            for field in &struct_def.fields {
                let field_name = field.name.lexeme.clone();
                if !seen.insert(field_name.clone()) {
                    return Err(SemanticError::new(
                        format!("duplicate field '{field_name}' in struct '{name}'"),
                        field.name.span,
                    ));
                }
                let ty = Ty::from_data_type(&field.data_type, &struct_names, false).ok_or_else(|| {
                    SemanticError::new(
                        format!("undefined field type '{}'", field.data_type.name()),
                        field.data_type.type_name.span,
                    )
                })?;
                fields.push((field_name, ty));
            }

            self.structs.insert(name, StructInfo { fields });
        }
        Ok(())
    }

    fn collect_functions(&mut self, program: &Program) -> Result<(), SemanticError> {
        let struct_names: HashSet<String> = self.structs.keys().cloned().collect();

        for fun in &program.funs {
            let name = fun.name.lexeme.clone();
            if self.funs.contains_key(&name) {
                return Err(SemanticError::new(
                    format!("duplicate function definition '{name}'"),
                    fun.name.span,
                ));
            }
            if BUILTINS.contains(&name.as_str()) {
                return Err(SemanticError::new(
                    format!("'{name}' redefines a built-in function"),
                    fun.name.span,
                ));
            }

            let return_ty = Ty::from_data_type(&fun.return_type, &struct_names, true).ok_or_else(|| {
                SemanticError::new(
                    format!("undefined return type '{}'", fun.return_type.name()),
                    fun.return_type.type_name.span,
                )
            })?;

            let mut params = Vec::new();
            let mut seen = HashSet::new();
            for param in &fun.params {
                let param_name = param.name.lexeme.clone();
                if !seen.insert(param_name.clone()) {
                    return Err(SemanticError::new(
                        format!("duplicate parameter '{param_name}' in function '{name}'"),
                        param.name.span,
                    ));
                }
                let ty = Ty::from_data_type(&param.data_type, &struct_names, false).ok_or_else(|| {
                    SemanticError::new(
                        format!("undefined parameter type '{}'", param.data_type.name()),
                        param.data_type.type_name.span,
                    )
                })?;
                params.push(ty);
            }

            self.funs.insert(name, FunInfo { params, return_ty });
        }
        Ok(())
    }

    fn check_main(&self, program: &Program) -> Result<(), SemanticError> {
        let main = program
            .funs
            .iter()
            .find(|f| f.name.lexeme == "main")
            .ok_or_else(|| SemanticError::without_span("missing 'main' function"))?;

        if main.return_type.is_array || main.return_type.name() != "void" {
            return Err(SemanticError::new(
                "'main' must return 'void'",
                main.return_type.type_name.span,
            ));
        }
        if !main.params.is_empty() {
            return Err(SemanticError::new("'main' must take no parameters", main.name.span));
        }
        Ok(())
    }

    fn check_struct_fields(&self, struct_def: &StructDef) -> Result<(), SemanticError> {
        // Field types were already resolved and validated in the
        // collection pass; nothing further to check here (struct bodies
        // carry no statements).
        let _ = struct_def;
        Ok(())
    }

    fn check_fun(&mut self, fun: &FunDef) -> Result<(), SemanticError> {
        let info = &self.funs[&fun.name.lexeme];
        let return_ty = info.return_ty.clone();
        let param_tys = info.params.clone();

        self.symbols.push_scope();
        self.symbols.declare("return", return_ty);

        for (param, ty) in fun.params.iter().zip(param_tys) {
            self.declare_var(&param.name, ty)?;
        }

        for stmt in &fun.body {
            self.check_stmt(stmt)?;
        }

        self.symbols.pop_scope();
        Ok(())
    }

    /// Declares `name: ty` in the current scope, rejecting same-scope
    /// shadowing (spec §4.3).
    pub(crate) fn declare_var(&mut self, name: &Token, ty: Ty) -> Result<(), SemanticError> {
        if self.symbols.declared_in_current_scope(&name.lexeme) {
            return Err(SemanticError::new(
                format!("'{}' is already declared in this scope", name.lexeme),
                name.span,
            ));
        }
        self.symbols.declare(&name.lexeme, ty);
        Ok(())
    }

    pub(crate) fn lookup_var(&self, name: &Token) -> Result<Ty, SemanticError> {
        self.symbols.lookup(&name.lexeme).cloned().ok_or_else(|| {
            SemanticError::new(format!("undefined variable '{}'", name.lexeme), name.span)
        })
    }

    /// The enclosing function's return type, installed under the reserved
    /// key `return` at function entry (spec §4.3).
    pub(crate) fn return_ty(&self) -> Ty {
        self.symbols
            .lookup("return")
            .cloned()
            .expect("'return' is always installed at function entry")
    }

    pub(crate) fn push_scope(&mut self) {
        self.symbols.push_scope();
    }

    pub(crate) fn pop_scope(&mut self) {
        self.symbols.pop_scope();
    }

    pub(crate) fn struct_info(&self, name: &str) -> Option<&StructInfo> {
        self.structs.get(name)
    }

    pub(crate) fn known_struct_names(&self) -> HashSet<String> {
        self.structs.keys().cloned().collect()
    }

    pub(crate) fn fun_info(&self, name: &str) -> Option<&FunInfo> {
        self.funs.get(name)
    }
}

impl Default for SemanticChecker {
    fn default() -> Self {
        Self::new()
    }
}

/// Resolves `data_type`, translating an unknown name into a located error.
pub(crate) fn resolve_var_def(
    var_def: &VarDef,
    structs: &HashSet<String>,
) -> Result<Ty, SemanticError> {
    Ty::from_data_type(&var_def.data_type, structs, false).ok_or_else(|| {
        SemanticError::new(
            format!("undefined type '{}'", var_def.data_type.name()),
            var_def.data_type.type_name.span,
        )
    })
}

/// True for the base-type kinds accepted by `print` (spec §4.3): any
/// non-array, non-struct, non-`null` scalar.
pub(crate) fn is_printable(ty: &Ty) -> bool {
    !ty.is_array && !matches!(ty.kind, TypeKind::Struct(_) | TypeKind::Void)
}
