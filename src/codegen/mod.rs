//! Code generator: lowers a validated [`crate::ast::Program`] into
//! per-function [`FrameTemplate`]s (spec §4.4).
//!
//! # Module Structure
//!
//! - [`error`] — [`CodegenError`]
//! - [`opcode`] — [`Opcode`], [`Literal`]
//! - [`frame_template`] — [`FrameTemplate`]
//! - `var_table` — scoped name → slot
//! - `expr` / `stmt` — per-construct emission, split the way the checker's
//!   `typecheck_expr`/`typecheck_stmt` are split

mod error;
mod expr;
mod frame_template;
mod opcode;
mod stmt;
mod var_table;

#[cfg(test)]
mod tests;

pub use error::CodegenError;
pub use frame_template::FrameTemplate;
pub use opcode::{Literal, Opcode};

use std::collections::HashMap;

use crate::ast::{FunDef, Program, StructDef};

use var_table::VarTable;

/// Lowers every struct and function in `program` to a [`FrameTemplate`]
/// list, one per function, in source order.
pub struct CodeGenerator {
    struct_fields: HashMap<String, Vec<String>>,
    templates: Vec<FrameTemplate>,
    current: FrameTemplate,
    vars: VarTable,
}

impl CodeGenerator {
    pub fn generate(program: &Program) -> Result<Vec<FrameTemplate>, CodegenError> {
        let mut gen = CodeGenerator {
            struct_fields: HashMap::new(),
            templates: Vec::new(),
            current: FrameTemplate::new("", 0),
            vars: VarTable::new(),
        };
        for struct_def in &program.structs {
            gen.collect_struct(struct_def);
        }
        for fun in &program.funs {
            gen.gen_fun(fun)?;
        }
        Ok(gen.templates)
    }

    fn collect_struct(&mut self, struct_def: &StructDef) {
        let fields = struct_def.fields.iter().map(|f| f.name.lexeme.clone()).collect();
        self.struct_fields.insert(struct_def.name.lexeme.clone(), fields);
    }

    pub(crate) fn struct_field_names(&self, struct_name: &str) -> Option<&[String]> {
        self.struct_fields.get(struct_name).map(Vec::as_slice)
    }

    fn gen_fun(&mut self, fun: &FunDef) -> Result<(), CodegenError> {
        self.current = FrameTemplate::new(fun.name.lexeme.clone(), fun.params.len());
        self.vars = VarTable::new();
        self.vars.push_scope();

        for param in &fun.params {
            let slot = self.vars.declare(&param.name.lexeme);
            self.emit(Opcode::Store(slot));
        }

        for stmt in &fun.body {
            self.gen_stmt(stmt)?;
        }

        if self.current.instructions.last() != Some(&Opcode::Ret) {
            self.emit(Opcode::Push(Literal::Null));
            self.emit(Opcode::Ret);
        }

        self.vars.pop_scope();
        let finished = std::mem::replace(&mut self.current, FrameTemplate::new("", 0));
        self.templates.push(finished);
        Ok(())
    }

    pub(crate) fn emit(&mut self, op: Opcode) {
        self.current.instructions.push(op);
    }

    /// Reserves a jump instruction to be back-patched once its target is
    /// known, returning the index to patch.
    pub(crate) fn emit_placeholder_jmpf(&mut self) -> usize {
        self.emit(Opcode::Jmpf(usize::MAX));
        self.current.instructions.len() - 1
    }

    pub(crate) fn here(&self) -> usize {
        self.current.instructions.len()
    }

    pub(crate) fn patch_jmpf(&mut self, index: usize, target: usize) {
        self.current.instructions[index] = Opcode::Jmpf(target);
    }

    pub(crate) fn push_scope(&mut self) {
        self.vars.push_scope();
    }

    pub(crate) fn pop_scope(&mut self) {
        self.vars.pop_scope();
    }

    pub(crate) fn declare_var(&mut self, name: &str) -> usize {
        self.vars.declare(name)
    }

    pub(crate) fn slot_of(&self, name: &str) -> Result<usize, CodegenError> {
        self.vars
            .slot_of(name)
            .ok_or_else(|| CodegenError::bug(format!("undefined variable '{name}' reached codegen")))
    }
}
