//! Statement typing and scope management (spec §4.3).

use crate::ast::{AssignStmt, ForStmt, IfStmt, Stmt, TryCatchStmt, VarDecl, WhileStmt};

use super::types::{assignment_compatible, TypeKind};
use super::{resolve_var_def, SemanticChecker, SemanticError};

impl SemanticChecker {
    pub(crate) fn check_stmt(&mut self, stmt: &Stmt) -> Result<(), SemanticError> {
        match stmt {
            Stmt::VarDecl(decl) => self.check_var_decl(decl),
            Stmt::Assign(assign) => self.check_assign(assign),
            Stmt::Call(call) => {
                // A bare call statement discards its result; any type is
                // acceptable, including `void`.
                self.check_expr_call(call)?;
                Ok(())
            }
            Stmt::If(if_stmt) => self.check_if(if_stmt),
            Stmt::While(while_stmt) => self.check_while(while_stmt),
            Stmt::For(for_stmt) => self.check_for(for_stmt),
            Stmt::Return(ret) => self.check_return(ret),
            Stmt::TryCatch(try_catch) => self.check_try_catch(try_catch),
        }
    }

    fn check_expr_call(&mut self, call: &crate::ast::CallExpr) -> Result<(), SemanticError> {
        let wrapped = crate::ast::Expr::simple(crate::ast::Term::Simple(crate::ast::RValue::Call(call.clone())));
        self.check_expr(&wrapped)?;
        Ok(())
    }

    fn check_var_decl(&mut self, decl: &VarDecl) -> Result<(), SemanticError> {
        let structs = self.known_struct_names();
        let declared_ty = resolve_var_def(&decl.var_def, &structs)?;

        if let Some(init) = &decl.init {
            let init_ty = self.check_expr(init)?;
            if !assignment_compatible(&declared_ty, &init_ty) {
                return Err(SemanticError::new(
                    format!(
                        "cannot initialize '{}' of type '{declared_ty}' with '{init_ty}'",
                        decl.var_def.name.lexeme
                    ),
                    decl.var_def.name.span,
                ));
            }
        }

        self.declare_var(&decl.var_def.name, declared_ty)
    }

    fn check_assign(&mut self, assign: &AssignStmt) -> Result<(), SemanticError> {
        let target_ty = self.check_var_path(&assign.lvalue)?;
        let value_ty = self.check_expr(&assign.expr)?;
        if !assignment_compatible(&target_ty, &value_ty) {
            let name = &assign.lvalue.last().expect("lvalue path is never empty").name;
            return Err(SemanticError::new(
                format!("cannot assign '{value_ty}' to '{name}' of type '{target_ty}'", name = name.lexeme),
                name.span,
            ));
        }
        Ok(())
    }

    fn check_condition(&mut self, cond: &crate::ast::Expr) -> Result<(), SemanticError> {
        let ty = self.check_expr(cond)?;
        if ty.is_array || ty.kind != TypeKind::Bool {
            return Err(SemanticError::new(
                format!("condition must be of type 'bool', found '{ty}'"),
                cond.span(),
            ));
        }
        Ok(())
    }

    fn check_if(&mut self, if_stmt: &IfStmt) -> Result<(), SemanticError> {
        self.check_condition(&if_stmt.if_part.condition)?;
        self.push_scope();
        for stmt in &if_stmt.if_part.body {
            self.check_stmt(stmt)?;
        }
        self.pop_scope();

        for elseif in &if_stmt.elseifs {
            self.check_condition(&elseif.condition)?;
            self.push_scope();
            for stmt in &elseif.body {
                self.check_stmt(stmt)?;
            }
            self.pop_scope();
        }

        self.push_scope();
        for stmt in &if_stmt.else_body {
            self.check_stmt(stmt)?;
        }
        self.pop_scope();
        Ok(())
    }

    fn check_while(&mut self, while_stmt: &WhileStmt) -> Result<(), SemanticError> {
        self.check_condition(&while_stmt.condition)?;
        self.push_scope();
        for stmt in &while_stmt.body {
            self.check_stmt(stmt)?;
        }
        self.pop_scope();
        Ok(())
    }

    fn check_for(&mut self, for_stmt: &ForStmt) -> Result<(), SemanticError> {
        self.push_scope();
        self.check_var_decl(&for_stmt.var_decl)?;
        self.check_condition(&for_stmt.condition)?;

        self.push_scope();
        for stmt in &for_stmt.body {
            self.check_stmt(stmt)?;
        }
        self.pop_scope();

        self.check_assign(&for_stmt.step)?;
        self.pop_scope();
        Ok(())
    }

    fn check_return(&mut self, ret: &crate::ast::ReturnStmt) -> Result<(), SemanticError> {
        let expected = self.return_ty();
        let actual = self.check_expr(&ret.expr)?;
        if !assignment_compatible(&expected, &actual) {
            return Err(SemanticError::new(
                format!("return type mismatch: expected '{expected}', found '{actual}'"),
                ret.expr.span(),
            ));
        }
        Ok(())
    }

    fn check_try_catch(&mut self, try_catch: &TryCatchStmt) -> Result<(), SemanticError> {
        self.push_scope();
        for stmt in &try_catch.try_body {
            self.check_stmt(stmt)?;
        }
        self.pop_scope();

        self.push_scope();
        for stmt in &try_catch.catch_body {
            self.check_stmt(stmt)?;
        }
        self.pop_scope();
        Ok(())
    }
}
