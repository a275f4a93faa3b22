//! Statement emission (spec §4.4).

use crate::ast::{AssignStmt, CallExpr, ForStmt, IfStmt, Stmt, TryCatchStmt, VarDecl, WhileStmt};

use super::{CodeGenerator, CodegenError, Literal, Opcode};

impl CodeGenerator {
    pub(crate) fn gen_stmt(&mut self, stmt: &Stmt) -> Result<(), CodegenError> {
        match stmt {
            Stmt::VarDecl(decl) => self.gen_var_decl(decl),
            Stmt::Assign(assign) => self.gen_assign(assign),
            Stmt::Call(call) => self.gen_call_stmt(call),
            Stmt::If(if_stmt) => self.gen_if(if_stmt),
            Stmt::While(while_stmt) => self.gen_while(while_stmt),
            Stmt::For(for_stmt) => self.gen_for(for_stmt),
            Stmt::Return(ret) => self.gen_return(ret),
            Stmt::TryCatch(try_catch) => self.gen_try_catch(try_catch),
        }
    }

    fn gen_call_stmt(&mut self, call: &CallExpr) -> Result<(), CodegenError> {
        let wrapped = crate::ast::Expr::simple(crate::ast::Term::Simple(crate::ast::RValue::Call(call.clone())));
        self.gen_expr(&wrapped)?;
        // A call used as a statement has its value unused, but every
        // built-in/user call leaves exactly one value on the stack
        // (`print`'s `void` included, since `WRITE` does not push a
        // result) except `print`, whose opcode is itself non-pushing.
        if call.name.lexeme != "print" {
            self.emit(Opcode::Pop);
        }
        Ok(())
    }

    fn gen_var_decl(&mut self, decl: &VarDecl) -> Result<(), CodegenError> {
        match &decl.init {
            Some(init) => self.gen_expr(init)?,
            None => self.emit(Opcode::Push(Literal::Null)),
        }
        let slot = self.declare_var(&decl.var_def.name.lexeme);
        self.emit(Opcode::Store(slot));
        Ok(())
    }

    fn gen_assign(&mut self, assign: &AssignStmt) -> Result<(), CodegenError> {
        let (head, rest) = assign.lvalue.split_first().expect("lvalue path is never empty");

        if rest.is_empty() {
            let slot = self.slot_of(&head.name.lexeme)?;
            match &head.array_index {
                None => {
                    self.gen_expr(&assign.expr)?;
                    self.emit(Opcode::Store(slot));
                }
                Some(index) => {
                    self.emit(Opcode::Load(slot));
                    self.gen_expr(index)?;
                    self.gen_expr(&assign.expr)?;
                    self.emit(Opcode::Seti);
                }
            }
            return Ok(());
        }

        let slot = self.slot_of(&head.name.lexeme)?;
        self.emit(Opcode::Load(slot));
        if let Some(index) = &head.array_index {
            self.gen_expr(index)?;
            self.emit(Opcode::Geti);
        }

        let (last, middle) = rest.split_last().expect("rest is non-empty here");
        for step in middle {
            self.emit(Opcode::Getf(step.name.lexeme.clone()));
            if let Some(index) = &step.array_index {
                self.gen_expr(index)?;
                self.emit(Opcode::Geti);
            }
        }

        match &last.array_index {
            None => {
                self.gen_expr(&assign.expr)?;
                self.emit(Opcode::Setf(last.name.lexeme.clone()));
            }
            Some(index) => {
                self.emit(Opcode::Getf(last.name.lexeme.clone()));
                self.gen_expr(index)?;
                self.gen_expr(&assign.expr)?;
                self.emit(Opcode::Seti);
            }
        }
        Ok(())
    }

    fn gen_if(&mut self, if_stmt: &IfStmt) -> Result<(), CodegenError> {
        self.gen_basic_if(&if_stmt.if_part)?;
        for elseif in &if_stmt.elseifs {
            self.gen_basic_if(elseif)?;
        }

        for stmt in &if_stmt.else_body {
            self.gen_stmt(stmt)?;
        }
        Ok(())
    }

    fn gen_basic_if(&mut self, basic_if: &crate::ast::BasicIf) -> Result<(), CodegenError> {
        self.gen_expr(&basic_if.condition)?;
        let jmpf = self.emit_placeholder_jmpf();

        self.push_scope();
        for stmt in &basic_if.body {
            self.gen_stmt(stmt)?;
        }
        self.pop_scope();

        self.emit(Opcode::Nop);
        self.patch_jmpf(jmpf, self.here() - 1);
        Ok(())
    }

    fn gen_while(&mut self, while_stmt: &WhileStmt) -> Result<(), CodegenError> {
        let start = self.here();
        self.gen_expr(&while_stmt.condition)?;
        let jmpf = self.emit_placeholder_jmpf();

        self.push_scope();
        for stmt in &while_stmt.body {
            self.gen_stmt(stmt)?;
        }
        self.pop_scope();

        self.emit(Opcode::Jmp(start));
        self.emit(Opcode::Nop);
        self.patch_jmpf(jmpf, self.here() - 1);
        Ok(())
    }

    fn gen_for(&mut self, for_stmt: &ForStmt) -> Result<(), CodegenError> {
        self.push_scope();
        self.gen_var_decl(&for_stmt.var_decl)?;

        let start = self.here();
        self.gen_expr(&for_stmt.condition)?;
        let jmpf = self.emit_placeholder_jmpf();

        self.push_scope();
        for stmt in &for_stmt.body {
            self.gen_stmt(stmt)?;
        }
        self.pop_scope();

        self.gen_assign(&for_stmt.step)?;
        self.emit(Opcode::Jmp(start));
        self.emit(Opcode::Nop);
        self.patch_jmpf(jmpf, self.here() - 1);

        self.pop_scope();
        Ok(())
    }

    fn gen_return(&mut self, ret: &crate::ast::ReturnStmt) -> Result<(), CodegenError> {
        self.gen_expr(&ret.expr)?;
        self.emit(Opcode::Ret);
        Ok(())
    }

    fn gen_try_catch(&mut self, try_catch: &TryCatchStmt) -> Result<(), CodegenError> {
        self.emit(Opcode::TryStart);
        self.push_scope();
        for stmt in &try_catch.try_body {
            self.gen_stmt(stmt)?;
        }
        self.pop_scope();
        self.emit(Opcode::TryEnd);

        self.push_scope();
        self.emit(Opcode::CatchStart);
        for stmt in &try_catch.catch_body {
            self.gen_stmt(stmt)?;
        }
        self.emit(Opcode::CatchEnd);
        self.pop_scope();
        Ok(())
    }
}
