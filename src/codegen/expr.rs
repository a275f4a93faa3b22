//! Expression emission (spec §4.4).

use crate::ast::{CallExpr, Expr, NewRValue, RValue, Term, VarRef};
use crate::token::TokenKind;

use super::{CodeGenerator, CodegenError, Literal, Opcode};

impl CodeGenerator {
    /// Emits `expr`, leaving its value on top of the operand stack.
    pub(crate) fn gen_expr(&mut self, expr: &Expr) -> Result<(), CodegenError> {
        if expr.not_op {
            self.gen_term(&expr.first)?;
            self.emit(Opcode::Not);
            return Ok(());
        }

        let (Some(op), Some(rest)) = (&expr.op, &expr.rest) else {
            return self.gen_term(&expr.first);
        };

        // `>`/`>=` swap operand emission order and reuse CMPLT/CMPLE —
        // this halves the comparison opcodes the VM needs (spec §4.4).
        if matches!(op.kind, TokenKind::Greater | TokenKind::GreaterEq) {
            self.gen_expr(rest)?;
            self.gen_term(&expr.first)?;
        } else {
            self.gen_term(&expr.first)?;
            self.gen_expr(rest)?;
        }

        self.emit(binary_opcode(op.kind)?);
        Ok(())
    }

    fn gen_term(&mut self, term: &Term) -> Result<(), CodegenError> {
        match term {
            Term::Simple(rvalue) => self.gen_rvalue(rvalue),
            Term::Complex(expr) => self.gen_expr(expr),
        }
    }

    fn gen_rvalue(&mut self, rvalue: &RValue) -> Result<(), CodegenError> {
        match rvalue {
            RValue::Simple(token) => {
                self.emit(Opcode::Push(literal_of(token)?));
                Ok(())
            }
            RValue::New(new_rvalue) => self.gen_new(new_rvalue),
            RValue::Call(call) => self.gen_call(call),
            RValue::Var(path) => self.gen_var_path(path),
        }
    }

    fn gen_new(&mut self, new_rvalue: &NewRValue) -> Result<(), CodegenError> {
        if let Some(size_expr) = &new_rvalue.array_expr {
            self.gen_expr(size_expr)?;
            self.emit(Opcode::Alloca);
            return Ok(());
        }

        let params = new_rvalue
            .struct_params
            .as_ref()
            .expect("NewRValue always carries array_expr xor struct_params");
        let struct_name = new_rvalue.type_name.lexeme.as_str();
        let fields = self
            .struct_field_names(struct_name)
            .ok_or_else(|| CodegenError::bug(format!("undefined struct '{struct_name}' reached codegen")))?
            .to_vec();

        self.emit(Opcode::Allocs);
        for (field_name, param_expr) in fields.iter().zip(params) {
            self.emit(Opcode::Dup);
            self.gen_expr(param_expr)?;
            self.emit(Opcode::Setf(field_name.clone()));
        }
        Ok(())
    }

    fn gen_call(&mut self, call: &CallExpr) -> Result<(), CodegenError> {
        match call.name.lexeme.as_str() {
            "print" => {
                self.gen_expr(&call.args[0])?;
                self.emit(Opcode::Write);
            }
            "input" => {
                self.emit(Opcode::Read);
            }
            "itos" | "dtos" => {
                self.gen_expr(&call.args[0])?;
                self.emit(Opcode::ToStr);
            }
            "itod" => {
                self.gen_expr(&call.args[0])?;
                self.emit(Opcode::ToDbl);
            }
            "dtoi" | "stoi" => {
                self.gen_expr(&call.args[0])?;
                self.emit(Opcode::ToInt);
            }
            "stod" => {
                self.gen_expr(&call.args[0])?;
                self.emit(Opcode::ToDbl);
            }
            "length" => {
                self.gen_expr(&call.args[0])?;
                self.emit(Opcode::Len);
            }
            "get" => {
                self.gen_expr(&call.args[0])?;
                self.gen_expr(&call.args[1])?;
                self.emit(Opcode::Getc);
            }
            name => {
                for arg in &call.args {
                    self.gen_expr(arg)?;
                }
                self.emit(Opcode::Call(name.to_string()));
            }
        }
        Ok(())
    }

    pub(crate) fn gen_var_path(&mut self, path: &[VarRef]) -> Result<(), CodegenError> {
        let (head, rest) = path.split_first().expect("a variable path is never empty");
        let slot = self.slot_of(&head.name.lexeme)?;
        self.emit(Opcode::Load(slot));
        if let Some(index) = &head.array_index {
            self.gen_expr(index)?;
            self.emit(Opcode::Geti);
        }

        for step in rest {
            self.emit(Opcode::Getf(step.name.lexeme.clone()));
            if let Some(index) = &step.array_index {
                self.gen_expr(index)?;
                self.emit(Opcode::Geti);
            }
        }
        Ok(())
    }
}

fn binary_opcode(kind: TokenKind) -> Result<Opcode, CodegenError> {
    use TokenKind::*;
    Ok(match kind {
        Plus => Opcode::Add,
        Minus => Opcode::Sub,
        Times => Opcode::Mul,
        Divide => Opcode::Div,
        And => Opcode::And,
        Or => Opcode::Or,
        Less | Greater => Opcode::CmpLt,
        LessEq | GreaterEq => Opcode::CmpLe,
        Equal => Opcode::CmpEq,
        NotEqual => Opcode::CmpNe,
        other => {
            return Err(CodegenError::bug(format!(
                "token kind {other:?} is not a binary operator"
            )))
        }
    })
}

fn literal_of(token: &crate::token::Token) -> Result<Literal, CodegenError> {
    match token.kind {
        TokenKind::IntVal => token
            .lexeme
            .parse::<i64>()
            .map(Literal::Int)
            .map_err(|e| CodegenError::bug(format!("invalid integer literal '{}': {e}", token.lexeme))),
        TokenKind::DoubleVal => token
            .lexeme
            .parse::<f64>()
            .map(Literal::Double)
            .map_err(|e| CodegenError::bug(format!("invalid double literal '{}': {e}", token.lexeme))),
        TokenKind::StringVal => Ok(Literal::Str(decode_escapes(&token.lexeme))),
        TokenKind::BoolVal => Ok(Literal::Bool(token.lexeme == "true")),
        TokenKind::NullVal => Ok(Literal::Null),
        other => Err(CodegenError::bug(format!("token kind {other:?} is not a simple rvalue"))),
    }
}

/// Decodes the two-character `\n`/`\t` escape sequences the lexer leaves
/// raw in a string literal's lexeme (spec §4.4, §4.1).
fn decode_escapes(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.peek() {
                Some('n') => {
                    out.push('\n');
                    chars.next();
                }
                Some('t') => {
                    out.push('\t');
                    chars.next();
                }
                _ => out.push(c),
            }
        } else {
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::decode_escapes;

    #[test]
    fn decodes_newline_and_tab_escapes() {
        assert_eq!(decode_escapes(r"a\nb\tc"), "a\nb\tc");
    }

    #[test]
    fn leaves_unrelated_backslash_sequences_alone() {
        assert_eq!(decode_escapes(r"a\qb"), r"a\qb");
    }
}
