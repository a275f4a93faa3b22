//! Expression, term, and rvalue typing (spec §4.3).

use crate::ast::{CallExpr, Expr, NewRValue, RValue, Term, VarRef};
use crate::token::TokenKind;

use super::types::TypeKind;
use super::{is_printable, SemanticChecker, SemanticError, Ty};

/// Operators requiring matched `int`/`double` operands, excluding `+`
/// (which also accepts `string`).
const ARITH_NO_PLUS: &[TokenKind] = &[TokenKind::Minus, TokenKind::Times, TokenKind::Divide];

/// Ordering comparisons: `int`, `double`, `string`, but not `bool`.
const ORDER_COMPARISONS: &[TokenKind] =
    &[TokenKind::Less, TokenKind::LessEq, TokenKind::Greater, TokenKind::GreaterEq];

impl SemanticChecker {
    /// Infers the type of an expression, walking its flat right-leaning
    /// chain literally (spec §3, §9) rather than by precedence.
    pub(crate) fn check_expr(&mut self, expr: &Expr) -> Result<Ty, SemanticError> {
        let first_ty = self.check_term(&expr.first)?;

        if expr.not_op {
            if expr.op.is_some() {
                // Grammar guarantees `not` only wraps a simple term; this
                // path is unreachable for a parser-produced AST.
                return Err(SemanticError::without_span(
                    "'not' cannot be combined with a binary operator",
                ));
            }
            if first_ty.is_array || first_ty.kind != TypeKind::Bool {
                return Err(SemanticError::without_span("'not' requires a 'bool' operand"));
            }
            return Ok(Ty::bool());
        }

        let (Some(op), Some(rest)) = (&expr.op, &expr.rest) else {
            return Ok(first_ty);
        };
        let rest_ty = self.check_expr(rest)?;

        self.check_binary_op(op.kind, &first_ty, &rest_ty, op.span)
    }

    fn check_binary_op(
        &self,
        op: TokenKind,
        lhs: &Ty,
        rhs: &Ty,
        span: crate::token::Span,
    ) -> Result<Ty, SemanticError> {
        use TokenKind::*;

        match op {
            And | Or => {
                if lhs.is_array || rhs.is_array || lhs.kind != TypeKind::Bool || rhs.kind != TypeKind::Bool {
                    return Err(SemanticError::new(
                        format!("{} requires both operands to be 'bool'", op.describe()),
                        span,
                    ));
                }
                Ok(Ty::bool())
            }
            Equal | NotEqual => {
                if lhs.is_null() || rhs.is_null() || (lhs.is_array == rhs.is_array && lhs.kind == rhs.kind) {
                    Ok(Ty::bool())
                } else {
                    Err(SemanticError::new(
                        format!("cannot compare mismatched types '{lhs}' and '{rhs}'"),
                        span,
                    ))
                }
            }
            Plus => {
                if lhs.is_array || rhs.is_array || lhs.kind != rhs.kind {
                    return Err(SemanticError::new(
                        format!("'+' requires matching 'int', 'double', or 'string' operands, found '{lhs}' and '{rhs}'"),
                        span,
                    ));
                }
                match lhs.kind {
                    TypeKind::Int | TypeKind::Double | TypeKind::String => Ok(lhs.clone()),
                    _ => Err(SemanticError::new(
                        format!("'+' is not defined for '{lhs}'"),
                        span,
                    )),
                }
            }
            op if ARITH_NO_PLUS.contains(&op) => {
                if lhs.is_array || rhs.is_array || lhs.kind != rhs.kind {
                    return Err(SemanticError::new(
                        format!(
                            "{} requires matching 'int' or 'double' operands, found '{lhs}' and '{rhs}'",
                            op.describe()
                        ),
                        span,
                    ));
                }
                match lhs.kind {
                    TypeKind::Int | TypeKind::Double => Ok(lhs.clone()),
                    _ => Err(SemanticError::new(
                        format!("{} is not defined for '{lhs}'", op.describe()),
                        span,
                    )),
                }
            }
            op if ORDER_COMPARISONS.contains(&op) => {
                if lhs.is_array || rhs.is_array || lhs.kind != rhs.kind {
                    return Err(SemanticError::new(
                        format!(
                            "{} requires matching 'int', 'double', or 'string' operands, found '{lhs}' and '{rhs}'",
                            op.describe()
                        ),
                        span,
                    ));
                }
                match lhs.kind {
                    TypeKind::Int | TypeKind::Double | TypeKind::String => Ok(Ty::bool()),
                    _ => Err(SemanticError::new(
                        format!("{} is not defined for '{lhs}'", op.describe()),
                        span,
                    )),
                }
            }
            _ => unreachable!("parser never attaches {op:?} as a binary operator"),
        }
    }

    fn check_term(&mut self, term: &Term) -> Result<Ty, SemanticError> {
        match term {
            Term::Simple(rvalue) => self.check_rvalue(rvalue),
            Term::Complex(expr) => self.check_expr(expr),
        }
    }

    fn check_rvalue(&mut self, rvalue: &RValue) -> Result<Ty, SemanticError> {
        match rvalue {
            RValue::Simple(token) => Ok(match token.kind {
                TokenKind::IntVal => Ty::int(),
                TokenKind::DoubleVal => Ty::double(),
                TokenKind::StringVal => Ty::string(),
                TokenKind::BoolVal => Ty::bool(),
                TokenKind::NullVal => Ty::void(),
                other => unreachable!("parser never produces a simple rvalue of kind {other:?}"),
            }),
            RValue::New(new_rvalue) => self.check_new_rvalue(new_rvalue),
            RValue::Call(call) => self.check_call(call),
            RValue::Var(path) => self.check_var_path(path),
        }
    }

    fn check_new_rvalue(&mut self, new_rvalue: &NewRValue) -> Result<Ty, SemanticError> {
        let type_name = new_rvalue.type_name.lexeme.as_str();

        if let Some(size_expr) = &new_rvalue.array_expr {
            let size_ty = self.check_expr(size_expr)?;
            if size_ty.is_array || size_ty.kind != TypeKind::Int {
                return Err(SemanticError::new(
                    "array size must be of type 'int'",
                    new_rvalue.type_name.span,
                ));
            }
            let kind = self.base_or_struct_kind(type_name, new_rvalue.type_name.span)?;
            return Ok(Ty::array(kind));
        }

        let params = new_rvalue
            .struct_params
            .as_ref()
            .expect("NewRValue always carries array_expr xor struct_params");

        let info = self.struct_info(type_name).cloned().ok_or_else(|| {
            SemanticError::new(format!("undefined struct '{type_name}'"), new_rvalue.type_name.span)
        })?;

        if params.len() != info.fields.len() {
            return Err(SemanticError::new(
                format!(
                    "struct '{type_name}' expects {} argument(s), found {}",
                    info.fields.len(),
                    params.len()
                ),
                new_rvalue.type_name.span,
            ));
        }

        for (param_expr, (field_name, field_ty)) in params.iter().zip(&info.fields) {
            let actual = self.check_expr(param_expr)?;
            if !super::types::assignment_compatible(field_ty, &actual) {
                return Err(SemanticError::new(
                    format!("field '{field_name}' expects '{field_ty}', found '{actual}'"),
                    new_rvalue.type_name.span,
                ));
            }
        }

        Ok(Ty::scalar(TypeKind::Struct(type_name.to_string())))
    }

    fn base_or_struct_kind(
        &self,
        name: &str,
        span: crate::token::Span,
    ) -> Result<TypeKind, SemanticError> {
        Ok(match name {
            "int" => TypeKind::Int,
            "double" => TypeKind::Double,
            "bool" => TypeKind::Bool,
            "string" => TypeKind::String,
            other if self.struct_info(other).is_some() => TypeKind::Struct(other.to_string()),
            other => return Err(SemanticError::new(format!("undefined type '{other}'"), span)),
        })
    }

    fn check_call(&mut self, call: &CallExpr) -> Result<Ty, SemanticError> {
        match call.name.lexeme.as_str() {
            "print" => {
                self.expect_arg_count(call, 1)?;
                let arg_ty = self.check_expr(&call.args[0])?;
                if !is_printable(&arg_ty) {
                    return Err(SemanticError::new(
                        format!("'print' requires a non-array base type, found '{arg_ty}'"),
                        call.name.span,
                    ));
                }
                Ok(Ty::void())
            }
            "input" => {
                self.expect_arg_count(call, 0)?;
                Ok(Ty::string())
            }
            "itos" => self.check_unary_builtin(call, Ty::int(), Ty::string()),
            "itod" => self.check_unary_builtin(call, Ty::int(), Ty::double()),
            "dtos" => self.check_unary_builtin(call, Ty::double(), Ty::string()),
            "dtoi" => self.check_unary_builtin(call, Ty::double(), Ty::int()),
            "stoi" => self.check_unary_builtin(call, Ty::string(), Ty::int()),
            "stod" => self.check_unary_builtin(call, Ty::string(), Ty::double()),
            "length" => {
                self.expect_arg_count(call, 1)?;
                let arg_ty = self.check_expr(&call.args[0])?;
                if arg_ty.is_array || arg_ty.kind == TypeKind::String {
                    Ok(Ty::int())
                } else {
                    Err(SemanticError::new(
                        format!("'length' requires a 'string' or array, found '{arg_ty}'"),
                        call.name.span,
                    ))
                }
            }
            "get" => {
                self.expect_arg_count(call, 2)?;
                let index_ty = self.check_expr(&call.args[0])?;
                let str_ty = self.check_expr(&call.args[1])?;
                if index_ty.is_array || index_ty.kind != TypeKind::Int {
                    return Err(SemanticError::new("'get' expects an 'int' index", call.name.span));
                }
                if str_ty.is_array || str_ty.kind != TypeKind::String {
                    return Err(SemanticError::new("'get' expects a 'string'", call.name.span));
                }
                Ok(Ty::string())
            }
            name => self.check_user_call(name, call),
        }
    }

    fn check_unary_builtin(&mut self, call: &CallExpr, param: Ty, result: Ty) -> Result<Ty, SemanticError> {
        self.expect_arg_count(call, 1)?;
        let arg_ty = self.check_expr(&call.args[0])?;
        if arg_ty != param {
            return Err(SemanticError::new(
                format!("'{}' expects '{param}', found '{arg_ty}'", call.name.lexeme),
                call.name.span,
            ));
        }
        Ok(result)
    }

    fn expect_arg_count(&self, call: &CallExpr, expected: usize) -> Result<(), SemanticError> {
        if call.args.len() != expected {
            return Err(SemanticError::new(
                format!(
                    "'{}' expects {expected} argument(s), found {}",
                    call.name.lexeme,
                    call.args.len()
                ),
                call.name.span,
            ));
        }
        Ok(())
    }

    fn check_user_call(&mut self, name: &str, call: &CallExpr) -> Result<Ty, SemanticError> {
        let info = self
            .fun_info(name)
            .cloned()
            .ok_or_else(|| SemanticError::new(format!("undefined function '{name}'"), call.name.span))?;

        if call.args.len() != info.params.len() {
            return Err(SemanticError::new(
                format!(
                    "'{name}' expects {} argument(s), found {}",
                    info.params.len(),
                    call.args.len()
                ),
                call.name.span,
            ));
        }

        for (arg_expr, param_ty) in call.args.iter().zip(&info.params) {
            let arg_ty = self.check_expr(arg_expr)?;
            if !super::types::assignment_compatible(param_ty, &arg_ty) {
                return Err(SemanticError::new(
                    format!("'{name}' expects '{param_ty}', found '{arg_ty}'"),
                    call.name.span,
                ));
            }
        }

        Ok(info.return_ty)
    }

    /// Resolves a (possibly dotted/indexed) variable path, threading the
    /// type through each `.field` and `[index]` step (spec §4.3).
    pub(crate) fn check_var_path(&mut self, path: &[VarRef]) -> Result<Ty, SemanticError> {
        let (head, rest) = path.split_first().expect("a variable path is never empty");

        let mut current = self.lookup_var(&head.name)?;
        current = self.apply_index(current, &head.array_index, head.name.span)?;

        for step in rest {
            current = self.step_field(&current, step)?;
            current = self.apply_index(current, &step.array_index, step.name.span)?;
        }

        Ok(current)
    }

    fn apply_index(
        &mut self,
        ty: Ty,
        index: &Option<Box<Expr>>,
        span: crate::token::Span,
    ) -> Result<Ty, SemanticError> {
        let Some(index_expr) = index else {
            return Ok(ty);
        };
        if !ty.is_array {
            return Err(SemanticError::new("cannot index a non-array value", span));
        }
        let index_ty = self.check_expr(index_expr)?;
        if index_ty.is_array || index_ty.kind != TypeKind::Int {
            return Err(SemanticError::new("array index must be of type 'int'", span));
        }
        Ok(Ty::scalar(ty.kind))
    }

    fn step_field(&self, current: &Ty, step: &VarRef) -> Result<Ty, SemanticError> {
        let struct_name = current.struct_name().ok_or_else(|| {
            SemanticError::new(format!("'{}' is not a struct field access", step.name.lexeme), step.name.span)
        })?;
        let info = self
            .struct_info(struct_name)
            .unwrap_or_else(|| panic!("struct '{struct_name}' resolved earlier but missing from table"));
        info.field_ty(&step.name.lexeme).cloned().ok_or_else(|| {
            SemanticError::new(
                format!("struct '{struct_name}' has no field '{}'", step.name.lexeme),
                step.name.span,
            )
        })
    }
}
