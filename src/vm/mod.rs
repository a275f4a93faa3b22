//! Stack-based bytecode interpreter (spec §4.5).
//!
//! # Module Structure
//!
//! - [`value`] — [`Value`], the runtime value representation
//! - [`error`] — [`VmError`]
//! - `frame` — [`frame::Frame`], a function activation record
//! - `try_handler` — [`try_handler::TryHandler`], the exception-routing
//!   upgrade described in spec §9

mod frame;
mod try_handler;
pub mod value;

#[cfg(test)]
mod tests;

pub use error::VmError;
pub use value::Value;

mod error;

use std::collections::HashMap;
use std::io::Write as _;

use log::trace;

use crate::codegen::{FrameTemplate, Literal, Opcode};

use frame::Frame;
use try_handler::TryHandler;

/// The two heaps (spec §5): object id → field map, and object id → element
/// vector. Oids are monotonically allocated and never reused, starting at
/// 2024 to match the reference implementation's counter seed.
pub struct Vm {
    templates: Vec<FrameTemplate>,
    struct_heap: HashMap<u64, HashMap<String, Value>>,
    array_heap: HashMap<u64, Vec<Value>>,
    next_obj_id: u64,
    call_stack: Vec<Frame>,
    try_handlers: Vec<TryHandler>,
    trace: bool,
}

impl Vm {
    pub fn new(templates: Vec<FrameTemplate>) -> Self {
        Vm {
            templates,
            struct_heap: HashMap::new(),
            array_heap: HashMap::new(),
            next_obj_id: 2024,
            call_stack: Vec::new(),
            try_handlers: Vec::new(),
            trace: false,
        }
    }

    /// Runs the program to completion, reading from and writing to the
    /// process's standard streams.
    pub fn run(&mut self) -> Result<(), VmError> {
        self.run_io(&mut std::io::stdin().lock(), &mut std::io::stdout().lock())
    }

    /// Like [`Vm::run`], but logs every dispatched opcode at `trace` level
    /// (ambient `--trace` CLI flag; gated by `RUST_LOG`).
    pub fn run_with_trace(&mut self) -> Result<(), VmError> {
        self.trace = true;
        self.run()
    }

    /// Pretty-dumps every frame template's instructions, one per line,
    /// prefixed with its index — used by the `--trace` flag's startup dump.
    pub fn dump_templates(&self) -> String {
        let mut out = String::new();
        for template in &self.templates {
            out.push_str(&format!(
                "fn {}({} args):\n",
                template.function_name, template.arg_count
            ));
            for (i, instr) in template.instructions.iter().enumerate() {
                out.push_str(&format!("  {i:4}: {instr:?}\n"));
            }
        }
        out
    }

    /// Runs the program against in-memory buffers instead of the process's
    /// standard streams. Used by integration tests that need to assert on
    /// captured output without a subprocess.
    pub fn run_io(
        &mut self,
        input: &mut dyn std::io::BufRead,
        output: &mut dyn std::io::Write,
    ) -> Result<(), VmError> {
        let main_index = self
            .templates
            .iter()
            .position(|t| t.function_name == "main")
            .ok_or_else(|| VmError::new("missing 'main' function", "<none>", 0))?;

        self.call_stack.push(Frame::new(main_index, 0));

        while let Some(frame) = self.call_stack.last() {
            let template = &self.templates[frame.template_index];
            if frame.pc >= template.instructions.len() {
                // Fell off the end without an explicit RET; treat as a
                // `RET null` (codegen always appends one, but this keeps
                // the interpreter well-defined if a template is hand-built).
                self.exec_ret()?;
                continue;
            }

            let pc = frame.pc;
            let instr = template.instructions[pc].clone();
            let function_name = template.function_name.clone();

            if self.trace {
                trace!("{function_name}@{pc}: {instr:?}");
            }

            self.call_stack.last_mut().unwrap().pc += 1;

            match self.exec(&instr, &function_name, pc, input, output) {
                Ok(()) => {}
                Err(fault) if fault.trappable => {
                    if !self.recover(&fault.error) {
                        return Err(fault.error);
                    }
                }
                Err(fault) => return Err(fault.error),
            }

            if self.call_stack.is_empty() {
                break;
            }
        }

        output.flush().ok();
        Ok(())
    }

    /// Pops handlers until one is found, truncates the call stack back to
    /// where it stood at `TRY_START`, and resumes at its `CATCH_START`.
    /// Returns `false` if no handler is active (fault is fatal).
    fn recover(&mut self, _error: &VmError) -> bool {
        let Some(handler) = self.try_handlers.pop() else {
            return false;
        };
        self.call_stack.truncate(handler.frame_depth);
        if let Some(frame) = self.call_stack.last_mut() {
            frame.pc = handler.catch_pc;
            true
        } else {
            false
        }
    }

    fn exec(
        &mut self,
        instr: &Opcode,
        function_name: &str,
        pc: usize,
        input: &mut dyn std::io::BufRead,
        output: &mut dyn std::io::Write,
    ) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));

        match instr {
            Opcode::Push(lit) => {
                self.push(literal_to_value(lit));
            }
            Opcode::Pop => {
                self.pop(function_name, pc)?;
            }
            Opcode::Store(slot) => {
                let value = self.pop(function_name, pc)?;
                self.top_frame().store(*slot, value);
            }
            Opcode::Load(slot) => {
                let value = self.top_frame().load(*slot);
                self.push(value);
            }
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => {
                self.exec_arith(instr, function_name, pc)?;
            }
            Opcode::And | Opcode::Or => {
                self.exec_bool_op(instr, function_name, pc)?;
            }
            Opcode::Not => {
                let value = self.pop(function_name, pc)?;
                match value {
                    Value::Bool(b) => self.push(Value::Bool(!b)),
                    other => return Err(err(format!("'not' requires a 'bool', found '{}'", other.type_name()))),
                }
            }
            Opcode::CmpLt | Opcode::CmpLe | Opcode::CmpEq | Opcode::CmpNe => {
                self.exec_compare(instr, function_name, pc)?;
            }
            Opcode::Jmp(target) => {
                self.top_frame().pc = *target;
            }
            Opcode::Jmpf(target) => {
                let value = self.pop(function_name, pc)?;
                match value {
                    Value::Bool(false) => self.top_frame().pc = *target,
                    Value::Bool(true) => {}
                    other => {
                        return Err(err(format!(
                            "'JMPF' requires a 'bool' condition, found '{}'",
                            other.type_name()
                        )))
                    }
                }
            }
            Opcode::Call(name) => {
                self.exec_call(name, function_name, pc)?;
            }
            Opcode::Ret => {
                self.exec_ret()?;
            }
            Opcode::Write => {
                let value = self.pop(function_name, pc)?;
                write!(output, "{value}").ok();
            }
            Opcode::Read => {
                let mut line = String::new();
                input.read_line(&mut line).ok();
                let trimmed = line.trim_end_matches(['\n', '\r']).to_string();
                self.push(Value::Str(trimmed));
            }
            Opcode::ToInt => {
                self.exec_to_int(function_name, pc)?;
            }
            Opcode::ToDbl => {
                self.exec_to_dbl(function_name, pc)?;
            }
            Opcode::ToStr => {
                let value = self.pop(function_name, pc)?;
                let s = match value {
                    Value::Int(n) => n.to_string(),
                    Value::Double(n) => value::format_double(n),
                    other => {
                        return Err(err(format!(
                            "cannot convert '{}' to 'string'",
                            other.type_name()
                        )))
                    }
                };
                self.push(Value::Str(s));
            }
            Opcode::Len => {
                let value = self.pop(function_name, pc)?;
                let len = match value {
                    Value::Str(s) => s.chars().count(),
                    Value::Array(oid) => self
                        .array_heap
                        .get(&oid)
                        .ok_or_else(|| err(format!("unknown array object {oid}")))?
                        .len(),
                    other => {
                        return Err(err(format!(
                            "'length' requires a 'string' or array, found '{}'",
                            other.type_name()
                        )))
                    }
                };
                self.push(Value::Int(len as i64));
            }
            Opcode::Getc => {
                self.exec_getc(function_name, pc)?;
            }
            Opcode::Allocs => {
                let oid = self.alloc_id();
                self.struct_heap.insert(oid, HashMap::new());
                self.push(Value::Struct(oid));
            }
            Opcode::Setf(field) => {
                self.exec_setf(field, function_name, pc)?;
            }
            Opcode::Getf(field) => {
                self.exec_getf(field, function_name, pc)?;
            }
            Opcode::Alloca => {
                let n = self.pop(function_name, pc)?;
                let n = match n {
                    Value::Int(n) if n >= 0 => n as usize,
                    Value::Int(_) => return Err(err("array size must be non-negative".to_string())),
                    other => {
                        return Err(err(format!(
                            "array size must be 'int', found '{}'",
                            other.type_name()
                        )))
                    }
                };
                let oid = self.alloc_id();
                self.array_heap.insert(oid, vec![Value::Null; n]);
                self.push(Value::Array(oid));
            }
            Opcode::Seti => {
                self.exec_seti(function_name, pc)?;
            }
            Opcode::Geti => {
                self.exec_geti(function_name, pc)?;
            }
            Opcode::Dup => {
                let value = self.top_frame().stack.last().cloned().ok_or_else(|| {
                    err("'DUP' on an empty operand stack".to_string())
                })?;
                self.push(value);
            }
            Opcode::Nop => {}
            Opcode::TryStart => {
                self.exec_try_start(function_name, pc);
            }
            Opcode::TryEnd => {
                self.try_handlers.pop();
            }
            Opcode::CatchStart | Opcode::CatchEnd => {}
        }
        Ok(())
    }

    /// Finds the `CATCH_START` matching this `TRY_START`, by tracking
    /// nested `TRY_START`/`TRY_END` pairs rather than scanning for the
    /// nearest `CATCH_START` — a try body containing its own nested
    /// try/catch must skip past the inner pair's catch to find its own.
    fn exec_try_start(&mut self, function_name: &str, pc: usize) {
        let frame_depth = self.call_stack.len();
        let template = &self.templates[self.call_stack[frame_depth - 1].template_index];
        let mut depth = 0usize;
        let mut catch_pc = None;
        for (offset, instr) in template.instructions[pc + 1..].iter().enumerate() {
            match instr {
                Opcode::TryStart => depth += 1,
                Opcode::TryEnd if depth == 0 => {
                    catch_pc = Some(pc + 1 + offset + 1);
                    break;
                }
                Opcode::TryEnd => depth -= 1,
                _ => {}
            }
        }
        let catch_pc = catch_pc
            .unwrap_or_else(|| panic!("TRY_START in '{function_name}' with no matching CATCH_START"));
        self.try_handlers.push(TryHandler { catch_pc, frame_depth });
    }

    fn exec_arith(&mut self, op: &Opcode, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        let x = self.pop(function_name, pc)?;
        let y = self.pop(function_name, pc)?;
        let result = match (&y, &x) {
            (Value::Int(a), Value::Int(b)) => match op {
                Opcode::Add => Value::Int(a + b),
                Opcode::Sub => Value::Int(a - b),
                Opcode::Mul => Value::Int(a * b),
                Opcode::Div => {
                    if *b == 0 {
                        return Err(err("division by zero".to_string()));
                    }
                    Value::Int(floor_div(*a, *b))
                }
                _ => unreachable!(),
            },
            (Value::Double(a), Value::Double(b)) => match op {
                Opcode::Add => Value::Double(a + b),
                Opcode::Sub => Value::Double(a - b),
                Opcode::Mul => Value::Double(a * b),
                Opcode::Div => {
                    if *b == 0.0 {
                        return Err(err("division by zero".to_string()));
                    }
                    Value::Double(a / b)
                }
                _ => unreachable!(),
            },
            (Value::Str(a), Value::Str(b)) if matches!(op, Opcode::Add) => Value::Str(format!("{a}{b}")),
            (a, b) => {
                return Err(err(format!(
                    "arithmetic requires matching numeric operands, found '{}' and '{}'",
                    a.type_name(),
                    b.type_name()
                )))
            }
        };
        self.push(result);
        Ok(())
    }

    fn exec_bool_op(&mut self, op: &Opcode, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        let x = self.pop(function_name, pc)?;
        let y = self.pop(function_name, pc)?;
        let (Value::Bool(a), Value::Bool(b)) = (&y, &x) else {
            return Err(err(format!(
                "boolean operator requires 'bool' operands, found '{}' and '{}'",
                y.type_name(),
                x.type_name()
            )));
        };
        let result = match op {
            Opcode::And => *a && *b,
            Opcode::Or => *a || *b,
            _ => unreachable!(),
        };
        self.push(Value::Bool(result));
        Ok(())
    }

    fn exec_compare(&mut self, op: &Opcode, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        let x = self.pop(function_name, pc)?;
        let y = self.pop(function_name, pc)?;

        if matches!(op, Opcode::CmpEq | Opcode::CmpNe) {
            let equal = values_equal(&y, &x);
            let result = if matches!(op, Opcode::CmpEq) { equal } else { !equal };
            self.push(Value::Bool(result));
            return Ok(());
        }

        if x.is_null() || y.is_null() {
            return Err(err("comparison operator does not accept 'null'".to_string()));
        }

        let ordering = match (&y, &x) {
            (Value::Int(a), Value::Int(b)) => a.partial_cmp(b),
            (Value::Double(a), Value::Double(b)) => a.partial_cmp(b),
            (Value::Str(a), Value::Str(b)) => a.partial_cmp(b),
            (a, b) => {
                return Err(err(format!(
                    "comparison requires matching ordered operands, found '{}' and '{}'",
                    a.type_name(),
                    b.type_name()
                )))
            }
        };
        let Some(ordering) = ordering else {
            return Err(err("comparison produced no ordering (NaN)".to_string()));
        };
        let result = match op {
            Opcode::CmpLt => ordering.is_lt(),
            Opcode::CmpLe => ordering.is_le(),
            _ => unreachable!(),
        };
        self.push(Value::Bool(result));
        Ok(())
    }

    fn exec_to_int(&mut self, function_name: &str, pc: usize) -> Result<(), Fault> {
        let value = self.pop(function_name, pc)?;
        match value {
            Value::Double(n) => {
                self.push(Value::Int(n as i64));
                Ok(())
            }
            Value::Str(s) => match s.trim().parse::<i64>() {
                Ok(n) => {
                    self.push(Value::Int(n));
                    Ok(())
                }
                Err(_) => Err(Fault::trappable(VmError::new(
                    format!("cannot convert '{s}' to 'int'"),
                    function_name,
                    pc,
                ))),
            },
            other => Err(Fault::fatal(VmError::new(
                format!("cannot convert '{}' to 'int'", other.type_name()),
                function_name,
                pc,
            ))),
        }
    }

    fn exec_to_dbl(&mut self, function_name: &str, pc: usize) -> Result<(), Fault> {
        let value = self.pop(function_name, pc)?;
        match value {
            Value::Int(n) => {
                self.push(Value::Double(n as f64));
                Ok(())
            }
            Value::Str(s) => match s.trim().parse::<f64>() {
                Ok(n) => {
                    self.push(Value::Double(n));
                    Ok(())
                }
                Err(_) => Err(Fault::trappable(VmError::new(
                    format!("cannot convert '{s}' to 'double'"),
                    function_name,
                    pc,
                ))),
            },
            other => Err(Fault::fatal(VmError::new(
                format!("cannot convert '{}' to 'double'", other.type_name()),
                function_name,
                pc,
            ))),
        }
    }

    fn exec_getc(&mut self, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        // `get(int, string)` pushes its args left to right, so the string
        // (pushed second) is on top and pops first.
        let s = self.pop(function_name, pc)?;
        let index = self.pop(function_name, pc)?;
        let (Value::Int(index), Value::Str(s)) = (&index, &s) else {
            return Err(err(format!(
                "'get' requires ('int', 'string'), found ('{}', '{}')",
                index.type_name(),
                s.type_name()
            )));
        };
        let chars: Vec<char> = s.chars().collect();
        if *index < 0 || *index as usize >= chars.len() {
            return Err(Fault::trappable(VmError::new(
                format!("string index {index} out of range"),
                function_name,
                pc,
            )));
        }
        self.push(Value::Str(chars[*index as usize].to_string()));
        Ok(())
    }

    fn exec_setf(&mut self, field: &str, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        let value = self.pop(function_name, pc)?;
        let oid_value = self.pop(function_name, pc)?;
        let Value::Struct(oid) = oid_value else {
            return Err(err(format!("'SETF' requires a struct, found '{}'", oid_value.type_name())));
        };
        let fields = self
            .struct_heap
            .get_mut(&oid)
            .ok_or_else(|| err(format!("unknown struct object {oid}")))?;
        fields.insert(field.to_string(), value);
        Ok(())
    }

    fn exec_getf(&mut self, field: &str, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        let oid_value = self.pop(function_name, pc)?;
        let Value::Struct(oid) = oid_value else {
            return Err(err(format!("'GETF' requires a struct, found '{}'", oid_value.type_name())));
        };
        let fields = self
            .struct_heap
            .get(&oid)
            .ok_or_else(|| err(format!("unknown struct object {oid}")))?;
        let value = fields.get(field).cloned().unwrap_or(Value::Null);
        self.push(value);
        Ok(())
    }

    fn exec_seti(&mut self, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        let value = self.pop(function_name, pc)?;
        let index = self.pop(function_name, pc)?;
        let oid_value = self.pop(function_name, pc)?;
        let Value::Array(oid) = oid_value else {
            return Err(err(format!("'SETI' requires an array, found '{}'", oid_value.type_name())));
        };
        let Value::Int(index) = index else {
            return Err(err(format!("array index must be 'int', found '{}'", index.type_name())));
        };
        let elements = self
            .array_heap
            .get_mut(&oid)
            .ok_or_else(|| err(format!("unknown array object {oid}")))?;
        if index < 0 || index as usize >= elements.len() {
            return Err(Fault::trappable(VmError::new(
                format!("array index {index} out of range"),
                function_name,
                pc,
            )));
        }
        elements[index as usize] = value;
        Ok(())
    }

    fn exec_geti(&mut self, function_name: &str, pc: usize) -> Result<(), Fault> {
        let err = |message: String| Fault::fatal(VmError::new(message, function_name, pc));
        let index = self.pop(function_name, pc)?;
        let oid_value = self.pop(function_name, pc)?;
        let Value::Array(oid) = oid_value else {
            return Err(err(format!("'GETI' requires an array, found '{}'", oid_value.type_name())));
        };
        let Value::Int(index) = index else {
            return Err(err(format!("array index must be 'int', found '{}'", index.type_name())));
        };
        let elements = self
            .array_heap
            .get(&oid)
            .ok_or_else(|| err(format!("unknown array object {oid}")))?;
        if index < 0 || index as usize >= elements.len() {
            return Err(Fault::trappable(VmError::new(
                format!("array index {index} out of range"),
                function_name,
                pc,
            )));
        }
        self.push(elements[index as usize].clone());
        Ok(())
    }

    fn exec_call(&mut self, name: &str, function_name: &str, pc: usize) -> Result<(), Fault> {
        let target_index = self
            .templates
            .iter()
            .position(|t| t.function_name == name)
            .ok_or_else(|| Fault::fatal(VmError::new(format!("call to undefined function '{name}'"), function_name, pc)))?;
        let arg_count = self.templates[target_index].arg_count;

        let mut args = Vec::with_capacity(arg_count);
        for _ in 0..arg_count {
            args.push(self.pop(function_name, pc)?);
        }

        let mut callee = Frame::new(target_index, arg_count);
        // Caller pushed args left-to-right, so the last-pushed (first
        // popped) argument is the rightmost parameter; pushing in pop
        // order here reverses that back to declaration order (spec §4.5).
        callee.stack = args;
        self.call_stack.push(callee);
        Ok(())
    }

    fn exec_ret(&mut self) -> Result<(), Fault> {
        let mut finished = self
            .call_stack
            .pop()
            .expect("RET is only ever reached with an active frame");
        let value = finished.stack.pop().unwrap_or(Value::Null);
        if let Some(caller) = self.call_stack.last_mut() {
            caller.stack.push(value);
        }
        Ok(())
    }

    fn alloc_id(&mut self) -> u64 {
        let id = self.next_obj_id;
        self.next_obj_id += 1;
        id
    }

    fn top_frame(&mut self) -> &mut Frame {
        self.call_stack.last_mut().expect("dispatch loop only runs with an active frame")
    }

    fn push(&mut self, value: Value) {
        self.top_frame().stack.push(value);
    }

    fn pop(&mut self, function_name: &str, pc: usize) -> Result<Value, Fault> {
        self.top_frame()
            .stack
            .pop()
            .ok_or_else(|| Fault::fatal(VmError::new("operand stack underflow", function_name, pc)))
    }
}

impl std::fmt::Debug for Vm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vm")
            .field("next_obj_id", &self.next_obj_id)
            .field("call_depth", &self.call_stack.len())
            .field("try_handlers", &self.try_handlers.len())
            .finish()
    }
}

/// A dispatch-time failure, tagged with whether it belongs to the
/// trappable set (spec §4.5, §7).
struct Fault {
    error: VmError,
    trappable: bool,
}

impl Fault {
    fn fatal(error: VmError) -> Self {
        Fault { error, trappable: false }
    }

    fn trappable(error: VmError) -> Self {
        Fault { error, trappable: true }
    }
}

fn literal_to_value(lit: &Literal) -> Value {
    match lit {
        Literal::Int(n) => Value::Int(*n),
        Literal::Double(n) => Value::Double(*n),
        Literal::Bool(b) => Value::Bool(*b),
        Literal::Str(s) => Value::Str(s.clone()),
        Literal::Null => Value::Null,
    }
}

/// Integer division that rounds toward negative infinity, matching the
/// reference VM's `math.floor(y / x)` (spec §4.5: "integer `MUL`/`DIV`
/// with two integers floors the result to an integer"). Rust's `/`
/// truncates toward zero and `div_euclid` rounds toward the sign of the
/// divisor, neither of which floors when the divisor is negative.
fn floor_div(a: i64, b: i64) -> i64 {
    let q = a / b;
    let r = a % b;
    if r != 0 && (r < 0) != (b < 0) {
        q - 1
    } else {
        q
    }
}

fn values_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Null, _) | (_, Value::Null) => false,
        (Value::Int(x), Value::Int(y)) => x == y,
        (Value::Double(x), Value::Double(y)) => x == y,
        (Value::Bool(x), Value::Bool(y)) => x == y,
        (Value::Str(x), Value::Str(y)) => x == y,
        (Value::Struct(x), Value::Struct(y)) => x == y,
        (Value::Array(x), Value::Array(y)) => x == y,
        _ => false,
    }
}
