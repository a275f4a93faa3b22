//! Runtime values (spec §4.5, §5).

use std::fmt;

/// A value on an operand stack, in a variable slot, or inside a heap
/// allocation.
///
/// `Struct`/`Array` are represented indirectly: the value here is just the
/// `oid` handle, the payload lives in [`super::Vm`]'s heaps. Two `Value`s
/// holding the same oid observe each other's writes (spec §5: "shared-by-
/// reference semantics").
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Double(f64),
    Bool(bool),
    Str(String),
    Struct(u64),
    Array(u64),
    Null,
}

impl Value {
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) => "int",
            Value::Double(_) => "double",
            Value::Bool(_) => "bool",
            Value::Str(_) => "string",
            Value::Struct(_) => "struct",
            Value::Array(_) => "array",
            Value::Null => "null",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

/// Formats a double the way the reference VM's `str(x)` does: always with
/// a decimal point, even for a whole-number value (`4.0`, not `4`).
pub fn format_double(n: f64) -> String {
    if n.fract() == 0.0 && n.is_finite() {
        format!("{n:.1}")
    } else {
        n.to_string()
    }
}

/// `WRITE`'s textual rendering: `null` -> "null", booleans -> "true"/"false"
/// (spec §4.5).
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Double(n) => write!(f, "{}", format_double(*n)),
            Value::Bool(b) => write!(f, "{}", if *b { "true" } else { "false" }),
            Value::Str(s) => write!(f, "{s}"),
            Value::Struct(oid) => write!(f, "{oid}"),
            Value::Array(oid) => write!(f, "{oid}"),
            Value::Null => write!(f, "null"),
        }
    }
}
