//! The checker's internal type representation.
//!
//! Distinct from [`crate::ast::DataType`]: the AST type carries the source
//! token verbatim (needed for spans), while [`Ty`] is the resolved,
//! comparable value the checker threads through every visit — the
//! "explicit typing" upgrade noted in spec §9 over the reference's
//! `self.curr_type` field.

use std::fmt;

use crate::ast::DataType;

/// The base kind of a resolved type, with `Void` standing in for both the
/// `void` return annotation and the type of `null` (spec §4.3).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Int,
    Double,
    Bool,
    String,
    Void,
    Struct(String),
}

/// A fully resolved MyPL type: a base kind plus the `is_array` flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ty {
    pub is_array: bool,
    pub kind: TypeKind,
}

impl Ty {
    pub fn scalar(kind: TypeKind) -> Self {
        Ty { is_array: false, kind }
    }

    pub fn array(kind: TypeKind) -> Self {
        Ty { is_array: true, kind }
    }

    pub fn int() -> Self {
        Ty::scalar(TypeKind::Int)
    }

    pub fn double() -> Self {
        Ty::scalar(TypeKind::Double)
    }

    pub fn bool() -> Self {
        Ty::scalar(TypeKind::Bool)
    }

    pub fn string() -> Self {
        Ty::scalar(TypeKind::String)
    }

    pub fn void() -> Self {
        Ty::scalar(TypeKind::Void)
    }

    /// `null`'s type: the reference represents `null` as a non-array `void`
    /// value (spec §4.3 "`void` ... as the type of `null`").
    pub fn is_null(&self) -> bool {
        !self.is_array && self.kind == TypeKind::Void
    }

    pub fn is_struct(&self) -> bool {
        matches!(self.kind, TypeKind::Struct(_))
    }

    pub fn struct_name(&self) -> Option<&str> {
        match &self.kind {
            TypeKind::Struct(name) => Some(name),
            _ => None,
        }
    }

    /// Builds a `Ty` from a parsed [`DataType`], validating the name
    /// against the known base types, `void`, and declared structs.
    ///
    /// `allow_void` gates whether bare `void` (not `array void`, which is
    /// never legal) is an acceptable name here — only a function's return
    /// type annotation should pass `true`.
    pub fn from_data_type(
        dt: &DataType,
        structs: &std::collections::HashSet<String>,
        allow_void: bool,
    ) -> Option<Ty> {
        let name = dt.name();
        let kind = match name {
            "int" => TypeKind::Int,
            "double" => TypeKind::Double,
            "bool" => TypeKind::Bool,
            "string" => TypeKind::String,
            "void" if allow_void && !dt.is_array => TypeKind::Void,
            "void" => return None,
            other if structs.contains(other) => TypeKind::Struct(other.to_string()),
            _ => return None,
        };
        Some(Ty { is_array: dt.is_array, kind })
    }
}

impl fmt::Display for Ty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match &self.kind {
            TypeKind::Int => "int",
            TypeKind::Double => "double",
            TypeKind::Bool => "bool",
            TypeKind::String => "string",
            TypeKind::Void => "void",
            TypeKind::Struct(name) => name,
        };
        if self.is_array {
            write!(f, "array {name}")
        } else {
            write!(f, "{name}")
        }
    }
}

/// Assignment compatibility (spec §4.3): `null` is compatible with any
/// target, otherwise the array flag and base kind must match exactly.
pub fn assignment_compatible(target: &Ty, value: &Ty) -> bool {
    value.is_null() || (target.is_array == value.is_array && target.kind == value.kind)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn null_is_assignment_compatible_with_anything() {
        assert!(assignment_compatible(&Ty::int(), &Ty::void()));
        assert!(assignment_compatible(&Ty::array(TypeKind::Struct("P".into())), &Ty::void()));
    }

    #[test]
    fn matching_types_are_compatible() {
        assert!(assignment_compatible(&Ty::int(), &Ty::int()));
        assert!(!assignment_compatible(&Ty::int(), &Ty::double()));
        assert!(!assignment_compatible(&Ty::int(), &Ty::array(TypeKind::Int)));
    }
}
