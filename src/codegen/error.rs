//! Code generation errors — spec §7 groups these under the broader
//! "fatal to the current phase" error family.
//!
//! The checker rejects every program that would trip one of these; a
//! `CodegenError` firing means the checker's invariants were violated, so
//! every message names itself as a compiler bug rather than a user error.

#[derive(Debug)]
pub struct CodegenError {
    pub message: String,
}

impl CodegenError {
    pub fn bug(message: impl Into<String>) -> Self {
        CodegenError { message: message.into() }
    }
}

impl std::fmt::Display for CodegenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Codegen Error: {} (this is a compiler bug)", self.message)
    }
}

impl std::error::Error for CodegenError {}
