//! The compiled, immutable representation of a function (spec GLOSSARY).

use super::opcode::Opcode;

#[derive(Debug, Clone)]
pub struct FrameTemplate {
    pub function_name: String,
    pub arg_count: usize,
    pub instructions: Vec<Opcode>,
}

impl FrameTemplate {
    pub fn new(function_name: impl Into<String>, arg_count: usize) -> Self {
        FrameTemplate {
            function_name: function_name.into(),
            arg_count,
            instructions: Vec::new(),
        }
    }
}
