//! Runtime fault type — spec §7's `VMError`.

/// A fatal (non-trappable, or trappable-but-uncaught) runtime fault.
///
/// Located by the function and program counter of the trapping
/// instruction rather than a source [`crate::token::Span`] — by the time
/// the VM runs, source positions have already been erased from the
/// compiled templates (spec §7: "VM errors include the function name and
/// the program counter of the trapping instruction").
#[derive(Debug)]
pub struct VmError {
    pub message: String,
    pub function_name: String,
    pub pc: usize,
}

impl VmError {
    pub fn new(message: impl Into<String>, function_name: impl Into<String>, pc: usize) -> Self {
        VmError {
            message: message.into(),
            function_name: function_name.into(),
            pc,
        }
    }
}

impl std::fmt::Display for VmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "VM Error: {} in '{}' at instruction {}",
            self.message, self.function_name, self.pc
        )
    }
}

impl std::error::Error for VmError {}
