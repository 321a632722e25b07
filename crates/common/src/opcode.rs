//! Opcode tags for the procal instruction set.
//!
//! An [`Opcode`] is the payload-free kind of an instruction. Its mnemonic is
//! the type tag stored alongside each instruction row, and the word used in
//! program listings.

use crate::error::DecodeError;

/// Identifies the kind of an instruction, independent of its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    // Constants
    /// Push a literal number.
    Push,

    // Arithmetic
    /// Pop a, pop b, push b + a.
    Add,
    /// Pop a, pop b, push b - a.
    Sub,
    /// Pop a, pop b, push b * a.
    Mul,
    /// Pop a, pop b, push b / a. A zero divisor is a runtime error.
    Div,

    // Trigonometry (radians)
    /// Pop a, push sin(a).
    Sin,
    /// Pop a, push cos(a).
    Cos,
    /// Pop a, push tan(a).
    Tan,

    // Stack
    /// Pop a, push a twice.
    Dup,

    // Input
    /// Suspend until a number is supplied from outside.
    Input,

    // Control flow
    /// Jump target marker. No effect when executed.
    Label,
    /// Jump to a label.
    Goto,
    /// Enter a function by name.
    Call,
}

/// All opcodes in listing order.
pub const ALL_OPCODES: [Opcode; 13] = [
    Opcode::Push,
    Opcode::Add,
    Opcode::Sub,
    Opcode::Mul,
    Opcode::Div,
    Opcode::Sin,
    Opcode::Cos,
    Opcode::Tan,
    Opcode::Dup,
    Opcode::Input,
    Opcode::Label,
    Opcode::Goto,
    Opcode::Call,
];

impl Opcode {
    /// The canonical uppercase mnemonic, as stored in instruction rows.
    pub fn mnemonic(&self) -> &'static str {
        match self {
            Opcode::Push => "PUSH",
            Opcode::Add => "ADD",
            Opcode::Sub => "SUB",
            Opcode::Mul => "MUL",
            Opcode::Div => "DIV",
            Opcode::Sin => "SIN",
            Opcode::Cos => "COS",
            Opcode::Tan => "TAN",
            Opcode::Dup => "DUP",
            Opcode::Input => "INPUT",
            Opcode::Label => "LABEL",
            Opcode::Goto => "GOTO",
            Opcode::Call => "CALL",
        }
    }

    /// Look up an opcode by its canonical mnemonic. Case-sensitive.
    pub fn from_mnemonic(mnemonic: &str) -> Result<Self, DecodeError> {
        ALL_OPCODES
            .iter()
            .find(|op| op.mnemonic() == mnemonic)
            .copied()
            .ok_or_else(|| DecodeError::UnknownOpcode(mnemonic.to_string()))
    }

    /// Whether instructions of this kind carry an argument.
    pub fn takes_argument(&self) -> bool {
        matches!(
            self,
            Opcode::Push | Opcode::Input | Opcode::Label | Opcode::Goto | Opcode::Call
        )
    }

    /// Minimum number of stack values the instruction consumes.
    pub fn stack_arity(&self) -> usize {
        match self {
            Opcode::Add | Opcode::Sub | Opcode::Mul | Opcode::Div => 2,
            Opcode::Sin | Opcode::Cos | Opcode::Tan | Opcode::Dup => 1,
            Opcode::Push | Opcode::Input | Opcode::Label | Opcode::Goto | Opcode::Call => 0,
        }
    }
}

impl std::fmt::Display for Opcode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}
