//! Instruction model: payload-carrying operations and their stored rows.
//!
//! An [`Instruction`] is an [`Op`] plus the bookkeeping the store hands out:
//! a stable id, the owning function's id, and the zero-based position within
//! that function. Instructions are immutable once built.
//!
//! The persisted form is an [`InstructionRow`]: a type tag and an optional
//! string argument.
//! ```text
//! id  function_id  position  opcode  arg
//! 7   1            0         PUSH    "2.5"
//! 8   1            1         INPUT   "x?"
//! 9   1            2         ADD     NULL
//! ```

use std::fmt;

use crate::error::DecodeError;
use crate::opcode::Opcode;

/// A single operation together with the payload its kind needs.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Push a literal.
    PushNumber(f64),
    Add,
    Subtract,
    Multiply,
    Divide,
    Sine,
    Cosine,
    Tangent,
    Duplicate,
    /// Ask the driver for a number, showing it this prompt.
    ReadInput(String),
    /// Jump target.
    Label(String),
    /// Jump to the named label.
    Goto(String),
    /// Enter the named function.
    CallFunction(String),
}

impl Op {
    /// The payload-free kind of this operation.
    pub fn opcode(&self) -> Opcode {
        match self {
            Op::PushNumber(_) => Opcode::Push,
            Op::Add => Opcode::Add,
            Op::Subtract => Opcode::Sub,
            Op::Multiply => Opcode::Mul,
            Op::Divide => Opcode::Div,
            Op::Sine => Opcode::Sin,
            Op::Cosine => Opcode::Cos,
            Op::Tangent => Opcode::Tan,
            Op::Duplicate => Opcode::Dup,
            Op::ReadInput(_) => Opcode::Input,
            Op::Label(_) => Opcode::Label,
            Op::Goto(_) => Opcode::Goto,
            Op::CallFunction(_) => Opcode::Call,
        }
    }

    /// Build an operation from its kind and the raw stored argument.
    ///
    /// A missing PUSH argument is read as `0.0`; a missing string argument
    /// is read as the empty string.
    pub fn from_parts(opcode: Opcode, arg: Option<&str>) -> Result<Self, DecodeError> {
        let text = || arg.unwrap_or_default().to_string();
        Ok(match opcode {
            Opcode::Push => match arg {
                None => Op::PushNumber(0.0),
                Some(raw) => Op::PushNumber(
                    raw.trim()
                        .parse()
                        .map_err(|_| DecodeError::InvalidNumber(raw.to_string()))?,
                ),
            },
            Opcode::Add => Op::Add,
            Opcode::Sub => Op::Subtract,
            Opcode::Mul => Op::Multiply,
            Opcode::Div => Op::Divide,
            Opcode::Sin => Op::Sine,
            Opcode::Cos => Op::Cosine,
            Opcode::Tan => Op::Tangent,
            Opcode::Dup => Op::Duplicate,
            Opcode::Input => Op::ReadInput(text()),
            Opcode::Label => Op::Label(text()),
            Opcode::Goto => Op::Goto(text()),
            Opcode::Call => Op::CallFunction(text()),
        })
    }

    /// The stored argument for this operation, if its kind carries one.
    pub fn argument(&self) -> Option<String> {
        match self {
            Op::PushNumber(value) => Some(value.to_string()),
            Op::ReadInput(s) | Op::Label(s) | Op::Goto(s) | Op::CallFunction(s) => {
                Some(s.clone())
            }
            _ => None,
        }
    }
}

impl fmt::Display for Op {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mnemonic = self.opcode().mnemonic();
        match self {
            Op::PushNumber(value) => write!(f, "{mnemonic} {value}"),
            Op::ReadInput(prompt) => {
                write!(f, "{mnemonic} \"")?;
                for c in prompt.chars() {
                    if c == '"' || c == '\\' {
                        write!(f, "\\")?;
                    }
                    write!(f, "{c}")?;
                }
                write!(f, "\"")
            }
            Op::Label(name) | Op::Goto(name) | Op::CallFunction(name) => {
                write!(f, "{mnemonic} {name}")
            }
            _ => f.write_str(mnemonic),
        }
    }
}

/// An instruction as handed out by the store.
#[derive(Debug, Clone, PartialEq)]
pub struct Instruction {
    /// Stable identity from storage.
    pub id: i64,
    /// Identity of the owning function.
    pub function_id: i64,
    /// Zero-based index within the owning function.
    pub position: usize,
    /// What the instruction does.
    pub op: Op,
}

impl Instruction {
    /// Create a new instruction.
    pub fn new(id: i64, function_id: i64, position: usize, op: Op) -> Self {
        Self {
            id,
            function_id,
            position,
            op,
        }
    }

    /// Decode a stored row.
    pub fn from_row(row: &InstructionRow) -> Result<Self, DecodeError> {
        let opcode = Opcode::from_mnemonic(&row.opcode)?;
        let op = Op::from_parts(opcode, row.arg.as_deref())?;
        Ok(Self::new(row.id, row.function_id, row.position, op))
    }

    /// Encode this instruction as a stored row.
    pub fn to_row(&self) -> InstructionRow {
        InstructionRow {
            id: self.id,
            function_id: self.function_id,
            position: self.position,
            opcode: self.op.opcode().mnemonic().to_string(),
            arg: self.op.argument(),
        }
    }
}

/// The persisted shape of an instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstructionRow {
    pub id: i64,
    pub function_id: i64,
    pub position: usize,
    /// Type tag, one of the [`Opcode`] mnemonics.
    pub opcode: String,
    pub arg: Option<String>,
}
