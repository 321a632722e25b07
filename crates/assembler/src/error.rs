//! Error types for the procal assembler.

use thiserror::Error;

/// Errors produced while assembling program text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AsmError {
    /// An unrecognized instruction mnemonic was encountered.
    #[error("line {line}: unknown instruction '{token}'")]
    UnknownOpcode { line: usize, token: String },

    /// An instruction did not have its argument.
    #[error("line {line}: {opcode} expects {expected} argument(s)")]
    MissingArgument {
        line: usize,
        opcode: &'static str,
        expected: usize,
    },

    /// A PUSH argument is not a number.
    #[error("line {line}: invalid number '{token}'")]
    InvalidNumber { line: usize, token: String },

    /// A token appeared where it was not expected.
    #[error("line {line}: unexpected token '{token}'")]
    UnexpectedToken { line: usize, token: String },

    /// A quoted string ran to the end of the line.
    #[error("line {line}: unterminated string")]
    UnterminatedString { line: usize },

    /// An instruction appeared before the first FUNC header.
    #[error("line {line}: instruction outside of a FUNC block")]
    InstructionOutsideFunction { line: usize },

    /// Two FUNC headers share a name.
    #[error("line {line}: function '{name}' is already defined")]
    DuplicateFunction { line: usize, name: String },
}
