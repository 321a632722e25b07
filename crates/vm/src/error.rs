//! Runtime errors for the procal engine.
//!
//! Nothing is validated before a run starts, so every problem with a stored
//! program surfaces here: at `start` for a missing entry point, or while
//! stepping for everything else. Stepping errors carry the location of the
//! instruction that failed.

use std::fmt;

use procal_common::Opcode;
use thiserror::Error;

/// A cursor into the program: function name and zero-based position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub function: String,
    pub position: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.function, self.position)
    }
}

/// Errors raised by `start`, the stepping operations and `provide_input`.
///
/// A stepping error leaves the engine exactly as it was before the failing
/// instruction: still running, cursor unchanged, stack untouched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RuntimeError {
    /// `start` was called before any functions were loaded.
    #[error("no program loaded")]
    NoProgramLoaded,

    /// The loaded program has no entry point.
    #[error("no 'main' function found")]
    NoMainFunction,

    /// The instruction needs more values than the stack holds.
    #[error("not enough values on stack for {operation} at {at}")]
    StackUnderflow { operation: Opcode, at: Location },

    /// DIV with a zero divisor on top of the stack.
    #[error("division by zero at {at}")]
    DivisionByZero { at: Location },

    /// GOTO names a label that no function defines.
    #[error("label not found: '{name}' at {at}")]
    UnknownLabel { name: String, at: Location },

    /// CALL names a function that is not in the program.
    #[error("function not found: '{name}' at {at}")]
    UnknownFunction { name: String, at: Location },

    /// `provide_input` was called while nothing was waiting for it.
    #[error("engine is not waiting for input")]
    NotAwaitingInput,
}
