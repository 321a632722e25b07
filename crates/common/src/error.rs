//! Decode errors for stored instruction rows.

use thiserror::Error;

/// Errors that occur when turning a stored row into an [`Instruction`].
///
/// [`Instruction`]: crate::Instruction
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The row's type tag is not a known mnemonic.
    #[error("unknown instruction type '{0}'")]
    UnknownOpcode(String),

    /// A PUSH row carries an argument that is not a number.
    #[error("invalid number '{0}'")]
    InvalidNumber(String),
}
