//! Procal common types.
//!
//! This crate provides the data model shared by the engine, the assembler
//! and the driver:
//!
//! - [`Opcode`]: the 13 instruction kinds and their stored mnemonics
//! - [`Op`]: an operation with its payload
//! - [`Instruction`]: an operation plus id, owning function and position
//! - [`InstructionRow`]: the persisted shape of an instruction
//! - [`Function`] and [`Program`]: the rows a store hands to the engine
//! - [`DecodeError`]: errors from decoding stored rows

pub mod error;
pub mod instruction;
pub mod opcode;
pub mod program;

// Re-export commonly used types at the crate root.
pub use error::DecodeError;
pub use instruction::{Instruction, InstructionRow, Op};
pub use opcode::Opcode;
pub use program::{Function, Program, MAIN_FUNCTION};

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn arb_name() -> impl Strategy<Value = String> {
        "[a-z][a-z0-9_]{0,8}"
    }

    /// Strategy that generates a random operation.
    fn arb_op() -> impl Strategy<Value = Op> {
        prop_oneof![
            (-1e9f64..1e9).prop_map(Op::PushNumber),
            Just(Op::Add),
            Just(Op::Subtract),
            Just(Op::Multiply),
            Just(Op::Divide),
            Just(Op::Sine),
            Just(Op::Cosine),
            Just(Op::Tangent),
            Just(Op::Duplicate),
            ".{0,12}".prop_map(Op::ReadInput),
            arb_name().prop_map(Op::Label),
            arb_name().prop_map(Op::Goto),
            arb_name().prop_map(Op::CallFunction),
        ]
    }

    proptest! {
        /// Every instruction survives a trip through the store's row shape.
        #[test]
        fn row_roundtrip(
            op in arb_op(),
            id in any::<i64>(),
            function_id in any::<i64>(),
            position in 0usize..10_000,
        ) {
            let instr = Instruction::new(id, function_id, position, op);
            prop_assert_eq!(Instruction::from_row(&instr.to_row()).unwrap(), instr);
        }
    }
}
