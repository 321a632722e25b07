//! Procal engine: single-step execution of stored stack programs.
//!
//! The engine is a stack machine with:
//! - An operand stack of `f64` values
//! - A call stack of return points for CALL
//! - A program-wide label table for GOTO
//! - A blocked flag that suspends the run while INPUT waits for a value
//!
//! It never performs I/O. A driver calls [`Engine::step_into`] or
//! [`Engine::step_over`] repeatedly, watches [`Engine::status`], and answers
//! INPUT prompts with [`Engine::provide_input`].
//!
//! # Usage
//!
//! ```
//! use procal_common::{Function, Instruction, Op};
//! use procal_vm::{Engine, StepOutcome};
//!
//! let mut engine = Engine::new();
//! engine.load(
//!     &[Function::new(1, "main")],
//!     &[
//!         Instruction::new(1, 1, 0, Op::PushNumber(5.0)),
//!         Instruction::new(2, 1, 1, Op::ReadInput("x?".to_string())),
//!         Instruction::new(3, 1, 2, Op::Subtract),
//!     ],
//! );
//! engine.start().unwrap();
//!
//! engine.step_into().unwrap();
//! engine.step_into().unwrap();
//! assert!(engine.is_blocked_on_input());
//! engine.provide_input(3.0).unwrap();
//!
//! engine.step_into().unwrap();
//! assert_eq!(engine.step_into().unwrap(), StepOutcome::Finished);
//! assert_eq!(engine.stack(), &[2.0]);
//! ```

pub mod error;
pub mod execute;
pub mod input;
pub mod machine;
pub mod table;

pub use error::{Location, RuntimeError};
pub use input::InputHandler;
pub use machine::{CallFrame, Engine, Status, StepOutcome};
pub use table::ProgramTable;
