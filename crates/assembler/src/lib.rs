//! Procal assembler: plain-text program format.
//!
//! A program file is a sequence of `FUNC <name>` blocks, each followed by
//! one instruction per line. The assembler produces the same rows a store
//! would: function rows, and instruction rows with ids and positions.
//! It performs no validation beyond syntax; a missing `main` or an unknown
//! label is only reported once the program runs.
//!
//! # Usage
//!
//! ```
//! use procal_assembler::{assemble, disassemble};
//!
//! let text = "FUNC main\n  PUSH 2\n  DUP\n  MUL\n";
//! let program = assemble(text).unwrap();
//! assert_eq!(program.functions.len(), 1);
//! assert_eq!(program.instructions.len(), 3);
//! assert_eq!(disassemble(&program), text);
//! ```
//!
//! # Roundtrip Guarantee
//!
//! `assemble(disassemble(program)) == program` holds for programs produced
//! by `assemble`. The disassembler outputs canonical text; the assembler
//! also accepts lowercase mnemonics, comments and free indentation.

pub mod error;

mod disassembler;
mod lexer;
mod parser;

pub use error::AsmError;

use lexer::tokenize_line;
use parser::{parse_line, ParseResult};
use procal_common::{Function, Instruction, Program};
use tracing::debug;

/// Assemble text into a program.
///
/// Function ids and instruction ids are assigned sequentially from 1 in
/// file order. Returns the first error encountered.
pub fn assemble(text: &str) -> Result<Program, AsmError> {
    let mut functions: Vec<Function> = Vec::new();
    let mut instructions = Vec::new();
    // (function id, next position)
    let mut current: Option<(i64, usize)> = None;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;
        let tokens = tokenize_line(line, line_num)?;
        match parse_line(&tokens, line_num)? {
            None => {}
            Some(ParseResult::Function(name)) => {
                if functions.iter().any(|f| f.name == name) {
                    return Err(AsmError::DuplicateFunction {
                        line: line_num,
                        name,
                    });
                }
                let id = functions.len() as i64 + 1;
                functions.push(Function::new(id, name));
                current = Some((id, 0));
            }
            Some(ParseResult::Instruction(op)) => {
                let (function_id, position) = current
                    .as_mut()
                    .ok_or(AsmError::InstructionOutsideFunction { line: line_num })?;
                let id = instructions.len() as i64 + 1;
                instructions.push(Instruction::new(id, *function_id, *position, op));
                *position += 1;
            }
        }
    }

    debug!(
        functions = functions.len(),
        instructions = instructions.len(),
        "assembled program"
    );
    Ok(Program::new(functions, instructions))
}

/// Disassemble a program into canonical text.
pub fn disassemble(program: &Program) -> String {
    disassembler::disassemble(program)
}
