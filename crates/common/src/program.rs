//! Program representation: function rows plus instruction rows.
//!
//! This is the flat shape a relational store returns. Nothing here checks
//! that a `main` function exists or that labels resolve; those problems
//! surface when the program is started or stepped.

use crate::instruction::Instruction;

/// The name of the mandatory entry-point function.
pub const MAIN_FUNCTION: &str = "main";

/// A function row: a stable id and a name unique within its program.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Function {
    pub id: i64,
    pub name: String,
}

impl Function {
    /// Create a new function row.
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A stored program: its functions and every instruction they own.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub functions: Vec<Function>,
    /// All instructions, in no particular order.
    pub instructions: Vec<Instruction>,
}

impl Program {
    /// Create a program from raw rows.
    pub fn new(functions: Vec<Function>, instructions: Vec<Instruction>) -> Self {
        Self {
            functions,
            instructions,
        }
    }

    /// Look up the first function row with the given name.
    pub fn function(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    /// The instructions owned by `function`, ordered by position.
    pub fn instructions_of(&self, function: &Function) -> Vec<&Instruction> {
        let mut owned: Vec<&Instruction> = self
            .instructions
            .iter()
            .filter(|i| i.function_id == function.id)
            .collect();
        owned.sort_by_key(|i| i.position);
        owned
    }

    /// Total number of instructions across all functions.
    pub fn len(&self) -> usize {
        self.instructions.len()
    }

    /// Returns true if no function owns any instruction.
    pub fn is_empty(&self) -> bool {
        self.instructions.is_empty()
    }
}
