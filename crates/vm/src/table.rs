//! Program table: per-function instruction lists and the label table.
//!
//! Labels live in one flat, program-wide namespace. Two functions that
//! define the same label collide and the one scanned last wins. A GOTO
//! resolves to a bare position number, so jumping to a label defined in
//! another function lands on whatever sits at that index in the current
//! function.

use std::collections::HashMap;

use procal_common::{Function, Instruction, Op, Program};
use tracing::debug;

/// Lookup tables derived once per run from the stored rows.
#[derive(Debug, Clone, Default)]
pub struct ProgramTable {
    /// Function name → instructions ordered by position.
    functions: HashMap<String, Vec<Instruction>>,
    /// Function names in the order their rows were supplied.
    order: Vec<String>,
    /// Label name → target position.
    labels: HashMap<String, usize>,
}

impl ProgramTable {
    /// Build the table from raw function and instruction rows.
    ///
    /// Never fails. Rows may arrive in any order; each function's
    /// instructions are sorted by stored position. When two function rows
    /// share a name the first one is kept. Instructions owned by no known
    /// function are dropped.
    pub fn build(functions: &[Function], instructions: &[Instruction]) -> Self {
        let mut by_owner: HashMap<i64, Vec<Instruction>> = HashMap::new();
        for instr in instructions {
            by_owner
                .entry(instr.function_id)
                .or_default()
                .push(instr.clone());
        }

        let mut table = Self::default();
        for function in functions {
            if table.functions.contains_key(&function.name) {
                debug!(name = %function.name, id = function.id, "duplicate function row ignored");
                continue;
            }
            let mut body = by_owner.remove(&function.id).unwrap_or_default();
            body.sort_by_key(|i| i.position);
            table.order.push(function.name.clone());
            table.functions.insert(function.name.clone(), body);
        }

        for name in &table.order {
            for instr in &table.functions[name] {
                if let Op::Label(label) = &instr.op {
                    if let Some(previous) = table.labels.insert(label.clone(), instr.position) {
                        debug!(
                            label = %label,
                            previous,
                            position = instr.position,
                            function = %name,
                            "label redefined"
                        );
                    }
                }
            }
        }

        debug!(
            functions = table.functions.len(),
            labels = table.labels.len(),
            "program table built"
        );
        table
    }

    /// Build the table from a whole stored program.
    pub fn from_program(program: &Program) -> Self {
        Self::build(&program.functions, &program.instructions)
    }

    /// The ordered instructions of a function.
    pub fn function(&self, name: &str) -> Option<&[Instruction]> {
        self.functions.get(name).map(Vec::as_slice)
    }

    pub fn contains_function(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// The target position of a label, wherever it was defined.
    pub fn label(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }

    /// Function names in row order.
    pub fn function_names(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    /// True if no functions were loaded.
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}
