//! Program → canonical text listing.

use std::fmt::Write;

use procal_common::Program;

use crate::parser::FUNC_KEYWORD;

/// Indentation for instructions inside a FUNC block.
const INDENT: &str = "  ";

/// Produce canonical text for a program.
///
/// Functions appear in row order, separated by a blank line. Each
/// instruction is printed on its own indented line in position order.
pub(crate) fn disassemble(program: &Program) -> String {
    let mut out = String::new();

    for (idx, function) in program.functions.iter().enumerate() {
        if idx > 0 {
            out.push('\n');
        }
        // Writing to a String cannot fail.
        let _ = writeln!(out, "{FUNC_KEYWORD} {}", function.name);
        for instr in program.instructions_of(function) {
            let _ = writeln!(out, "{INDENT}{}", instr.op);
        }
    }

    out
}
