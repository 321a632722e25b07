//! CLI command implementations.

use std::fs;
use std::io::{self, BufRead};
use std::path::Path;

use anyhow::{Context, Result};
use procal_common::Program;
use procal_vm::{Engine, RuntimeError, StepOutcome};
use tracing::debug;

use crate::debugger::Debugger;

/// Step budget for `run` when `--max-steps` is not given.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Read and assemble a program file.
fn load(path: &Path) -> Result<Program> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("cannot read '{}'", path.display()))?;
    let program = procal_assembler::assemble(&text)?;
    debug!(path = %path.display(), instructions = program.len(), "program loaded");
    Ok(program)
}

fn load_or_exit(path: &Path) -> Result<Program, i32> {
    load(path).map_err(|e| {
        eprintln!("error: {e:#}");
        1
    })
}

fn runtime_error(e: RuntimeError) -> i32 {
    eprintln!("runtime error: {e}");
    3
}

/// Run a program to completion and print the final stack, bottom first.
pub fn run(path: &Path, step_over: bool, max_steps: u64) -> Result<(), i32> {
    let program = load_or_exit(path)?;

    let mut engine = Engine::new();
    engine.load_program(&program);
    engine.set_input_handler(|prompt: &str| eprintln!("{prompt}"));
    engine.start().map_err(runtime_error)?;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut steps = 0u64;

    loop {
        if engine.is_blocked_on_input() {
            let value = read_number(&mut lines)?;
            engine.provide_input(value).map_err(runtime_error)?;
        }
        if steps >= max_steps {
            eprintln!(
                "error: step limit of {max_steps} exceeded at {}:{}",
                engine.current_function(),
                engine.current_position()
            );
            return Err(4);
        }

        let outcome = if step_over {
            engine.step_over()
        } else {
            engine.step_into()
        }
        .map_err(runtime_error)?;
        steps += 1;

        if outcome != StepOutcome::Stepped {
            break;
        }
    }

    debug!(steps, "run complete");
    for value in engine.stack() {
        println!("{value}");
    }
    Ok(())
}

/// Read lines until one parses as a number.
fn read_number(lines: &mut impl Iterator<Item = io::Result<String>>) -> Result<f64, i32> {
    loop {
        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) => {
                eprintln!("error: cannot read input: {e}");
                return Err(1);
            }
            None => {
                eprintln!("error: input ended while the program was waiting for a value");
                return Err(1);
            }
        };
        match line.trim().parse() {
            Ok(value) => return Ok(value),
            Err(_) => eprintln!("invalid number '{}', try again", line.trim()),
        }
    }
}

/// Step through a program, taking debugger commands from stdin.
pub fn debug(path: &Path) -> Result<(), i32> {
    let program = load_or_exit(path)?;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut debugger = Debugger::new(&program, stdout.lock());
    debugger.start().map_err(runtime_error)?;
    debugger.repl(stdin.lock()).map_err(|e| {
        eprintln!("error: {e:#}");
        1
    })
}

/// Print the canonical listing of a program.
pub fn list(path: &Path) -> Result<(), i32> {
    let program = load_or_exit(path)?;
    print!("{}", procal_assembler::disassemble(&program));
    Ok(())
}
