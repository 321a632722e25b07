//! Line-oriented stepping session over an [`Engine`].
//!
//! Commands, one per line:
//!
//! ```text
//! s, step          step into
//! n, next          step over
//! i, input <v>     answer a pending INPUT
//! stack            print the value stack
//! where            print the call stack and cursor
//! help             list commands
//! q, quit          end the session
//! ```
//!
//! Runtime errors are reported and the session continues; the engine keeps
//! its state so the user can inspect it.

use std::io::{self, BufRead, Write};

use anyhow::Result;
use procal_common::Program;
use procal_vm::{Engine, RuntimeError, Status, StepOutcome};

const HELP: &str = "\
commands:
  s, step          step into
  n, next          step over
  i, input <v>     answer a pending INPUT
  stack            print the value stack
  where            print the call stack and cursor
  help             list commands
  q, quit          end the session";

pub struct Debugger<W: Write> {
    engine: Engine,
    out: W,
}

impl<W: Write> Debugger<W> {
    pub fn new(program: &Program, out: W) -> Self {
        let mut engine = Engine::new();
        engine.load_program(program);
        Self { engine, out }
    }

    /// Start the run and show where it stands.
    pub fn start(&mut self) -> Result<(), RuntimeError> {
        self.engine.start()?;
        // A failed write surfaces again on the first command.
        let _ = self.show();
        Ok(())
    }

    /// Read commands until `quit` or end of input.
    pub fn repl(&mut self, input: impl BufRead) -> Result<()> {
        for line in input.lines() {
            if !self.command(&line?)? {
                break;
            }
        }
        self.out.flush()?;
        Ok(())
    }

    /// Run one command line. Returns `false` when the session should end.
    fn command(&mut self, line: &str) -> io::Result<bool> {
        let mut words = line.split_whitespace();
        let Some(cmd) = words.next() else {
            return Ok(true);
        };

        match cmd {
            "s" | "step" => self.step(false)?,
            "n" | "next" => self.step(true)?,
            "i" | "input" => match words.next().map(|w| w.parse::<f64>()) {
                Some(Ok(value)) => match self.engine.provide_input(value) {
                    Ok(()) => self.show()?,
                    Err(e) => writeln!(self.out, "error: {e}")?,
                },
                Some(Err(_)) => writeln!(self.out, "invalid number, try again")?,
                None => writeln!(self.out, "usage: input <value>")?,
            },
            "stack" => self.show_stack()?,
            "where" => self.show_where()?,
            "help" => writeln!(self.out, "{HELP}")?,
            "q" | "quit" => return Ok(false),
            other => writeln!(self.out, "unknown command '{other}' (try 'help')")?,
        }
        Ok(true)
    }

    fn step(&mut self, over: bool) -> io::Result<()> {
        let result = if over {
            self.engine.step_over()
        } else {
            self.engine.step_into()
        };

        match result {
            Ok(StepOutcome::Stepped) => self.show(),
            Ok(StepOutcome::Finished) => {
                writeln!(self.out, "finished")?;
                self.show_stack()
            }
            Ok(StepOutcome::NotStepped) => writeln!(self.out, "program is not running"),
            Err(e) => writeln!(self.out, "error: {e}"),
        }
    }

    /// Print the cursor, the next instruction, the stack, and any pending
    /// prompt.
    fn show(&mut self) -> io::Result<()> {
        let function = self.engine.current_function();
        let position = self.engine.current_position();
        match self.engine.current_instruction() {
            Some(instr) => writeln!(self.out, "{function}:{position}  {}", instr.op)?,
            None => writeln!(self.out, "{function}:{position}  <end of function>")?,
        }
        self.show_stack()?;
        if self.engine.status() == Status::Blocked {
            let prompt = self.engine.pending_prompt().unwrap_or_default();
            writeln!(self.out, "waiting for input: {prompt}")?;
        }
        Ok(())
    }

    fn show_stack(&mut self) -> io::Result<()> {
        let values: Vec<String> = self.engine.stack().iter().map(f64::to_string).collect();
        writeln!(self.out, "stack: [{}]", values.join(", "))
    }

    fn show_where(&mut self) -> io::Result<()> {
        for frame in self.engine.call_stack() {
            writeln!(self.out, "  called from {}:{}", frame.function, frame.position)?;
        }
        writeln!(
            self.out,
            "  at {}:{}",
            self.engine.current_function(),
            self.engine.current_position()
        )
    }
}
