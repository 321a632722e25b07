//! Engine state: value stack, call stack, cursor and run flags.

use procal_common::{Function, Instruction, Opcode, Program, MAIN_FUNCTION};
use tracing::debug;

use crate::error::{Location, RuntimeError};
use crate::input::InputHandler;
use crate::table::ProgramTable;

/// Saved return point for a function call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallFrame {
    /// Function that executed the CALL.
    pub function: String,
    /// Position of the CALL itself. The caller resumes one past it.
    pub position: usize,
}

/// Result of a single stepping call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// Something happened, or the engine is polling while blocked.
    Stepped,
    /// The top-level function ran off its end. The engine is now inert.
    Finished,
    /// The engine is not running; nothing was done.
    NotStepped,
}

/// Lifecycle of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    NotStarted,
    Running,
    /// Waiting for [`Engine::provide_input`].
    Blocked,
    Finished,
}

/// The procal stepping engine.
///
/// Driven by one caller at a time. All state changes happen synchronously
/// inside `start`, the stepping operations and `provide_input`.
pub struct Engine {
    /// Loaded program; `None` until the first `load`.
    pub(crate) table: Option<ProgramTable>,
    /// Operand stack, bottom first.
    pub(crate) stack: Vec<f64>,
    pub(crate) call_stack: Vec<CallFrame>,
    pub(crate) current_function: String,
    pub(crate) current_position: usize,
    pub(crate) running: bool,
    pub(crate) blocked_on_input: bool,
    /// Set by the first successful `start`.
    pub(crate) started: bool,
    /// Prompt of the INPUT currently waiting for a value.
    pub(crate) pending_prompt: Option<String>,
    pub(crate) input_handler: Option<Box<dyn InputHandler>>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Create an engine with nothing loaded.
    pub fn new() -> Self {
        Self {
            table: None,
            stack: Vec::new(),
            call_stack: Vec::new(),
            current_function: MAIN_FUNCTION.to_string(),
            current_position: 0,
            running: false,
            blocked_on_input: false,
            started: false,
            pending_prompt: None,
            input_handler: None,
        }
    }

    /// Load function and instruction rows. Never fails.
    ///
    /// Any previous run is discarded; the engine is back to
    /// [`Status::NotStarted`] until the next `start`.
    pub fn load(&mut self, functions: &[Function], instructions: &[Instruction]) {
        self.table = Some(ProgramTable::build(functions, instructions));
        self.stack.clear();
        self.call_stack.clear();
        self.current_function = MAIN_FUNCTION.to_string();
        self.current_position = 0;
        self.running = false;
        self.blocked_on_input = false;
        self.started = false;
        self.pending_prompt = None;
    }

    /// Load a whole stored program.
    pub fn load_program(&mut self, program: &Program) {
        self.load(&program.functions, &program.instructions);
    }

    /// Reset the machine and begin executing `main` at position 0.
    ///
    /// Fails before touching any state if nothing is loaded or the program
    /// has no `main` function.
    pub fn start(&mut self) -> Result<(), RuntimeError> {
        let table = match &self.table {
            Some(table) if !table.is_empty() => table,
            _ => return Err(RuntimeError::NoProgramLoaded),
        };
        if !table.contains_function(MAIN_FUNCTION) {
            return Err(RuntimeError::NoMainFunction);
        }

        self.stack.clear();
        self.call_stack.clear();
        self.current_function = MAIN_FUNCTION.to_string();
        self.current_position = 0;
        self.running = true;
        self.blocked_on_input = false;
        self.started = true;
        self.pending_prompt = None;
        debug!("run started");
        Ok(())
    }

    /// Register the handler that receives INPUT prompts.
    pub fn set_input_handler(&mut self, handler: impl InputHandler + 'static) {
        self.input_handler = Some(Box::new(handler));
    }

    pub fn clear_input_handler(&mut self) {
        self.input_handler = None;
    }

    // --- Observation ---

    /// Stack contents, bottom first (insertion order). The last element is
    /// the top of the stack.
    pub fn stack(&self) -> &[f64] {
        &self.stack
    }

    /// Active call frames, outermost first.
    pub fn call_stack(&self) -> &[CallFrame] {
        &self.call_stack
    }

    pub fn current_function(&self) -> &str {
        &self.current_function
    }

    pub fn current_position(&self) -> usize {
        self.current_position
    }

    /// The instruction at the cursor, or `None` past the end of the
    /// current function.
    pub fn current_instruction(&self) -> Option<&Instruction> {
        self.table
            .as_ref()?
            .function(&self.current_function)?
            .get(self.current_position)
    }

    /// The loaded program table, if any.
    pub fn table(&self) -> Option<&ProgramTable> {
        self.table.as_ref()
    }

    pub fn is_blocked_on_input(&self) -> bool {
        self.blocked_on_input
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Prompt of the INPUT that is waiting for a value.
    pub fn pending_prompt(&self) -> Option<&str> {
        self.pending_prompt.as_deref()
    }

    pub fn status(&self) -> Status {
        if !self.started {
            Status::NotStarted
        } else if self.blocked_on_input {
            Status::Blocked
        } else if self.running {
            Status::Running
        } else {
            Status::Finished
        }
    }

    // --- Internal helpers ---

    /// Where the cursor currently points.
    pub(crate) fn location(&self) -> Location {
        Location {
            function: self.current_function.clone(),
            position: self.current_position,
        }
    }

    pub(crate) fn push(&mut self, value: f64) {
        self.stack.push(value);
    }

    /// Fail with `StackUnderflow` unless `opcode` has enough operands.
    ///
    /// Checked before popping anything so a failure leaves the stack intact.
    pub(crate) fn require(&self, opcode: Opcode) -> Result<(), RuntimeError> {
        if self.stack.len() < opcode.stack_arity() {
            return Err(RuntimeError::StackUnderflow {
                operation: opcode,
                at: self.location(),
            });
        }
        Ok(())
    }

    pub(crate) fn pop(&mut self, opcode: Opcode) -> Result<f64, RuntimeError> {
        match self.stack.pop() {
            Some(value) => Ok(value),
            None => Err(RuntimeError::StackUnderflow {
                operation: opcode,
                at: self.location(),
            }),
        }
    }

    /// Fetch the instruction at the cursor.
    ///
    /// `Ok(None)` means the cursor is past the end of the current function.
    pub(crate) fn fetch(&self) -> Result<Option<Instruction>, RuntimeError> {
        let table = self.table.as_ref().ok_or(RuntimeError::NoProgramLoaded)?;
        let body = table
            .function(&self.current_function)
            .ok_or_else(|| RuntimeError::UnknownFunction {
                name: self.current_function.clone(),
                at: self.location(),
            })?;
        Ok(body.get(self.current_position).cloned())
    }
}
