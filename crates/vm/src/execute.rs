//! Instruction dispatch and the two stepping strategies.

use procal_common::{Op, Opcode};
use tracing::{debug, trace};

use crate::error::RuntimeError;
use crate::machine::{CallFrame, Engine, StepOutcome};

/// How the cursor moves after an instruction completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    /// Advance to the next position.
    Next,
    /// Continue at this position of the current function.
    Jump(usize),
    /// The cursor already points at a callee's first instruction.
    Entered,
}

impl Engine {
    /// Execute the instruction at the cursor, entering calls.
    ///
    /// Returns [`StepOutcome::NotStepped`] when the engine is not running,
    /// and [`StepOutcome::Stepped`] without doing anything while blocked on
    /// input. On error nothing changes and the same step can be retried.
    pub fn step_into(&mut self) -> Result<StepOutcome, RuntimeError> {
        if !self.running {
            return Ok(StepOutcome::NotStepped);
        }
        if self.blocked_on_input {
            return Ok(StepOutcome::Stepped);
        }

        let Some(instr) = self.fetch()? else {
            return Ok(self.leave_function());
        };
        let flow = self.execute(&instr.op)?;
        self.advance(flow);
        Ok(StepOutcome::Stepped)
    }

    /// Execute the instruction at the cursor.
    ///
    /// A CALL is not run to completion: it pushes a frame and moves the
    /// cursor to the callee's first instruction, exactly like
    /// [`step_into`](Self::step_into). Every other instruction executes and
    /// the cursor advances.
    pub fn step_over(&mut self) -> Result<StepOutcome, RuntimeError> {
        if !self.running {
            return Ok(StepOutcome::NotStepped);
        }
        if self.blocked_on_input {
            return Ok(StepOutcome::Stepped);
        }

        let Some(instr) = self.fetch()? else {
            return Ok(self.leave_function());
        };
        if let Op::CallFunction(name) = &instr.op {
            self.enter_function(name)?;
            return Ok(StepOutcome::Stepped);
        }
        let flow = self.execute(&instr.op)?;
        self.advance(flow);
        Ok(StepOutcome::Stepped)
    }

    /// Resume a run blocked on INPUT, pushing `value` onto the stack.
    pub fn provide_input(&mut self, value: f64) -> Result<(), RuntimeError> {
        if !self.blocked_on_input {
            return Err(RuntimeError::NotAwaitingInput);
        }
        self.blocked_on_input = false;
        self.pending_prompt = None;
        self.push(value);
        debug!(value, "input provided");
        Ok(())
    }

    /// Run a single operation against the current state.
    ///
    /// Every precondition is checked before the first mutation.
    fn execute(&mut self, op: &Op) -> Result<Flow, RuntimeError> {
        trace!(
            function = %self.current_function,
            position = self.current_position,
            instruction = %op,
            depth = self.stack.len(),
            "execute"
        );

        match op {
            Op::PushNumber(value) => self.push(*value),
            Op::Add => self.exec_binary(Opcode::Add, |b, a| b + a)?,
            Op::Subtract => self.exec_binary(Opcode::Sub, |b, a| b - a)?,
            Op::Multiply => self.exec_binary(Opcode::Mul, |b, a| b * a)?,
            Op::Divide => self.exec_div()?,
            Op::Sine => self.exec_unary(Opcode::Sin, f64::sin)?,
            Op::Cosine => self.exec_unary(Opcode::Cos, f64::cos)?,
            Op::Tangent => self.exec_unary(Opcode::Tan, f64::tan)?,
            Op::Duplicate => {
                self.require(Opcode::Dup)?;
                let a = self.pop(Opcode::Dup)?;
                self.push(a);
                self.push(a);
            }
            Op::ReadInput(prompt) => self.exec_read_input(prompt),
            Op::Label(_) => {}
            Op::Goto(label) => {
                let target = self
                    .table
                    .as_ref()
                    .and_then(|t| t.label(label))
                    .ok_or_else(|| RuntimeError::UnknownLabel {
                        name: label.clone(),
                        at: self.location(),
                    })?;
                return Ok(Flow::Jump(target));
            }
            Op::CallFunction(name) => {
                self.enter_function(name)?;
                return Ok(Flow::Entered);
            }
        }
        Ok(Flow::Next)
    }

    /// Pop a, pop b, push `f(b, a)`.
    fn exec_binary(
        &mut self,
        opcode: Opcode,
        f: impl Fn(f64, f64) -> f64,
    ) -> Result<(), RuntimeError> {
        self.require(opcode)?;
        let a = self.pop(opcode)?;
        let b = self.pop(opcode)?;
        self.push(f(b, a));
        Ok(())
    }

    fn exec_unary(&mut self, opcode: Opcode, f: impl Fn(f64) -> f64) -> Result<(), RuntimeError> {
        self.require(opcode)?;
        let a = self.pop(opcode)?;
        self.push(f(a));
        Ok(())
    }

    fn exec_div(&mut self) -> Result<(), RuntimeError> {
        self.require(Opcode::Div)?;
        if self.stack.last() == Some(&0.0) {
            return Err(RuntimeError::DivisionByZero {
                at: self.location(),
            });
        }
        self.exec_binary(Opcode::Div, |b, a| b / a)
    }

    fn exec_read_input(&mut self, prompt: &str) {
        self.blocked_on_input = true;
        self.pending_prompt = Some(prompt.to_string());
        debug!(prompt, at = %self.location(), "waiting for input");
        if let Some(handler) = self.input_handler.as_mut() {
            handler.request(prompt);
        }
    }

    /// Push a return frame and move the cursor to `name`'s first instruction.
    fn enter_function(&mut self, name: &str) -> Result<(), RuntimeError> {
        let known = self
            .table
            .as_ref()
            .is_some_and(|t| t.contains_function(name));
        if !known {
            return Err(RuntimeError::UnknownFunction {
                name: name.to_string(),
                at: self.location(),
            });
        }

        debug!(callee = name, from = %self.location(), "call");
        self.call_stack.push(CallFrame {
            function: std::mem::replace(&mut self.current_function, name.to_string()),
            position: self.current_position,
        });
        self.current_position = 0;
        Ok(())
    }

    /// Handle a cursor past the end of the current function: return to the
    /// caller, or finish the run at top level.
    fn leave_function(&mut self) -> StepOutcome {
        match self.call_stack.pop() {
            Some(frame) => {
                debug!(from = %self.current_function, to = %frame.function, "return");
                self.current_function = frame.function;
                self.current_position = frame.position + 1;
                StepOutcome::Stepped
            }
            None => {
                self.running = false;
                debug!(depth = self.stack.len(), "run finished");
                StepOutcome::Finished
            }
        }
    }

    fn advance(&mut self, flow: Flow) {
        match flow {
            Flow::Next => self.current_position += 1,
            Flow::Jump(target) => self.current_position = target,
            Flow::Entered => {}
        }
    }
}
