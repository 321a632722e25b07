//! Input suspension bridge.
//!
//! INPUT does not block a thread. The engine raises its blocked flag, hands
//! the prompt to the registered [`InputHandler`] and returns from the step.
//! Stepping while blocked is a harmless poll. The driver resumes the run by
//! calling [`Engine::provide_input`], which pushes the value.
//!
//! [`Engine::provide_input`]: crate::Engine::provide_input

/// Receives the prompt of every executed INPUT instruction.
///
/// Called synchronously, on the stepping thread, once per INPUT. Any
/// `FnMut(&str)` closure is a handler.
pub trait InputHandler {
    fn request(&mut self, prompt: &str);
}

impl<F> InputHandler for F
where
    F: FnMut(&str),
{
    fn request(&mut self, prompt: &str) {
        self(prompt)
    }
}
