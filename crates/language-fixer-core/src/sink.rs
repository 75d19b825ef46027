use crate::dispatch::Command;

/// Errors reported by an OS text-injection backend.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InjectError {
    #[error("failed to create input event source")]
    EventSource,
    #[error("failed to create synthetic key event")]
    EventCreate,
    #[error("focused control rejected synthetic input: {0}")]
    Rejected(String),
}

/// Where replacement text goes: the focused text field of the frontmost app.
pub trait TextSink {
    /// Erases `n` characters before the caret.
    fn delete_preceding(&mut self, n: usize) -> Result<(), InjectError>;

    fn insert_text(&mut self, text: &str) -> Result<(), InjectError>;

    /// Switches the OS input source to the next layout. Best effort.
    fn switch_layout(&mut self) -> Result<(), InjectError> {
        Ok(())
    }
}

/// Deletes the replaced characters, then types the replacement.
///
/// Stops at the first failure; nothing is retried.
pub fn apply_command<S: TextSink + ?Sized>(sink: &mut S, cmd: &Command) -> Result<(), InjectError> {
    if cmd.delete > 0 {
        sink.delete_preceding(cmd.delete)?;
    }
    if !cmd.insert.is_empty() {
        sink.insert_text(&cmd.insert)?;
    }
    Ok(())
}
