use super::{Command, CommandContext, CommandError, ExitSignal};

/// `exit`: leaves the shell. Arguments are accepted and ignored.
#[derive(Clone)]
pub struct ExitCommand;

impl Default for ExitCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl ExitCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for ExitCommand {
    fn execute(&self, _args: &[String], _ctx: &mut CommandContext<'_>) -> Result<ExitSignal, CommandError> {
        Ok(ExitSignal::Terminate)
    }
}
