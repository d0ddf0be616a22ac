use super::{Command, CommandContext, CommandError, ExitSignal};
use std::io::Write;

/// `echo`: writes every argument followed by a space, then a newline.
#[derive(Clone, Default)]
pub struct EchoCommand;

impl EchoCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for EchoCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<ExitSignal, CommandError> {
        // The separator trails every word, including the last one
        for arg in args.iter().skip(1) {
            write!(ctx.stdout, "{} ", arg)?;
        }
        writeln!(ctx.stdout)?;
        Ok(ExitSignal::SUCCESS)
    }
}
