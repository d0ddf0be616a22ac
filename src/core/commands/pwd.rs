use super::{Command, CommandContext, CommandError, ExitSignal};
use std::io::Write;

/// `pwd`: prints the shell's recorded `PWD`, not a fresh `getcwd`.
#[derive(Clone, Default)]
pub struct PwdCommand;

impl PwdCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for PwdCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<ExitSignal, CommandError> {
        if args.len() > 1 {
            return Err(CommandError::InvalidArguments(
                "pwd: too many arguments".into(),
            ));
        }

        let pwd = ctx.env.var("PWD").ok_or(CommandError::VarNotSet {
            command: "pwd",
            var: "PWD",
        })?;
        writeln!(ctx.stdout, "{}", pwd)?;
        Ok(ExitSignal::SUCCESS)
    }
}
