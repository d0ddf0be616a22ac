use super::{Command, CommandContext, CommandError, ExitSignal};
use crate::path::SearchPath;
use std::io::Write;

/// `type`: says how each name would be run.
#[derive(Clone, Default)]
pub struct TypeCommand;

impl TypeCommand {
    pub fn new() -> Self {
        Self
    }
}

impl Command for TypeCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<ExitSignal, CommandError> {
        let names = args.get(1..).unwrap_or_default();
        if names.is_empty() {
            writeln!(ctx.stdout, "Usage: type command_name ...")?;
            return Ok(ExitSignal::SUCCESS);
        }

        let search_path = SearchPath::from_env(&*ctx.env);
        for name in names {
            if ctx.builtins.is_builtin(name) {
                writeln!(ctx.stdout, "{} is a shell builtin", name)?;
            } else if let Some(path) = search_path.resolve(name) {
                writeln!(ctx.stdout, "{} is {}", name, path.display())?;
            } else {
                writeln!(ctx.stdout, "{}: not found", name)?;
            }
        }
        Ok(ExitSignal::SUCCESS)
    }
}
