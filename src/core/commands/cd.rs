use super::{Command, CommandContext, CommandError, ExitSignal};
use crate::core::env::EnvError;
use crate::path::PathExpander;
use std::io::Write;
use std::path::Path;

/// `cd`: changes directory and keeps `PWD`/`OLDPWD` in step.
///
/// Targets: no argument is `$HOME`, `-` is `$OLDPWD` (announced on success), a
/// leading `~` is replaced by `$HOME`, anything else is taken as written. On any
/// failure both variables are left alone.
#[derive(Clone)]
pub struct CdCommand {
    path_expander: PathExpander,
}

impl Default for CdCommand {
    fn default() -> Self {
        Self::new()
    }
}

impl CdCommand {
    pub fn new() -> Self {
        Self {
            path_expander: PathExpander::new(),
        }
    }

    fn resolve_target(&self, arg: Option<&str>, ctx: &CommandContext<'_>) -> Result<String, CommandError> {
        let home_not_set = CommandError::VarNotSet {
            command: "cd",
            var: "HOME",
        };

        match arg {
            None => ctx.env.var("HOME").map(str::to_owned).ok_or(home_not_set),
            Some("-") => ctx
                .env
                .var("OLDPWD")
                .map(str::to_owned)
                .ok_or(CommandError::VarNotSet {
                    command: "cd",
                    var: "OLDPWD",
                }),
            Some(path) => self
                .path_expander
                .expand(path, ctx.env.var("HOME"))
                .map(|expanded| expanded.into_owned())
                .map_err(|e| match e {
                    EnvError::HomeDirNotFound => home_not_set,
                    source => CommandError::EnvError {
                        command: "cd",
                        source,
                    },
                }),
        }
    }
}

impl Command for CdCommand {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<ExitSignal, CommandError> {
        if args.len() > 2 {
            return Err(CommandError::InvalidArguments("cd: too many arguments".into()));
        }

        let arg = args.get(1).map(String::as_str);
        let target = self.resolve_target(arg, ctx)?;

        let previous = ctx
            .env
            .current_dir()
            .map_err(|source| CommandError::EnvError {
                command: "cd",
                source,
            })?;

        ctx.env
            .set_current_dir(Path::new(&target))
            .map_err(|source| CommandError::ChangeDir {
                target: target.clone(),
                source,
            })?;

        let env_error = |source| CommandError::EnvError {
            command: "cd",
            source,
        };
        ctx.env
            .set_var("OLDPWD", &previous.to_string_lossy())
            .map_err(env_error)?;
        let current = ctx.env.current_dir().map_err(env_error)?;
        ctx.env
            .set_var("PWD", &current.to_string_lossy())
            .map_err(env_error)?;
        log::debug!("cd: {} -> {}", previous.display(), current.display());

        if arg == Some("-") {
            writeln!(ctx.stdout, "{}", target)?;
        }
        Ok(ExitSignal::SUCCESS)
    }
}
