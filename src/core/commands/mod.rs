use std::collections::BTreeMap;
use std::io::Write;

mod cd;
mod echo;
mod exit;
mod pwd;
mod type_cmd;

pub use cd::CdCommand;
pub use echo::EchoCommand;
pub use exit::ExitCommand;
pub use pwd::PwdCommand;
pub use type_cmd::TypeCommand;

use crate::core::env::{EnvError, Environment};
use crate::process::ProcessError;

/// Outcome of one command: a status code, or the request to leave the shell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitSignal {
    Status(i32),
    Terminate,
}

impl ExitSignal {
    pub const SUCCESS: ExitSignal = ExitSignal::Status(0);
    pub const FAILURE: ExitSignal = ExitSignal::Status(1);

    pub fn is_terminate(&self) -> bool {
        matches!(self, ExitSignal::Terminate)
    }
}

#[derive(Debug)]
pub enum CommandError {
    InvalidArguments(String),
    VarNotSet {
        command: &'static str,
        var: &'static str,
    },
    ChangeDir {
        target: String,
        source: EnvError,
    },
    EnvError {
        command: &'static str,
        source: EnvError,
    },
    IoError(std::io::Error),
    ProcessError {
        name: String,
        source: ProcessError,
    },
}

impl std::fmt::Display for CommandError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CommandError::InvalidArguments(msg) => write!(f, "{}", msg),
            CommandError::VarNotSet { command, var } => write!(f, "{}: {} not set", command, var),
            CommandError::ChangeDir { target, source } => write!(f, "cd: {}: {}", target, source),
            CommandError::EnvError { command, source } => write!(f, "{}: {}", command, source),
            CommandError::IoError(err) => {
                write!(f, "write error: {}", crate::core::env::describe_io_error(err))
            }
            CommandError::ProcessError { name, source } => write!(f, "{}: {}", name, source),
        }
    }
}

impl std::error::Error for CommandError {}

impl From<std::io::Error> for CommandError {
    fn from(err: std::io::Error) -> Self {
        CommandError::IoError(err)
    }
}

/// What a builtin may touch while it runs.
pub struct CommandContext<'a> {
    pub env: &'a mut dyn Environment,
    pub stdout: &'a mut dyn Write,
    pub builtins: &'a BuiltinRegistry,
}

pub trait Command {
    /// `args` is the whole command line; `args[0]` is the builtin's own name.
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<ExitSignal, CommandError>;
}

#[derive(Clone)]
enum CommandType {
    Exit(ExitCommand),
    Echo(EchoCommand),
    Type(TypeCommand),
    Pwd(PwdCommand),
    Cd(CdCommand),
}

impl Command for CommandType {
    fn execute(&self, args: &[String], ctx: &mut CommandContext<'_>) -> Result<ExitSignal, CommandError> {
        match self {
            CommandType::Exit(cmd) => cmd.execute(args, ctx),
            CommandType::Echo(cmd) => cmd.execute(args, ctx),
            CommandType::Type(cmd) => cmd.execute(args, ctx),
            CommandType::Pwd(cmd) => cmd.execute(args, ctx),
            CommandType::Cd(cmd) => cmd.execute(args, ctx),
        }
    }
}

/// Fixed table of in-process commands, built once at startup.
#[derive(Clone)]
pub struct BuiltinRegistry {
    commands: BTreeMap<&'static str, CommandType>,
}

impl Default for BuiltinRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl BuiltinRegistry {
    pub fn new() -> Self {
        let mut commands = BTreeMap::new();
        commands.insert("exit", CommandType::Exit(ExitCommand::new()));
        commands.insert("echo", CommandType::Echo(EchoCommand::new()));
        commands.insert("type", CommandType::Type(TypeCommand::new()));
        commands.insert("pwd", CommandType::Pwd(PwdCommand::new()));
        commands.insert("cd", CommandType::Cd(CdCommand::new()));
        Self { commands }
    }

    pub fn lookup(&self, name: &str) -> Option<&dyn Command> {
        self.commands.get(name).map(|cmd| cmd as &dyn Command)
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.commands.contains_key(name)
    }

    #[cfg(test)]
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.commands.keys().copied()
    }
}
