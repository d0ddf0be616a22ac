use std::fmt;
use std::path::{Path, PathBuf};

pub mod executor;
#[cfg(test)]
pub(crate) mod fake;

pub use executor::SystemLauncher;

#[derive(Debug)]
pub enum ProcessError {
    SpawnFailed(std::io::Error),
    WaitFailed(std::io::Error),
    InvalidArguments(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::SpawnFailed(e) => {
                write!(f, "spawn failed: {}", crate::core::env::describe_io_error(e))
            }
            ProcessError::WaitFailed(e) => {
                write!(f, "wait failed: {}", crate::core::env::describe_io_error(e))
            }
            ProcessError::InvalidArguments(msg) => write!(f, "invalid arguments: {}", msg),
        }
    }
}

impl std::error::Error for ProcessError {}

/// Everything a child needs: resolved program, argv (argv[0] included), environment
/// and working directory. With no `cwd` the child inherits the shell's own.
#[derive(Debug, Clone)]
pub struct SpawnRequest<'a> {
    pub program: &'a Path,
    pub argv: &'a [String],
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

/// How a waited-for child ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessStatus {
    Exited(i32),
    Signaled(i32),
}

impl ProcessStatus {
    pub fn success(&self) -> bool {
        matches!(self, ProcessStatus::Exited(0))
    }
}

impl fmt::Display for ProcessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessStatus::Exited(code) => write!(f, "exit status {}", code),
            ProcessStatus::Signaled(sig) => write!(f, "killed by signal {}", sig),
        }
    }
}

/// A running child that can be waited on once.
pub trait ProcessHandle {
    fn id(&self) -> u32;

    fn wait(&mut self) -> Result<ProcessStatus, ProcessError>;
}

/// Starts external programs on behalf of the dispatcher.
pub trait ProcessLauncher {
    fn spawn(&self, request: &SpawnRequest<'_>) -> Result<Box<dyn ProcessHandle>, ProcessError>;
}
