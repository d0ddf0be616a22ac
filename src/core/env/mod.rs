mod system;
mod virtual_env;

pub use system::SystemEnv;
pub use virtual_env::VirtualEnv;

use std::path::{Path, PathBuf};

/// Variables and working directory seen by builtins and child processes.
///
/// Only `cd` writes through this trait; everything else reads.
pub trait Environment {
    fn var(&self, name: &str) -> Option<&str>;

    fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError>;

    /// Snapshot of every variable, handed to spawned children.
    fn vars(&self) -> Vec<(String, String)>;

    fn current_dir(&self) -> Result<PathBuf, EnvError>;

    fn set_current_dir(&mut self, path: &Path) -> Result<(), EnvError>;
}

#[derive(Debug)]
pub enum EnvError {
    HomeDirNotFound,
    IoError(std::io::Error),
    InvalidValue(&'static str),
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::HomeDirNotFound => write!(f, "HOME not set"),
            EnvError::IoError(e) => write!(f, "{}", describe_io_error(e)),
            EnvError::InvalidValue(val) => write!(f, "Invalid value: {}", val),
        }
    }
}

impl std::error::Error for EnvError {}

impl From<std::io::Error> for EnvError {
    fn from(e: std::io::Error) -> Self {
        EnvError::IoError(e)
    }
}

/// Renders an OS error the way `strerror` would, without the `(os error N)` tail.
pub fn describe_io_error(err: &std::io::Error) -> String {
    let text = err.to_string();
    match (err.raw_os_error(), text.rsplit_once(" (os error ")) {
        (Some(_), Some((message, _))) => message.to_string(),
        _ => text,
    }
}
