use super::{EnvError, Environment};
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// An environment that never touches the process state.
///
/// The working directory is tracked in memory; `set_current_dir` still checks the
/// real filesystem so a missing or non-directory target fails the way `chdir` would.
#[derive(Clone, Debug)]
pub struct VirtualEnv {
    vars: HashMap<String, String>,
    cwd: PathBuf,
}

impl VirtualEnv {
    pub fn new(cwd: impl Into<PathBuf>) -> Self {
        let cwd = cwd.into();
        let mut vars = HashMap::new();
        vars.insert("PWD".to_string(), cwd.to_string_lossy().into_owned());
        Self { vars, cwd }
    }

    pub fn with_var(mut self, name: &str, value: &str) -> Self {
        self.vars.insert(name.to_string(), value.to_string());
        self
    }

    pub fn remove_var(&mut self, name: &str) {
        self.vars.remove(name);
    }
}

impl Environment for VirtualEnv {
    fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }

    fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::InvalidValue("Empty variable name"));
        }
        self.vars.insert(name.to_string(), value.to_string());
        Ok(())
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    fn current_dir(&self) -> Result<PathBuf, EnvError> {
        Ok(self.cwd.clone())
    }

    fn set_current_dir(&mut self, path: &Path) -> Result<(), EnvError> {
        let target = self.cwd.join(path);
        if !fs::metadata(&target)?.is_dir() {
            return Err(io::Error::from_raw_os_error(libc::ENOTDIR).into());
        }
        self.cwd = fs::canonicalize(&target)?;
        Ok(())
    }
}
