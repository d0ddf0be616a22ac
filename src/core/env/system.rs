use super::{EnvError, Environment};
use std::collections::HashMap;
use std::env;
use std::path::{Path, PathBuf};

/// The real process environment.
///
/// Variables are cached on construction and written through to the process on
/// every `set_var`, so children spawned with `vars()` and the OS stay in sync.
#[derive(Clone, Debug)]
pub struct SystemEnv {
    vars: HashMap<Box<str>, Box<str>>,
}

impl SystemEnv {
    pub fn new() -> Result<Self, EnvError> {
        let mut manager = Self {
            vars: HashMap::new(),
        };

        for (key, value) in env::vars_os() {
            // Non-UTF-8 entries are skipped
            if let (Some(key), Some(value)) = (key.to_str(), value.to_str()) {
                manager.vars.insert(key.into(), value.into());
            }
        }

        if manager.var("PWD").is_none() {
            let cwd = env::current_dir()?;
            log::debug!("PWD not inherited, initialising from {}", cwd.display());
            manager.set_var("PWD", &cwd.to_string_lossy())?;
        }

        Ok(manager)
    }
}

impl Environment for SystemEnv {
    fn var(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|s| s.as_ref())
    }

    fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
        if name.is_empty() {
            return Err(EnvError::InvalidValue("Empty variable name"));
        }
        if name.contains(['=', '\0']) || value.contains('\0') {
            return Err(EnvError::InvalidValue("Variable contains '=' or NUL"));
        }

        self.vars.insert(name.into(), value.into());
        env::set_var(name, value);
        Ok(())
    }

    fn vars(&self) -> Vec<(String, String)> {
        self.vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn current_dir(&self) -> Result<PathBuf, EnvError> {
        Ok(env::current_dir()?)
    }

    fn set_current_dir(&mut self, path: &Path) -> Result<(), EnvError> {
        Ok(env::set_current_dir(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() -> Result<(), EnvError> {
        let mut manager = SystemEnv::new()?;
        manager.set_var("HUSH_SYSTEM_ENV_TEST", "test value")?;
        assert_eq!(manager.var("HUSH_SYSTEM_ENV_TEST"), Some("test value"));
        assert_eq!(env::var("HUSH_SYSTEM_ENV_TEST").unwrap(), "test value");
        Ok(())
    }

    #[test]
    fn test_vars_snapshot_contains_updates() -> Result<(), EnvError> {
        let mut manager = SystemEnv::new()?;
        manager.set_var("HUSH_SNAPSHOT_TEST", "1")?;
        assert!(manager
            .vars()
            .iter()
            .any(|(k, v)| k == "HUSH_SNAPSHOT_TEST" && v == "1"));
        Ok(())
    }

    #[test]
    fn test_pwd_always_present() -> Result<(), EnvError> {
        let manager = SystemEnv::new()?;
        assert!(manager.var("PWD").is_some());
        Ok(())
    }

    #[test]
    fn test_invalid_var_name() {
        let mut manager = SystemEnv::new().unwrap();
        assert!(manager.set_var("", "value").is_err());
        assert!(manager.set_var("A=B", "value").is_err());
    }
}
