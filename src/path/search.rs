use crate::core::env::Environment;
use std::ffi::CString;
use std::fs;
use std::os::unix::ffi::OsStrExt;
use std::path::{Path, PathBuf};

const DEFAULT_SEARCH_PATH: [&str; 2] = ["/bin", "/usr/bin"];

/// Ordered directories consulted for external commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<PathBuf>,
}

impl SearchPath {
    /// Splits a `PATH` value on `:`. Empty segments are skipped, and an absent value
    /// falls back to `/bin:/usr/bin`.
    pub fn parse(value: Option<&str>) -> Self {
        let dirs = match value {
            Some(value) => value
                .split(':')
                .filter(|dir| !dir.is_empty())
                .map(PathBuf::from)
                .collect(),
            None => DEFAULT_SEARCH_PATH.iter().map(PathBuf::from).collect(),
        };
        Self { dirs }
    }

    pub fn from_env(env: &dyn Environment) -> Self {
        Self::parse(env.var("PATH"))
    }

    #[cfg(test)]
    pub fn dirs(&self) -> &[PathBuf] {
        &self.dirs
    }

    /// First `dir/name` that is an executable file, in search order.
    pub fn resolve(&self, name: &str) -> Option<PathBuf> {
        if name.is_empty() {
            return None;
        }
        let found = self
            .dirs
            .iter()
            .map(|dir| candidate(dir, name))
            .find(|candidate| is_executable(candidate));
        log::debug!("resolve {}: {:?}", name, found);
        found
    }
}

/// `dir + "/" + name`. Unlike `Path::join`, an absolute `name` does not replace `dir`.
fn candidate(dir: &Path, name: &str) -> PathBuf {
    let mut joined = dir.as_os_str().to_os_string();
    joined.push("/");
    joined.push(name);
    PathBuf::from(joined)
}

/// A regular file (after following symlinks) the current user may execute.
pub fn is_executable(path: &Path) -> bool {
    let is_file = fs::metadata(path).map(|m| m.is_file()).unwrap_or(false);
    if !is_file {
        return false;
    }
    let Ok(c_path) = CString::new(path.as_os_str().as_bytes()) else {
        return false;
    };
    // SAFETY: c_path is a valid NUL-terminated string for the duration of the call.
    unsafe { libc::access(c_path.as_ptr(), libc::X_OK) == 0 }
}
