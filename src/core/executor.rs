use std::io::Write;

use crate::core::commands::{BuiltinRegistry, CommandContext, CommandError, ExitSignal};
use crate::core::env::Environment;
use crate::highlight::SyntaxHighlighter;
use crate::input::CommandLine;
use crate::path::SearchPath;
use crate::process::{ProcessLauncher, SpawnRequest, SystemLauncher};

/// Routes a command line to a builtin or to an external program.
///
/// Builtins always win over a same-named program on `PATH`. A program that ran is a
/// success no matter how it exited; only failing to start or wait for it is a
/// failure. Nothing here ends the shell except the `exit` builtin's signal.
pub struct CommandExecutor {
    builtins: BuiltinRegistry,
    launcher: Box<dyn ProcessLauncher>,
    highlighter: SyntaxHighlighter,
}

impl Default for CommandExecutor {
    fn default() -> Self {
        Self::new(BuiltinRegistry::new(), Box::new(SystemLauncher::new()))
    }
}

impl CommandExecutor {
    pub fn new(builtins: BuiltinRegistry, launcher: Box<dyn ProcessLauncher>) -> Self {
        Self {
            builtins,
            launcher,
            highlighter: SyntaxHighlighter::plain(),
        }
    }

    pub fn with_highlighter(mut self, highlighter: SyntaxHighlighter) -> Self {
        self.highlighter = highlighter;
        self
    }

    pub fn execute(
        &self,
        line: &CommandLine,
        env: &mut dyn Environment,
        stdout: &mut dyn Write,
        stderr: &mut dyn Write,
    ) -> ExitSignal {
        let result = match self.builtins.lookup(line.name()) {
            Some(cmd) => {
                log::debug!("builtin: {}", line.name());
                let mut ctx = CommandContext {
                    env,
                    stdout: &mut *stdout,
                    builtins: &self.builtins,
                };
                cmd.execute(line.tokens(), &mut ctx)
            }
            None => self.execute_external(line, env, stdout),
        };

        match result {
            Ok(signal) => signal,
            Err(e) => {
                self.report(stderr, &e);
                ExitSignal::FAILURE
            }
        }
    }

    fn execute_external(
        &self,
        line: &CommandLine,
        env: &mut dyn Environment,
        stdout: &mut dyn Write,
    ) -> Result<ExitSignal, CommandError> {
        let name = line.name();
        let Some(program) = SearchPath::from_env(&*env).resolve(name) else {
            writeln!(stdout, "{}: command not found", name)?;
            return Ok(ExitSignal::SUCCESS);
        };

        // Without a readable cwd the child inherits ours
        let cwd = match env.current_dir() {
            Ok(cwd) => Some(cwd),
            Err(e) => {
                log::debug!("working directory unavailable, child inherits: {}", e);
                None
            }
        };
        let request = SpawnRequest {
            program: &program,
            argv: line.tokens(),
            env: env.vars(),
            cwd,
        };

        // The child writes straight to the terminal; keep our output ahead of it
        stdout.flush()?;

        let process_error = |source| CommandError::ProcessError {
            name: name.to_string(),
            source,
        };
        let mut child = self.launcher.spawn(&request).map_err(process_error)?;
        let status = child.wait().map_err(process_error)?;
        if status.success() {
            log::debug!("{} (pid {}) finished", name, child.id());
        } else {
            log::debug!("{} (pid {}) failed: {}", name, child.id(), status);
        }

        Ok(ExitSignal::SUCCESS)
    }

    fn report(&self, stderr: &mut dyn Write, error: &CommandError) {
        let message = self.highlighter.highlight_error(&error.to_string());
        if let Err(e) = writeln!(stderr, "{}", message) {
            log::warn!("failed to write diagnostic: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::env::{EnvError, VirtualEnv};
    use crate::process::fake::RecordingLauncher;
    use crate::process::ProcessStatus;
    use crate::testutil::TempDir;
    use std::path::{Path, PathBuf};

    struct Outcome {
        signal: ExitSignal,
        stdout: String,
        stderr: String,
    }

    fn line(tokens: &[&str]) -> CommandLine {
        CommandLine::from_tokens(tokens.iter().map(|s| s.to_string()).collect()).unwrap()
    }

    fn execute(executor: &CommandExecutor, env: &mut VirtualEnv, tokens: &[&str]) -> Outcome {
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let signal = executor.execute(&line(tokens), env, &mut stdout, &mut stderr);
        Outcome {
            signal,
            stdout: String::from_utf8(stdout).unwrap(),
            stderr: String::from_utf8(stderr).unwrap(),
        }
    }

    fn executor_with(launcher: &RecordingLauncher) -> CommandExecutor {
        CommandExecutor::new(BuiltinRegistry::new(), Box::new(launcher.clone()))
    }

    #[test]
    fn test_builtin_dispatch() {
        let launcher = RecordingLauncher::exiting_with(ProcessStatus::Exited(0));
        let executor = executor_with(&launcher);
        let mut env = VirtualEnv::new("/");

        let outcome = execute(&executor, &mut env, &["echo", "hi"]);
        assert_eq!(outcome.signal, ExitSignal::SUCCESS);
        assert_eq!(outcome.stdout, "hi \n");
        assert!(launcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_builtin_shadows_executable() {
        let bin = TempDir::new("exec_shadow");
        bin.write_file("echo", 0o755);
        let launcher = RecordingLauncher::exiting_with(ProcessStatus::Exited(0));
        let executor = executor_with(&launcher);
        let mut env = VirtualEnv::new("/").with_var("PATH", &bin.path_str());

        let outcome = execute(&executor, &mut env, &["echo", "builtin"]);
        assert_eq!(outcome.stdout, "builtin \n");
        assert!(launcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_command_not_found() {
        let launcher = RecordingLauncher::exiting_with(ProcessStatus::Exited(0));
        let executor = executor_with(&launcher);
        let empty = TempDir::new("exec_not_found");
        let mut env = VirtualEnv::new("/").with_var("PATH", &empty.path_str());

        let outcome = execute(&executor, &mut env, &["zzzznotacommand"]);
        assert_eq!(outcome.signal, ExitSignal::SUCCESS);
        assert_eq!(outcome.stdout, "zzzznotacommand: command not found\n");
        assert!(outcome.stderr.is_empty());
        assert!(launcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_external_spawn_request() {
        let usr_bin = TempDir::new("exec_usr_bin");
        let bin = TempDir::new("exec_bin");
        let expected = usr_bin.write_file("foo", 0o755);
        bin.write_file("foo", 0o755);
        let cwd = TempDir::new("exec_cwd");
        let path = format!("{}:{}", usr_bin.path_str(), bin.path_str());
        let mut env = VirtualEnv::new(cwd.path())
            .with_var("PATH", &path)
            .with_var("GREETING", "hello");

        let launcher = RecordingLauncher::exiting_with(ProcessStatus::Exited(0));
        let executor = executor_with(&launcher);
        let outcome = execute(&executor, &mut env, &["foo", "-x", "bar"]);
        assert_eq!(outcome.signal, ExitSignal::SUCCESS);

        let calls = launcher.calls.borrow();
        assert_eq!(calls.len(), 1);
        let call = &calls[0];
        assert_eq!(call.program, expected);
        assert_eq!(call.argv, vec!["foo", "-x", "bar"]);
        assert_eq!(call.cwd, Some(PathBuf::from(cwd.path())));
        assert!(call
            .env
            .iter()
            .any(|(k, v)| k == "GREETING" && v == "hello"));
    }

    /// A shell whose working directory was deleted out from under it.
    struct LostCwd(VirtualEnv);

    impl Environment for LostCwd {
        fn var(&self, name: &str) -> Option<&str> {
            self.0.var(name)
        }

        fn set_var(&mut self, name: &str, value: &str) -> Result<(), EnvError> {
            self.0.set_var(name, value)
        }

        fn vars(&self) -> Vec<(String, String)> {
            self.0.vars()
        }

        fn current_dir(&self) -> Result<PathBuf, EnvError> {
            Err(std::io::Error::from_raw_os_error(libc::ENOENT).into())
        }

        fn set_current_dir(&mut self, path: &Path) -> Result<(), EnvError> {
            self.0.set_current_dir(path)
        }
    }

    #[test]
    fn test_external_runs_without_working_directory() {
        let bin = TempDir::new("exec_lost_cwd");
        bin.write_file("true", 0o755);
        let mut env = LostCwd(VirtualEnv::new("/").with_var("PATH", &bin.path_str()));

        let launcher = RecordingLauncher::exiting_with(ProcessStatus::Exited(0));
        let executor = executor_with(&launcher);
        let mut stdout = Vec::new();
        let mut stderr = Vec::new();
        let signal = executor.execute(&line(&["true"]), &mut env, &mut stdout, &mut stderr);

        assert_eq!(signal, ExitSignal::SUCCESS);
        assert!(stderr.is_empty());
        let calls = launcher.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].cwd, None);
    }

    #[test]
    fn test_absolute_name_not_found() {
        let launcher = RecordingLauncher::exiting_with(ProcessStatus::Exited(0));
        let executor = executor_with(&launcher);
        let empty = TempDir::new("exec_absolute");
        let mut env = VirtualEnv::new("/").with_var("PATH", &empty.path_str());

        let outcome = execute(&executor, &mut env, &["/bin/sh"]);
        assert_eq!(outcome.signal, ExitSignal::SUCCESS);
        assert_eq!(outcome.stdout, "/bin/sh: command not found
");
        assert!(launcher.calls.borrow().is_empty());
    }

    #[test]
    fn test_child_failure_is_shell_success() {
        let bin = TempDir::new("exec_child_fail");
        bin.write_file("false", 0o755);
        let mut env = VirtualEnv::new("/").with_var("PATH", &bin.path_str());

        for status in [ProcessStatus::Exited(1), ProcessStatus::Signaled(9)] {
            let launcher = RecordingLauncher::exiting_with(status);
            let executor = executor_with(&launcher);
            let outcome = execute(&executor, &mut env, &["false"]);
            assert_eq!(outcome.signal, ExitSignal::SUCCESS);
            assert!(outcome.stderr.is_empty());
        }
    }

    #[test]
    fn test_spawn_failure_reported() {
        let bin = TempDir::new("exec_spawn_fail");
        bin.write_file("tool", 0o755);
        let mut env = VirtualEnv::new("/").with_var("PATH", &bin.path_str());
        let executor = executor_with(&RecordingLauncher::failing());

        let outcome = execute(&executor, &mut env, &["tool"]);
        assert_eq!(outcome.signal, ExitSignal::FAILURE);
        assert!(outcome.stdout.is_empty());
        assert_eq!(
            outcome.stderr,
            "tool: spawn failed: Resource temporarily unavailable\n"
        );
    }

    #[test]
    fn test_builtin_error_becomes_failure() {
        let executor = executor_with(&RecordingLauncher::failing());
        let mut env = VirtualEnv::new("/");

        let outcome = execute(&executor, &mut env, &["pwd", "extra"]);
        assert_eq!(outcome.signal, ExitSignal::FAILURE);
        assert_eq!(outcome.stderr, "pwd: too many arguments\n");
    }

    #[test]
    fn test_exit_terminates() {
        let executor = executor_with(&RecordingLauncher::failing());
        let mut env = VirtualEnv::new("/");

        assert!(execute(&executor, &mut env, &["exit"]).signal.is_terminate());
        assert!(execute(&executor, &mut env, &["exit", "3"]).signal.is_terminate());
    }

    #[test]
    fn test_real_launcher_runs_program() {
        let executor = CommandExecutor::default();
        let mut env = VirtualEnv::new("/").with_var("PATH", "/bin:/usr/bin");

        let outcome = execute(&executor, &mut env, &["sh", "-c", "exit 5"]);
        assert_eq!(outcome.signal, ExitSignal::SUCCESS);
        assert!(outcome.stderr.is_empty());
    }
}
