use std::os::unix::process::{CommandExt, ExitStatusExt};
use std::process::{Child, Command, Stdio};

use super::{ProcessError, ProcessHandle, ProcessLauncher, ProcessStatus, SpawnRequest};

/// Launches children with `std::process::Command`, sharing the shell's terminal.
#[derive(Clone, Default)]
pub struct SystemLauncher;

impl SystemLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl ProcessLauncher for SystemLauncher {
    fn spawn(&self, request: &SpawnRequest<'_>) -> Result<Box<dyn ProcessHandle>, ProcessError> {
        let (arg0, args) = request
            .argv
            .split_first()
            .ok_or_else(|| ProcessError::InvalidArguments("empty argument vector".into()))?;

        let mut command = Command::new(request.program);
        command
            .arg0(arg0)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .env_clear()
            .envs(request.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        if let Some(cwd) = &request.cwd {
            command.current_dir(cwd);
        }

        let child = command.spawn().map_err(ProcessError::SpawnFailed)?;
        log::debug!("spawned {} as pid {}", request.program.display(), child.id());
        Ok(Box::new(SystemChild { child }))
    }
}

struct SystemChild {
    child: Child,
}

impl ProcessHandle for SystemChild {
    fn id(&self) -> u32 {
        self.child.id()
    }

    fn wait(&mut self) -> Result<ProcessStatus, ProcessError> {
        let status = self.child.wait().map_err(ProcessError::WaitFailed)?;
        Ok(match (status.code(), status.signal()) {
            (Some(code), _) => ProcessStatus::Exited(code),
            (None, Some(sig)) => ProcessStatus::Signaled(sig),
            (None, None) => ProcessStatus::Exited(-1),
        })
    }
}
