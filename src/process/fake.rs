use std::cell::RefCell;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use super::{ProcessError, ProcessHandle, ProcessLauncher, ProcessStatus, SpawnRequest};

#[derive(Debug, Clone)]
pub struct SpawnRecord {
    pub program: PathBuf,
    pub argv: Vec<String>,
    pub env: Vec<(String, String)>,
    pub cwd: Option<PathBuf>,
}

/// Records spawn requests and answers with a canned outcome.
#[derive(Clone)]
pub struct RecordingLauncher {
    pub calls: Rc<RefCell<Vec<SpawnRecord>>>,
    status: ProcessStatus,
    fail_spawn: bool,
}

impl RecordingLauncher {
    pub fn exiting_with(status: ProcessStatus) -> Self {
        Self {
            calls: Rc::new(RefCell::new(Vec::new())),
            status,
            fail_spawn: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_spawn: true,
            ..Self::exiting_with(ProcessStatus::Exited(0))
        }
    }
}

impl ProcessLauncher for RecordingLauncher {
    fn spawn(&self, request: &SpawnRequest<'_>) -> Result<Box<dyn ProcessHandle>, ProcessError> {
        self.calls.borrow_mut().push(SpawnRecord {
            program: request.program.to_path_buf(),
            argv: request.argv.to_vec(),
            env: request.env.clone(),
            cwd: request.cwd.clone(),
        });
        if self.fail_spawn {
            return Err(ProcessError::SpawnFailed(io::Error::from_raw_os_error(
                libc::EAGAIN,
            )));
        }
        Ok(Box::new(FakeChild {
            status: self.status,
        }))
    }
}

struct FakeChild {
    status: ProcessStatus,
}

impl ProcessHandle for FakeChild {
    fn id(&self) -> u32 {
        4242
    }

    fn wait(&mut self) -> Result<ProcessStatus, ProcessError> {
        Ok(self.status)
    }
}
