//! Child-process capability: spawn with pipes, hand out the channels, kill.
//! The rest of the client never touches `std::process` directly.

use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};

use crate::error::{ProtocolError, Result};

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            program: "satpipe".to_string(),
            args: vec!["serve".to_string()],
        }
    }
}

pub struct SolverProcess {
    child: Child,
}

impl SolverProcess {
    /// Spawns the solver with its stdin and stdout rewired to pipes back to
    /// the parent. Failure to spawn or to wire either pipe is fatal; there
    /// is no way to repair a half-built channel.
    pub fn spawn(config: &SolverConfig) -> Result<(Self, ChildStdin, ChildStdout)> {
        let mut child = Command::new(&config.program)
            .args(&config.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()
            .map_err(ProtocolError::Spawn)?;
        let stdin = child.stdin.take().ok_or_else(|| {
            ProtocolError::Spawn(std::io::Error::other("child stdin pipe missing"))
        })?;
        let stdout = child.stdout.take().ok_or_else(|| {
            ProtocolError::Spawn(std::io::Error::other("child stdout pipe missing"))
        })?;
        Ok((Self { child }, stdin, stdout))
    }

    /// Forceful teardown. A half-written protocol message cannot be trusted
    /// to resume, so there is no cooperative shutdown path.
    pub fn kill(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

impl Drop for SolverProcess {
    fn drop(&mut self) {
        self.kill();
    }
}
