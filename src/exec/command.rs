//! Command runner abstraction
//!
//! External invocations are blocking: one process at a time, wait for
//! completion, capture output. No timeout is imposed; a hung build blocks
//! the tool until the operator intervenes.

use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{StackError, StackResult};

/// Structured result of a completed external command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Exit code, `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs a named external program and captures its outcome.
///
/// `cmd[0]` is the program, the rest are its arguments. A spawn failure
/// (binary missing, not executable) surfaces as an `Err`; a process that
/// ran but exited non-zero is an `Ok` with `success() == false`. Callers
/// must treat the two differently where it matters.
pub trait CommandRunner {
    fn run(&self, cmd: &[String], cwd: &Path) -> StackResult<CommandOutput>;
}

/// Command runner backed by `std::process`
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&self, cmd: &[String], cwd: &Path) -> StackResult<CommandOutput> {
        let (program, args) = cmd.split_first().ok_or_else(|| StackError::CommandSpawn {
            program: String::new(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "empty command line"),
        })?;

        let output = Command::new(program)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| StackError::CommandSpawn {
                program: program.clone(),
                source: e,
            })?;

        Ok(CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Render a command line for log output
pub(crate) fn display(cmd: &[String]) -> String {
    cmd.join(" ")
}
