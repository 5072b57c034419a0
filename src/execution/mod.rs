//! External tool execution
//!
//! Runs the collaborators bisect-helper drives (git, the build driver) as
//! plain child processes sharing the operator's stdio, and turns their exit
//! status into a `Result`.

use crate::error::{Error, Result};
use std::fmt;
use std::path::PathBuf;
use std::process::Command;

/// One external tool invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: String,
    pub args: Vec<String>,
    /// Directory to run in; inherits ours when unset
    pub cwd: Option<PathBuf>,
}

impl ToolCommand {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.cwd = Some(dir.into());
        self
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs external tools to completion
pub trait ToolRunner {
    /// `Ok(())` only if the tool ran and exited successfully
    fn run(&self, command: &ToolCommand) -> Result<()>;
}

impl<R: ToolRunner + ?Sized> ToolRunner for &R {
    fn run(&self, command: &ToolCommand) -> Result<()> {
        (**self).run(command)
    }
}

/// Direct command execution without shell or PTY
#[derive(Debug, Clone, Copy, Default)]
pub struct DirectExecutor;

impl DirectExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for DirectExecutor {
    fn run(&self, command: &ToolCommand) -> Result<()> {
        info!("Running: {}", command);

        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }

        let status = cmd.status().map_err(|e| Error::ToolSpawnFailed {
            command: command.to_string(),
            reason: e.to_string(),
        })?;

        if status.success() {
            debug!("'{}' succeeded", command);
            Ok(())
        } else {
            warn!("'{}' failed: {}", command, status);
            Err(Error::ToolFailed {
                command: command.to_string(),
                status: status.to_string(),
            })
        }
    }
}
