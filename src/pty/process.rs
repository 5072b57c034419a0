//! PTY Process Spawning
//!
//! Starts the interactive program on the peripheral side of a fresh
//! pseudoterminal and exposes the controller side as a pollable endpoint.

use portable_pty::{native_pty_system, Child, ChildKiller, CommandBuilder, MasterPty, PtySize};
use std::fs::File;
use std::io::{self, Read, Write};
use std::os::fd::{AsFd, BorrowedFd};
use std::path::PathBuf;

use super::signals::Signal;
use crate::error::{Error, Result};
use crate::models::{ChildExitStatus, ChildProcess};
use crate::platform::{Platform, SignalOps};

/// What to run inside the pseudoterminal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpawnConfig {
    pub program: String,
    pub args: Vec<String>,
    /// Defaults to the caller's current directory
    pub working_dir: Option<PathBuf>,
}

impl SpawnConfig {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            working_dir: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn current_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    /// Command line as shown to the operator
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

/// A running program on the far side of a terminal endpoint
pub trait ControlledChild {
    /// Descriptor polled for child output; `None` once closed
    fn as_fd(&self) -> Option<BorrowedFd<'_>>;

    /// Read child output. 0 means the child closed its terminal.
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Send operator bytes to the child
    fn write_all(&mut self, data: &[u8]) -> io::Result<()>;

    /// Interrupt the child's whole process group
    fn interrupt(&mut self) -> Result<()>;

    /// Close the controller endpoint; later calls are no-ops
    fn close(&mut self);

    /// Block until the child exits and reap it
    fn wait(&mut self) -> Result<ChildExitStatus>;

    fn pid(&self) -> Option<u32>;
}

/// Child process attached to a portable-pty pseudoterminal
pub struct PtyChild {
    process: ChildProcess,
    child: Box<dyn Child + Send + Sync>,
    master: Option<Box<dyn MasterPty + Send>>,
    controller: Option<File>,
    signals: Box<dyn SignalOps>,
}

impl PtyChild {
    /// Spawn `config` as a session leader on a new pty of the given size
    pub fn spawn(config: &SpawnConfig, size: PtySize) -> Result<Self> {
        let pair = native_pty_system()
            .openpty(size)
            .map_err(|e| Error::PtyCreationFailed {
                command: config.program.clone(),
                reason: e.to_string(),
            })?;

        // Relative directories resolve against ours, never the child's
        let here = std::env::current_dir()?;
        let cwd = match &config.working_dir {
            Some(dir) => here.join(dir),
            None => here,
        };

        let mut cmd = CommandBuilder::new(&config.program);
        cmd.args(&config.args);
        // CommandBuilder falls back to $HOME without an explicit cwd
        cmd.cwd(&cwd);

        let mut child = pair
            .slave
            .spawn_command(cmd)
            .map_err(|e| Error::CommandSpawnFailed {
                command: config.program.clone(),
                reason: e.to_string(),
            })?;
        // The child holds the only peripheral now; EOF depends on it
        drop(pair.slave);

        let pid = match child.process_id() {
            Some(pid) => pid,
            None => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(Error::NoPidAvailable {
                    command: config.program.clone(),
                });
            }
        };

        let controller = match open_controller(pair.master.as_ref()) {
            Ok(file) => file,
            Err(e) => {
                let _ = child.kill();
                let _ = child.wait();
                return Err(e);
            }
        };

        let mut process = ChildProcess::new(config.program.clone(), config.args.clone());
        process.mark_started(pid);
        info!("Spawned {} in {}", process.display_string(), cwd.display());

        Ok(Self {
            process,
            child,
            master: Some(pair.master),
            controller: Some(controller),
            signals: Platform::signals(),
        })
    }

    pub fn process(&self) -> &ChildProcess {
        &self.process
    }

    fn controller(&mut self) -> io::Result<&mut File> {
        self.controller
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "pty controller closed"))
    }
}

fn open_controller(master: &(dyn MasterPty + Send)) -> Result<File> {
    let raw = master.as_raw_fd().ok_or_else(|| Error::PtyControllerFailed {
        reason: "no file descriptor".to_string(),
    })?;
    // SAFETY: `raw` belongs to `master`, which is alive for this call
    let fd = unsafe { BorrowedFd::borrow_raw(raw) }
        .try_clone_to_owned()
        .map_err(|e| Error::PtyControllerFailed {
            reason: e.to_string(),
        })?;
    Ok(File::from(fd))
}

impl ControlledChild for PtyChild {
    fn as_fd(&self) -> Option<BorrowedFd<'_>> {
        self.controller.as_ref().map(|file| file.as_fd())
    }

    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self.controller()?.read(buf) {
            // Linux reports EIO once the peripheral side is fully closed
            Err(e) if e.raw_os_error() == Some(nix::libc::EIO) => Ok(0),
            other => other,
        }
    }

    fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        let controller = self.controller()?;
        controller.write_all(data)?;
        controller.flush()
    }

    fn interrupt(&mut self) -> Result<()> {
        let pgid = self.process.pgid.ok_or_else(|| Error::NoPidAvailable {
            command: self.process.command.clone(),
        })?;
        debug!("Interrupting process group {}", pgid);
        self.signals.signal_group(pgid, Signal::Interrupt)
    }

    fn close(&mut self) {
        if self.controller.take().is_some() {
            debug!("Closed pty controller for {}", self.process.command);
        }
        self.master.take();
    }

    fn wait(&mut self) -> Result<ChildExitStatus> {
        if let Some(status) = &self.process.exit_status {
            return Ok(status.clone());
        }

        let status = self.child.wait().map_err(|e| Error::ChildWaitFailed {
            reason: e.to_string(),
        })?;
        let status = ChildExitStatus {
            code: status.exit_code(),
            signal: status.signal().map(str::to_string),
        };
        self.process.mark_reaped(status.clone());
        info!(
            "{} exited with {} after {:?}",
            self.process.command,
            status,
            self.process.execution_duration().unwrap_or_default()
        );
        Ok(status)
    }

    fn pid(&self) -> Option<u32> {
        self.process.pid
    }
}

impl Drop for PtyChild {
    fn drop(&mut self) {
        self.close();
        if self.process.is_reaped() {
            return;
        }

        // Take the whole group down; the driver's monitor may have forked
        if let Some(pgid) = self.process.pgid {
            if self.signals.is_process_running(pgid) {
                if let Err(e) = self.signals.signal_group(pgid, Signal::Kill) {
                    debug!("Group kill on drop failed: {}", e);
                    let _ = self.child.kill();
                }
            }
        }
        let _ = self.child.wait();
    }
}
