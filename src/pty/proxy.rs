//! Terminal Proxy
//!
//! Connects the operator terminal to a child running on a pseudoterminal.
//! Child output is copied verbatim. Operator keystrokes are copied verbatim
//! except for Ctrl-C, which becomes a SIGINT to the child's process group,
//! and the optional quit key, which ends the session.
//!
//! Keystrokes are only read while the operator terminal is in raw mode.
//! Piped or redirected input is left unread for whoever asks next.

use nix::errno::Errno;
use nix::poll::{poll, PollFd, PollFlags, PollTimeout};
use portable_pty::PtySize;
use std::fmt;
use std::io;

use super::process::{ControlledChild, PtyChild, SpawnConfig};
use super::signals::Signal;
use crate::error::Result;
use crate::models::ChildExitStatus;
use crate::terminal::{OperatorTerminal, RawModeGuard, StdioTerminal};

/// Default read size for both directions
pub const DEFAULT_BUFFER_SIZE: usize = 1024;

/// Why a proxied session ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEnd {
    /// The child closed its side of the terminal
    ChildClosed,
    /// The operator pressed the quit key
    QuitKey,
    /// Copying failed; the error was logged and absorbed
    IoError(String),
}

impl fmt::Display for SessionEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionEnd::ChildClosed => write!(f, "child closed terminal"),
            SessionEnd::QuitKey => write!(f, "quit key"),
            SessionEnd::IoError(reason) => write!(f, "I/O error: {}", reason),
        }
    }
}

/// Result of one proxied session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub status: ChildExitStatus,
    pub ended_by: SessionEnd,
}

/// Runs an interactive program for the operator
pub trait SessionRunner {
    fn run_session(&mut self, command: &SpawnConfig) -> Result<SessionSummary>;
}

/// Byte-transparent bridge between the operator and a pty child
#[derive(Debug, Clone)]
pub struct TerminalProxy {
    quit_key: Option<u8>,
    buffer_size: usize,
}

impl TerminalProxy {
    pub fn new(quit_key: Option<u8>) -> Self {
        Self {
            quit_key,
            buffer_size: DEFAULT_BUFFER_SIZE,
        }
    }

    pub fn with_buffer_size(mut self, size: usize) -> Self {
        self.buffer_size = size.max(1);
        self
    }

    pub fn quit_key(&self) -> Option<u8> {
        self.quit_key
    }

    /// Spawn `command` on a new pty and proxy it until it ends.
    ///
    /// Spawn failures are returned before the operator terminal is touched.
    pub fn run<O>(&self, command: &SpawnConfig, operator: &mut O) -> Result<SessionSummary>
    where
        O: OperatorTerminal + ?Sized,
    {
        let size = operator
            .window_size()
            .map(|(rows, cols)| PtySize {
                rows,
                cols,
                pixel_width: 0,
                pixel_height: 0,
            })
            .unwrap_or_default();

        let mut child = PtyChild::spawn(command, size)?;
        self.attach(&mut child, operator)
    }

    /// Proxy an already running child.
    ///
    /// On return the controller endpoint is closed, the child is reaped and
    /// the operator terminal is back in the mode it was in on entry.
    pub fn attach<C, O>(&self, child: &mut C, operator: &mut O) -> Result<SessionSummary>
    where
        C: ControlledChild + ?Sized,
        O: OperatorTerminal + ?Sized,
    {
        if let Some(pid) = child.pid() {
            operator.notice(&format!("Process PID is: {}", pid));
        }
        if let Some(key) = self.quit_key {
            operator.notice(&format!(
                "Press '{}' to stop the test program...",
                key as char
            ));
        }

        let mut guard = RawModeGuard::enter(operator);
        let read_keys = guard.is_raw();
        if !read_keys {
            debug!("Operator terminal not raw, keystrokes stay unread");
        }
        let ended_by = match self.pump(child, &mut *guard, read_keys) {
            Ok(end) => end,
            Err(e) => {
                warn!("Proxied session stopped on error: {}", e);
                SessionEnd::IoError(e.to_string())
            }
        };

        child.close();
        let status = child.wait();
        drop(guard);

        let status = status?;
        debug!("Session ended ({}), child {}", ended_by, status);
        Ok(SessionSummary { status, ended_by })
    }

    fn pump<C, O>(&self, child: &mut C, operator: &mut O, read_keys: bool) -> Result<SessionEnd>
    where
        C: ControlledChild + ?Sized,
        O: OperatorTerminal + ?Sized,
    {
        let mut buf = vec![0u8; self.buffer_size];
        let mut operator_open = read_keys;

        loop {
            let (child_ready, operator_ready) = {
                let Some(child_fd) = child.as_fd() else {
                    return Ok(SessionEnd::ChildClosed);
                };
                let mut fds = vec![PollFd::new(child_fd, PollFlags::POLLIN)];
                if operator_open {
                    fds.push(PollFd::new(operator.input_fd(), PollFlags::POLLIN));
                }

                match poll(&mut fds, PollTimeout::NONE) {
                    Ok(_) => {}
                    Err(Errno::EINTR) => continue,
                    Err(e) => return Err(e.into()),
                }

                (is_ready(&fds[0]), fds.get(1).is_some_and(is_ready))
            };

            if child_ready {
                match child.read(&mut buf) {
                    Ok(0) => return Ok(SessionEnd::ChildClosed),
                    Ok(n) => operator.write_output(&buf[..n])?,
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }

            if operator_ready {
                match operator.read_input(&mut buf) {
                    Ok(0) => {
                        debug!("Operator input closed, draining child output");
                        operator_open = false;
                    }
                    Ok(n) => {
                        if let Some(end) = self.forward_keys(&buf[..n], child)? {
                            return Ok(end);
                        }
                    }
                    Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                    Err(e) => return Err(e.into()),
                }
            }
        }
    }

    /// Forward operator bytes, acting on special keys in order
    fn forward_keys<C>(&self, keys: &[u8], child: &mut C) -> Result<Option<SessionEnd>>
    where
        C: ControlledChild + ?Sized,
    {
        let mut pending = 0;

        for (i, &byte) in keys.iter().enumerate() {
            let signal = Signal::from_key(byte);
            let quit = self.quit_key == Some(byte);
            if signal.is_none() && !quit {
                continue;
            }

            if pending < i {
                child.write_all(&keys[pending..i])?;
            }
            pending = i + 1;

            if let Some(Signal::Interrupt) = signal {
                if let Err(e) = child.interrupt() {
                    warn!("Failed to interrupt child: {}", e);
                }
            } else if quit {
                debug!("Quit key pressed");
                return Ok(Some(SessionEnd::QuitKey));
            }
        }

        if pending < keys.len() {
            child.write_all(&keys[pending..])?;
        }
        Ok(None)
    }
}

impl Default for TerminalProxy {
    fn default() -> Self {
        Self::new(None)
    }
}

impl SessionRunner for TerminalProxy {
    fn run_session(&mut self, command: &SpawnConfig) -> Result<SessionSummary> {
        let mut operator = StdioTerminal::new()?;
        self.run(command, &mut operator)
    }
}

fn is_ready(fd: &PollFd<'_>) -> bool {
    fd.revents().is_some_and(|events| {
        events.intersects(PollFlags::POLLIN | PollFlags::POLLHUP | PollFlags::POLLERR)
    })
}
