//! Terminal State Management
//!
//! Snapshots the operator terminal's attributes before raw mode and puts
//! them back afterwards. [`RawModeGuard`] ties the restore to scope exit so
//! it also runs on early returns and unwinding.

use crate::error::{Error, Result};
use crate::terminal::operator::OperatorTerminal;
use nix::sys::termios::{cfmakeraw, tcgetattr, tcsetattr, SetArg, Termios};
use std::ops::{Deref, DerefMut};
use std::os::fd::AsFd;

/// Saved terminal attributes
#[derive(Clone)]
pub struct TerminalState {
    attrs: Termios,
}

impl TerminalState {
    /// Capture the current attributes of `fd`
    pub fn capture<Fd: AsFd>(fd: Fd) -> Result<Self> {
        let attrs = tcgetattr(fd).map_err(|e| Error::TerminalModeFailed {
            reason: format!("tcgetattr: {}", e),
        })?;
        Ok(Self { attrs })
    }

    /// Switch `fd` to raw mode: no line buffering, no echo, no signal keys
    pub fn enter_raw<Fd: AsFd>(&self, fd: Fd) -> Result<()> {
        let mut raw = self.attrs.clone();
        cfmakeraw(&mut raw);
        tcsetattr(fd, SetArg::TCSAFLUSH, &raw).map_err(|e| Error::TerminalModeFailed {
            reason: format!("tcsetattr(raw): {}", e),
        })
    }

    /// Put the captured attributes back once pending output has drained
    pub fn restore<Fd: AsFd>(&self, fd: Fd) -> Result<()> {
        tcsetattr(fd, SetArg::TCSADRAIN, &self.attrs).map_err(|e| Error::TerminalModeFailed {
            reason: format!("tcsetattr(restore): {}", e),
        })
    }
}

impl std::fmt::Debug for TerminalState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalState")
            .field("local_flags", &self.attrs.local_flags)
            .finish()
    }
}

/// Keeps the operator terminal raw for as long as the guard lives
pub struct RawModeGuard<'a, T: OperatorTerminal + ?Sized> {
    terminal: &'a mut T,
    raw: bool,
}

impl<'a, T: OperatorTerminal + ?Sized> RawModeGuard<'a, T> {
    /// Enter raw mode. A terminal that refuses is used as-is.
    pub fn enter(terminal: &'a mut T) -> Self {
        let raw = match terminal.enter_raw_mode() {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Could not switch terminal to raw mode: {}", e);
                false
            }
        };
        Self { terminal, raw }
    }

    /// Whether raw mode is actually in effect
    pub fn is_raw(&self) -> bool {
        self.raw
    }
}

impl<T: OperatorTerminal + ?Sized> Deref for RawModeGuard<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.terminal
    }
}

impl<T: OperatorTerminal + ?Sized> DerefMut for RawModeGuard<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        self.terminal
    }
}

impl<T: OperatorTerminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        if self.raw {
            if let Err(e) = self.terminal.restore_mode() {
                error!("Failed to restore terminal mode: {}", e);
            }
        }
    }
}
