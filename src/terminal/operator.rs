//! Operator Terminal
//!
//! The human-facing side of a proxied session: the controlling terminal
//! the tool was started from.

use crate::error::Result;
use crate::terminal::state::TerminalState;
use std::fs::File;
use std::io::{self, IsTerminal, Read, Write};
use std::os::fd::{AsFd, AsRawFd, BorrowedFd};

/// Operator side of the proxy
pub trait OperatorTerminal {
    /// Descriptor polled for keystrokes
    fn input_fd(&self) -> BorrowedFd<'_>;

    /// Read pending keystrokes; 0 means the input was closed
    fn read_input(&mut self, buf: &mut [u8]) -> io::Result<usize>;

    /// Write child output verbatim
    fn write_output(&mut self, data: &[u8]) -> io::Result<()>;

    /// Informational message shown outside the proxied byte stream
    fn notice(&mut self, message: &str);

    /// Save the current attributes and go raw. `Ok(false)` when the input
    /// is not a terminal and nothing was changed.
    fn enter_raw_mode(&mut self) -> Result<bool>;

    /// Restore the attributes saved by [`OperatorTerminal::enter_raw_mode`]
    fn restore_mode(&mut self) -> Result<()>;

    /// Size as (rows, cols), if known
    fn window_size(&self) -> Option<(u16, u16)> {
        None
    }
}

nix::ioctl_read_bad!(tiocgwinsz, nix::libc::TIOCGWINSZ, nix::libc::winsize);

/// The process's own stdin/stdout
pub struct StdioTerminal {
    input: File,
    saved: Option<TerminalState>,
}

impl StdioTerminal {
    pub fn new() -> Result<Self> {
        // Unbuffered handle on fd 0; std's Stdin buffers ahead of poll(2)
        let fd = io::stdin().as_fd().try_clone_to_owned()?;
        Ok(Self {
            input: File::from(fd),
            saved: None,
        })
    }

    pub fn is_terminal(&self) -> bool {
        self.input.is_terminal()
    }
}

impl OperatorTerminal for StdioTerminal {
    fn input_fd(&self) -> BorrowedFd<'_> {
        self.input.as_fd()
    }

    fn read_input(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.input.read(buf)
    }

    fn write_output(&mut self, data: &[u8]) -> io::Result<()> {
        let mut out = io::stdout().lock();
        out.write_all(data)?;
        out.flush()
    }

    fn notice(&mut self, message: &str) {
        println!("{}", message);
    }

    fn enter_raw_mode(&mut self) -> Result<bool> {
        if !self.is_terminal() {
            debug!("Operator input is not a terminal, leaving mode untouched");
            return Ok(false);
        }

        let state = TerminalState::capture(&self.input)?;
        state.enter_raw(&self.input)?;
        self.saved = Some(state);
        Ok(true)
    }

    fn restore_mode(&mut self) -> Result<()> {
        match self.saved.take() {
            Some(state) => state.restore(&self.input),
            None => Ok(()),
        }
    }

    fn window_size(&self) -> Option<(u16, u16)> {
        if !self.is_terminal() {
            return None;
        }

        let mut size = nix::libc::winsize {
            ws_row: 0,
            ws_col: 0,
            ws_xpixel: 0,
            ws_ypixel: 0,
        };
        // SAFETY: TIOCGWINSZ only writes a winsize into the provided struct
        match unsafe { tiocgwinsz(self.input.as_raw_fd(), &mut size) } {
            Ok(_) if size.ws_row > 0 && size.ws_col > 0 => Some((size.ws_row, size.ws_col)),
            _ => None,
        }
    }
}

impl Drop for StdioTerminal {
    fn drop(&mut self) {
        if let Err(e) = self.restore_mode() {
            error!("Failed to restore terminal mode: {}", e);
        }
    }
}
