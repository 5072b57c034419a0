//! PTY Signal Handling
//!
//! Signals the proxy may deliver to the child's process group, and the
//! raw key bytes that trigger them.

use nix::sys::signal::Signal as NixSignal;

/// ASCII ETX, what Ctrl-C produces once the operator terminal is raw
pub const INTERRUPT_BYTE: u8 = 0x03;

/// Signal types that can be sent to PTY processes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    /// Interrupt signal (Ctrl+C)
    Interrupt,
    /// Kill signal (forceful termination)
    Kill,
}

impl Signal {
    pub fn to_nix(self) -> NixSignal {
        match self {
            Signal::Interrupt => NixSignal::SIGINT,
            Signal::Kill => NixSignal::SIGKILL,
        }
    }

    /// Signal raised by a raw key byte, if any
    pub fn from_key(byte: u8) -> Option<Self> {
        match byte {
            INTERRUPT_BYTE => Some(Signal::Interrupt),
            _ => None,
        }
    }
}
