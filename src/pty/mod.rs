//! Pseudoterminal (PTY) Management
//!
//! Spawning the interactive program on a pty and proxying the operator's
//! terminal to it.

pub mod process;
pub mod proxy;
pub mod signals;

pub use process::{ControlledChild, PtyChild, SpawnConfig};
pub use proxy::{SessionEnd, SessionRunner, SessionSummary, TerminalProxy, DEFAULT_BUFFER_SIZE};
pub use signals::{Signal, INTERRUPT_BYTE};
