//! Operator terminal handling
//!
//! Everything that touches the terminal bisect-helper was launched from:
//! raw-mode switching with guaranteed restore, and the stdio endpoint the
//! proxy reads keystrokes from and writes child output to.

pub mod operator;
pub mod state;

pub use operator::{OperatorTerminal, StdioTerminal};
pub use state::{RawModeGuard, TerminalState};
