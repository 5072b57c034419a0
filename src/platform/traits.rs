//! Platform-specific operation traits
//!
//! These traits define the interface for platform-specific operations,
//! allowing for clean abstraction and easier testing.

use crate::error::Result;
use crate::pty::signals::Signal;
use std::path::Path;

/// Platform-specific signal operations
pub trait SignalOps: Send + Sync {
    /// Deliver a signal to every process in the group led by `pid`
    fn signal_group(&self, pid: u32, signal: Signal) -> Result<()>;

    /// Check if a process is still running
    fn is_process_running(&self, pid: u32) -> bool;
}

/// Platform-specific filesystem operations
pub trait FilesystemOps: Send + Sync {
    /// Check if a path is a regular file the current user may execute
    fn is_executable(&self, path: &Path) -> bool;

    /// Check whether a text file contains `needle`
    fn contains_text(&self, path: &Path, needle: &str) -> Result<bool>;
}
