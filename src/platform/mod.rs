//! Platform abstraction layer
//!
//! Process groups, pseudoterminals and termios are Unix facilities; this
//! layer keeps the few raw OS calls the session needs behind small traits.

mod traits;
#[cfg(unix)]
mod unix;

pub use traits::*;

#[cfg(not(unix))]
compile_error!("bisect-helper requires a Unix platform");

/// Platform implementation factory
pub struct Platform;

impl Platform {
    /// Get the platform-specific signal operations
    pub fn signals() -> Box<dyn SignalOps> {
        Box::new(unix::UnixSignals::new())
    }

    /// Get the platform-specific filesystem operations
    pub fn filesystem() -> Box<dyn FilesystemOps> {
        Box::new(unix::UnixFilesystem::new())
    }
}
