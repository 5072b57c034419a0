//! Error types and Result aliases for bisect-helper

use std::path::PathBuf;
use thiserror::Error as ThisError;

/// Result type alias for bisect-helper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for bisect-helper
#[derive(Debug, ThisError)]
pub enum Error {
    // === PTY-related errors ===
    /// Failed to create PTY
    #[error("Failed to create PTY for command '{command}': {reason}")]
    PtyCreationFailed { command: String, reason: String },

    /// Failed to spawn command in PTY
    #[error("Failed to spawn command '{command}': {reason}")]
    CommandSpawnFailed { command: String, reason: String },

    /// Failed to duplicate the PTY controller endpoint
    #[error("Failed to open PTY controller: {reason}")]
    PtyControllerFailed { reason: String },

    /// No PID available for the spawned child
    #[error("No PID available for '{command}'")]
    NoPidAvailable { command: String },

    /// Failed to send signal to process group
    #[error("Failed to send signal '{signal}': {reason}")]
    SignalSendFailed { signal: String, reason: String },

    /// Failed to wait for the child process
    #[error("Failed to reap child process: {reason}")]
    ChildWaitFailed { reason: String },

    // === Terminal errors ===
    /// Failed to read or change the operator terminal attributes
    #[error("Terminal mode change failed: {reason}")]
    TerminalModeFailed { reason: String },

    // === External tool errors ===
    /// External tool could not be started at all
    #[error("Failed to run '{command}': {reason}")]
    ToolSpawnFailed { command: String, reason: String },

    /// External tool ran and exited unsuccessfully
    #[error("'{command}' exited with {status}")]
    ToolFailed { command: String, status: String },

    /// A patch did not check or apply cleanly
    #[error("Patch '{}' failed: {reason}", patch.display())]
    PatchFailed { patch: PathBuf, reason: String },

    /// Build driver missing or not executable
    #[error("Build driver '{}' not found or not executable", path.display())]
    DriverNotFound { path: PathBuf },

    /// Build driver predates the interface ESP32 builds need
    #[error("Build driver '{}' is obsolete", path.display())]
    DriverObsolete { path: PathBuf },

    /// Runtime configuration for the native firmware is missing
    #[error("Runtime configuration '{}' not found", path.display())]
    RuntimeConfigMissing { path: PathBuf },

    // === Configuration errors ===
    /// Failed to load configuration file
    #[error("Failed to load config from '{}': {reason}", path.display())]
    ConfigLoadFailed { path: PathBuf, reason: String },

    /// Failed to parse configuration
    #[error("Failed to parse {format} config: {reason}")]
    ConfigParseFailed { format: String, reason: String },

    /// Configuration validation failed
    #[error("Configuration validation failed for '{field}': {reason}")]
    ConfigValidationFailed { field: String, reason: String },

    // === I/O and OS errors ===
    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors from the nix system call layer
    #[error("System call failed: {0}")]
    Nix(#[from] nix::errno::Errno),

    /// Generic errors (for cases not yet categorized)
    #[error("Error: {0}")]
    Other(String),
}

impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Error::Other(err.to_string())
    }
}

impl From<String> for Error {
    fn from(err: String) -> Self {
        Error::Other(err)
    }
}
