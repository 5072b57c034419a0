//! Child Process Model
//!
//! Tracks the lifecycle of the process attached to the pseudoterminal:
//! its PID, its process group and how it ended.

use chrono::{DateTime, Utc};
use std::fmt;

/// Represents the state of a proxied child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChildState {
    /// Process has been created but not started
    #[default]
    Created,
    /// Process is currently running
    Running,
    /// Process has been reaped
    Reaped,
}

/// How a reaped child terminated
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ChildExitStatus {
    /// Exit code reported by the OS
    pub code: u32,
    /// Name of the terminating signal, if any
    pub signal: Option<String>,
}

impl ChildExitStatus {
    pub fn with_code(code: u32) -> Self {
        Self { code, signal: None }
    }

    pub fn success(&self) -> bool {
        self.code == 0 && self.signal.is_none()
    }
}

impl fmt::Display for ChildExitStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.signal {
            Some(signal) => write!(f, "signal {}", signal),
            None => write!(f, "exit code {}", self.code),
        }
    }
}

/// The process proxied through the pseudoterminal
#[derive(Debug, Clone)]
pub struct ChildProcess {
    /// OS process identifier
    pub pid: Option<u32>,

    /// Process group; equals `pid` since the child leads its own session
    pub pgid: Option<u32>,

    /// Current state of the process
    pub state: ChildState,

    /// When the process was started
    pub start_time: Option<DateTime<Utc>>,

    /// When the process was reaped
    pub end_time: Option<DateTime<Utc>>,

    /// Exit status once reaped
    pub exit_status: Option<ChildExitStatus>,

    /// Command that was executed
    pub command: String,

    /// Arguments passed to the command
    pub args: Vec<String>,
}

impl ChildProcess {
    /// Create a new child record in the Created state
    pub fn new(command: String, args: Vec<String>) -> Self {
        Self {
            pid: None,
            pgid: None,
            state: ChildState::Created,
            start_time: None,
            end_time: None,
            exit_status: None,
            command,
            args,
        }
    }

    /// Mark the process as started; a session leader's group id is its PID
    pub fn mark_started(&mut self, pid: u32) {
        self.pid = Some(pid);
        self.pgid = Some(pid);
        self.state = ChildState::Running;
        self.start_time = Some(Utc::now());
    }

    /// Mark the process as reaped with the given status
    pub fn mark_reaped(&mut self, status: ChildExitStatus) {
        self.state = ChildState::Reaped;
        self.end_time = Some(Utc::now());
        self.exit_status = Some(status);
    }

    pub fn is_reaped(&self) -> bool {
        matches!(self.state, ChildState::Reaped)
    }

    /// Get the run duration once the process has been reaped
    pub fn execution_duration(&self) -> Option<std::time::Duration> {
        match (self.start_time, self.end_time) {
            (Some(start), Some(end)) => {
                Some(end.signed_duration_since(start).to_std().unwrap_or_default())
            }
            _ => None,
        }
    }

    /// Get a display string for the process
    pub fn display_string(&self) -> String {
        let state_str = match self.state {
            ChildState::Created => "Created",
            ChildState::Running => "Running",
            ChildState::Reaped => "Reaped",
        };

        let pid_str = self.pid.map_or("N/A".to_string(), |pid| pid.to_string());

        format!(
            "{} [{}] - {} {} {}",
            self.command,
            pid_str,
            state_str,
            self.args.join(" "),
            self.exit_status
                .as_ref()
                .map_or(String::new(), |status| format!("({})", status))
        )
    }
}

impl fmt::Display for ChildProcess {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_string())
    }
}
