//! Unix signal operations

use crate::error::{Error, Result};
use crate::platform::traits::SignalOps;
use crate::pty::signals::Signal;
use nix::sys::signal::{kill, killpg};
use nix::unistd::{getpgid, Pid};

pub struct UnixSignals;

impl UnixSignals {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UnixSignals {
    fn default() -> Self {
        Self::new()
    }
}

impl SignalOps for UnixSignals {
    fn signal_group(&self, pid: u32, signal: Signal) -> Result<()> {
        let pid = Pid::from_raw(pid as i32);
        // The child leads its own session, but ask the kernel rather than assume
        let pgid = getpgid(Some(pid)).unwrap_or(pid);

        debug!("Sending {:?} to process group {}", signal, pgid);
        killpg(pgid, signal.to_nix()).map_err(|e| Error::SignalSendFailed {
            signal: format!("{:?}", signal),
            reason: e.to_string(),
        })
    }

    fn is_process_running(&self, pid: u32) -> bool {
        // Null signal: existence and permission check only
        kill(Pid::from_raw(pid as i32), None).is_ok()
    }
}
