//! Test Utilities and Mocks
//!
//! Shared doubles for the contract and integration suites. Each suite pulls
//! this in with `#[path]`, so not every helper is used everywhere.

#![allow(dead_code)]

pub mod fixtures;

// Re-exports for convenience
pub use mock_pty::MockChild;
pub use mock_session::{EventLog, RecordingPatches, RecordingRunner, ScriptedBuild, ScriptedJudge};
pub use mock_terminal::MockOperator;
