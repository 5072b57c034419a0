//! Core data models for bisect-helper
//!
//! This module contains the domain entities shared by the session
//! controller and its collaborators: the run context, the proxied child
//! and the verdict handed back to the bisection driver.

pub mod child_process;
pub mod session;
pub mod verdict;

// Re-exports for convenience
pub use child_process::{ChildExitStatus, ChildProcess};
pub use session::{BuildErrorPolicy, Session, Target};
pub use verdict::{StepOutcome, Verdict};
