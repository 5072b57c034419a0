//! bisect-helper - one `git bisect run` step for firmware
//!
//! Applies an optional patch set to the revision under test, drives the
//! repository's build/flash script, lets the operator exercise the result
//! through a transparent pseudoterminal session and reports the verdict as
//! the exit code `git bisect run` expects: 0 good, 1 bad, 125 skip.
//!
//! ## Module Organization
//!
//! ### Core Functionality
//!
//! - [`controller`] - The per-revision state machine and its single exit gate
//! - [`pty`] - Child spawning on a pty and the byte-transparent proxy
//! - [`terminal`] - Operator terminal, raw mode and guaranteed restore
//! - [`build`] - Build driver invocation and failure classification
//! - [`patch`] - `git apply` / `git restore` handling
//! - [`judge`] - The good/bad/skip prompt
//!
//! ### Support
//!
//! - [`models`] - Session, verdict and child process records
//! - [`config`] - Optional TOML/JSON configuration
//! - [`execution`] - External tool runner
//! - [`platform`] - Unix signal and filesystem calls
//! - [`mod@error`] - Error types and Result aliases
//!
//! ## Exit paths
//!
//! Every stage either continues or finishes with a [`Verdict`]. Whatever the
//! path, the controller restores the working tree once if a patch was applied
//! or the ESP32 toolchain ran, and the proxy puts the operator's terminal back
//! the way it found it.

#[macro_use]
extern crate tracing;

pub mod app;
pub mod build;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod execution;
pub mod judge;
pub mod models;
pub mod patch;
pub mod platform;
pub mod pty;
pub mod report;
pub mod terminal;

pub use cli::Cli;
pub use config::loader::ConfigLoader;
pub use config::Config;
pub use controller::SessionController;
pub use error::{Error, Result};
pub use models::{BuildErrorPolicy, Session, StepOutcome, Target, Verdict};

/// The current version of bisect-helper from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// The application name from Cargo.toml
pub const NAME: &str = env!("CARGO_PKG_NAME");
