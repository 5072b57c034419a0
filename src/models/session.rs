//! Bisect Session Model
//!
//! The per-invocation run context: which patches to apply, what to build
//! and how build failures are judged.

use super::verdict::Verdict;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a failing build or upload is classified
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BuildErrorPolicy {
    /// Build failures are inconclusive, unless compiling only
    #[default]
    #[serde(rename = "skip")]
    SkipOnFail,
    /// Build failures always mark the revision bad
    #[serde(rename = "bad")]
    BadOnFail,
}

impl BuildErrorPolicy {
    /// Verdict for a build or upload step that ran and failed.
    /// A compile-only run is a compile test, so failing it is always bad.
    pub fn classify_failure(self, build_only: bool) -> Verdict {
        match (build_only, self) {
            (true, _) => Verdict::Bad,
            (false, BuildErrorPolicy::SkipOnFail) => Verdict::Skip,
            (false, BuildErrorPolicy::BadOnFail) => Verdict::Bad,
        }
    }
}

/// Firmware flavour under test
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Target {
    /// Microcontroller build, flashed and monitored through the build driver
    Esp32,
    /// Desktop reference build for the given platform
    Native { platform: String },
}

impl Target {
    pub fn is_esp32(&self) -> bool {
        matches!(self, Target::Esp32)
    }
}

/// Top-level run context for one bisect step
#[derive(Debug, Clone)]
pub struct Session {
    /// Patches applied on top of the candidate revision, in order
    pub patches: Vec<PathBuf>,
    /// Firmware target
    pub target: Target,
    /// Compile only, never run the firmware
    pub build_only: bool,
    /// Don't upload the filesystem image
    pub skip_fs: bool,
    /// Classification of build failures
    pub policy: BuildErrorPolicy,
    /// Runtime configuration handed to the native firmware
    pub fnconfig: PathBuf,
    /// Key that ends the interactive session without killing the child
    pub quit_key: Option<u8>,
    restore_required: bool,
}

impl Session {
    pub fn new(target: Target) -> Self {
        Self {
            patches: Vec::new(),
            target,
            build_only: false,
            skip_fs: false,
            policy: BuildErrorPolicy::default(),
            fnconfig: PathBuf::from("fnconfig.ini"),
            quit_key: None,
            restore_required: false,
        }
    }

    pub fn has_patches(&self) -> bool {
        !self.patches.is_empty()
    }

    /// Record that the working tree has been touched and must be restored
    pub fn mark_restore_required(&mut self) {
        self.restore_required = true;
    }

    pub fn restore_required(&self) -> bool {
        self.restore_required
    }

    /// Whether the filesystem image upload stage runs
    pub fn wants_secondary_upload(&self) -> bool {
        self.target.is_esp32() && !self.build_only && !self.skip_fs
    }
}
