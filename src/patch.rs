//! Patch Manager
//!
//! Applies an ordered patch set on top of the revision under test through
//! `git apply`, and puts the working tree back afterwards so the bisection
//! driver can check out the next revision.

use crate::error::{Error, Result};
use crate::execution::{ToolCommand, ToolRunner};
use std::path::{Path, PathBuf};

/// Working-tree patching
pub trait PatchOps {
    /// Verify every patch applies cleanly, in order, without touching the tree
    fn check_all(&mut self, patches: &[PathBuf]) -> Result<()>;

    /// Apply every patch in order; stops at the first failure
    fn apply_all(&mut self, patches: &[PathBuf]) -> Result<()>;

    /// Revert all staged and unstaged changes to tracked files.
    /// Failures are logged only.
    fn restore(&mut self);
}

/// [`PatchOps`] backed by the git command line
pub struct GitPatchManager<R: ToolRunner> {
    runner: R,
    repo_dir: Option<PathBuf>,
}

impl<R: ToolRunner> GitPatchManager<R> {
    pub fn new(runner: R) -> Self {
        Self {
            runner,
            repo_dir: None,
        }
    }

    /// Run git in `dir` instead of the current directory
    pub fn with_repo_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.repo_dir = Some(dir.into());
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn git<I, S>(&self, args: I) -> ToolCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let cmd = ToolCommand::new("git").args(args);
        match &self.repo_dir {
            Some(dir) => cmd.current_dir(dir),
            None => cmd,
        }
    }

    fn run_per_patch(&self, patches: &[PathBuf], check: bool) -> Result<()> {
        for patch in patches {
            let mut args = vec!["apply".to_string()];
            if check {
                args.push("--check".to_string());
            }
            args.push(patch_arg(patch));

            self.runner
                .run(&self.git(args))
                .map_err(|e| Error::PatchFailed {
                    patch: patch.clone(),
                    reason: e.to_string(),
                })?;
        }
        Ok(())
    }
}

const RESTORE_STEPS: [&[&str]; 2] = [&["restore", "--staged", "."], &["restore", "."]];

fn patch_arg(patch: &Path) -> String {
    patch.to_string_lossy().into_owned()
}

impl<R: ToolRunner> PatchOps for GitPatchManager<R> {
    fn check_all(&mut self, patches: &[PathBuf]) -> Result<()> {
        debug!("Checking {} patch(es)", patches.len());
        self.run_per_patch(patches, true)
    }

    fn apply_all(&mut self, patches: &[PathBuf]) -> Result<()> {
        info!("Applying {} patch(es)", patches.len());
        self.run_per_patch(patches, false)
    }

    fn restore(&mut self) {
        info!("Restoring working tree");
        for args in RESTORE_STEPS {
            if let Err(e) = self.runner.run(&self.git(args.iter().copied())) {
                warn!("Working tree restore step failed: {}", e);
            }
        }
    }
}
