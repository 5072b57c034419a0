//! Session Controller
//!
//! Sequences one bisect step and turns it into a verdict:
//!
//! ```text
//! driver check -> [patch check -> patch apply] -> build -> [filesystem upload]
//!     -> [interactive session -> judgment] -> [restore] -> verdict
//! ```
//!
//! Any stage may end the step early. Every exit goes through
//! [`SessionController::finish`], which restores the working tree at most
//! once and only when patch application began.

use crate::build::BuildOps;
use crate::judge::Judge;
use crate::models::{Session, StepOutcome, Verdict};
use crate::patch::PatchOps;
use crate::pty::SessionRunner;
use crate::report::{self, print_banner};

/// One bisect step over pluggable collaborators
pub struct SessionController<P, B, S, J>
where
    P: PatchOps,
    B: BuildOps,
    S: SessionRunner,
    J: Judge,
{
    session: Session,
    patches: P,
    build: B,
    runner: S,
    judge: J,
    banner_width: usize,
    restored: bool,
}

impl<P, B, S, J> SessionController<P, B, S, J>
where
    P: PatchOps,
    B: BuildOps,
    S: SessionRunner,
    J: Judge,
{
    pub fn new(session: Session, patches: P, build: B, runner: S, judge: J) -> Self {
        Self {
            session,
            patches,
            build,
            runner,
            judge,
            banner_width: report::DEFAULT_WIDTH,
            restored: false,
        }
    }

    pub fn with_banner_width(mut self, width: usize) -> Self {
        self.banner_width = width;
        self
    }

    /// Run the whole step and return its verdict
    pub fn run(&mut self) -> Verdict {
        let verdict = self.step();
        self.finish(verdict)
    }

    /// Single exit gate: restore if required, then hand back the verdict
    pub fn finish(&mut self, verdict: Verdict) -> Verdict {
        if self.session.restore_required() && !self.restored {
            self.restored = true;
            self.patches.restore();
        }
        info!("Verdict: {} (exit code {})", verdict, verdict.exit_code());
        verdict
    }

    fn step(&mut self) -> Verdict {
        if let StepOutcome::Finish(verdict) = self.build.check_driver() {
            return verdict;
        }

        if self.session.has_patches() {
            if let Err(e) = self.patches.check_all(&self.session.patches) {
                warn!("{}", e);
                print_banner(self.banner_width, report::PATCH_FAILED);
                return Verdict::Skip;
            }

            // A partially applied batch must be reverted too
            self.session.mark_restore_required();
            if let Err(e) = self.patches.apply_all(&self.session.patches) {
                warn!("{}", e);
                print_banner(self.banner_width, report::PATCH_FAILED);
                return Verdict::Skip;
            }
        }

        if let StepOutcome::Finish(verdict) = self.build.build(&self.session) {
            return verdict;
        }

        if let StepOutcome::Finish(verdict) = self.build.upload_secondary(&self.session) {
            return verdict;
        }

        if self.session.build_only {
            return Verdict::Good;
        }

        let command = match self.build.interactive_command(&self.session) {
            Ok(command) => command,
            Err(e) => {
                warn!("Cannot start the test program: {}", e);
                return Verdict::Skip;
            }
        };

        match self.runner.run_session(&command) {
            Ok(summary) => info!(
                "'{}' ended ({}), status {}",
                command.display(),
                summary.ended_by,
                summary.status
            ),
            Err(e) => error!("Failed to run '{}': {}", command.display(), e),
        }
        println!();
        println!();

        self.judge.judge()
    }

    pub fn banner_width(&self) -> usize {
        self.banner_width
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn patches(&self) -> &P {
        &self.patches
    }

    pub fn build(&self) -> &B {
        &self.build
    }

    pub fn runner(&self) -> &S {
        &self.runner
    }

    pub fn judge(&self) -> &J {
        &self.judge
    }
}
