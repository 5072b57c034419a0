//! Build Orchestrator
//!
//! Drives the repository's build/flash script and classifies its failures.
//! The script is a black box; only its exit status matters.
//!
//! | Target | compile only | build + flash | filesystem | run |
//! |--------|--------------|---------------|------------|-----|
//! | ESP32  | `-b`         | `-u`          | `-f`       | `-m` |
//! | native | `-p <platform>` | `-p <platform>` | n/a     | firmware in `dist_dir` |

use crate::config::BuildConfig;
use crate::error::{Error, Result};
use crate::execution::{ToolCommand, ToolRunner};
use crate::models::{Session, StepOutcome, Target, Verdict};
use crate::platform::{FilesystemOps, Platform};
use crate::pty::SpawnConfig;
use crate::report::{self, print_banner};
use std::path::PathBuf;

/// Build pipeline stages
pub trait BuildOps {
    /// The build driver must exist and be executable
    fn check_driver(&mut self) -> StepOutcome;

    /// Build (and for ESP32 flash) the firmware
    fn build(&mut self, session: &Session) -> StepOutcome;

    /// Upload the filesystem image, when the session wants it
    fn upload_secondary(&mut self, session: &Session) -> StepOutcome;

    /// Program the operator interacts with to judge the build
    fn interactive_command(&mut self, session: &Session) -> Result<SpawnConfig>;
}

/// [`BuildOps`] over the repository's `build.sh`
pub struct BuildOrchestrator<R: ToolRunner> {
    runner: R,
    config: BuildConfig,
    filesystem: Box<dyn FilesystemOps>,
    banner_width: usize,
}

impl<R: ToolRunner> BuildOrchestrator<R> {
    pub fn new(runner: R, config: BuildConfig) -> Self {
        Self {
            runner,
            config,
            filesystem: Platform::filesystem(),
            banner_width: report::DEFAULT_WIDTH,
        }
    }

    pub fn with_banner_width(mut self, width: usize) -> Self {
        self.banner_width = width;
        self
    }

    pub fn banner_width(&self) -> usize {
        self.banner_width
    }

    pub fn with_filesystem(mut self, filesystem: Box<dyn FilesystemOps>) -> Self {
        self.filesystem = filesystem;
        self
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    fn driver_program(&self) -> String {
        self.config.driver.to_string_lossy().into_owned()
    }

    fn driver_command<I, S>(&self, args: I) -> ToolCommand
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        ToolCommand::new(self.driver_program()).args(args)
    }

    fn ensure_driver(&self) -> Result<()> {
        if self.filesystem.is_executable(&self.config.driver) {
            Ok(())
        } else {
            Err(Error::DriverNotFound {
                path: self.config.driver.clone(),
            })
        }
    }

    fn ensure_modern_driver(&self) -> Result<()> {
        let modern = self
            .filesystem
            .contains_text(&self.config.driver, &self.config.modern_marker)?;
        if modern {
            Ok(())
        } else {
            Err(Error::DriverObsolete {
                path: self.config.driver.clone(),
            })
        }
    }

    /// Stop with `verdict` after showing `banner`
    fn finish(&self, banner: &str, verdict: Verdict) -> StepOutcome {
        print_banner(self.banner_width, banner);
        StepOutcome::Finish(verdict)
    }

    /// Classify a failed build-like step
    fn failed(&self, session: &Session, error: Error, banner: &str) -> StepOutcome {
        let verdict = match error {
            // Could not even start the driver: nothing was tested
            Error::ToolSpawnFailed { .. } => Verdict::Skip,
            _ => session.policy.classify_failure(session.build_only),
        };
        warn!("{} ({}), verdict {}", banner, error, verdict);
        self.finish(banner, verdict)
    }

    fn resolve_fnconfig(&self, session: &Session) -> Result<PathBuf> {
        let path = std::path::absolute(&session.fnconfig)?;
        if path.is_file() {
            Ok(path)
        } else {
            Err(Error::RuntimeConfigMissing { path })
        }
    }
}

impl<R: ToolRunner> BuildOps for BuildOrchestrator<R> {
    fn check_driver(&mut self) -> StepOutcome {
        match self.ensure_driver() {
            Ok(()) => StepOutcome::Continue,
            Err(e) => {
                warn!("{}", e);
                self.finish(report::NO_DRIVER, Verdict::Skip)
            }
        }
    }

    fn build(&mut self, session: &Session) -> StepOutcome {
        let args = match &session.target {
            Target::Esp32 => {
                if let Err(e) = self.ensure_modern_driver() {
                    warn!("{}", e);
                    return self.finish(report::DRIVER_OBSOLETE, Verdict::Skip);
                }
                let mode = if session.build_only { "-b" } else { "-u" };
                vec![mode.to_string()]
            }
            Target::Native { platform } => vec!["-p".to_string(), platform.clone()],
        };

        match self.runner.run(&self.driver_command(args)) {
            Ok(()) => StepOutcome::Continue,
            Err(e) => self.failed(session, e, report::BUILD_FAILED),
        }
    }

    fn upload_secondary(&mut self, session: &Session) -> StepOutcome {
        if !session.wants_secondary_upload() {
            return StepOutcome::Continue;
        }

        match self.runner.run(&self.driver_command(["-f"])) {
            Ok(()) => StepOutcome::Continue,
            Err(e) => self.failed(session, e, report::UPLOAD_FAILED),
        }
    }

    fn interactive_command(&mut self, session: &Session) -> Result<SpawnConfig> {
        match &session.target {
            Target::Esp32 => Ok(SpawnConfig::new(self.driver_program()).arg("-m")),
            Target::Native { .. } => {
                let fnconfig = self.resolve_fnconfig(session).inspect_err(|_| {
                    print_banner(self.banner_width, report::NO_CONFIG);
                })?;
                Ok(
                    SpawnConfig::new(self.config.firmware.to_string_lossy().into_owned())
                        .arg("-c")
                        .arg(fnconfig.to_string_lossy().into_owned())
                        .current_dir(&self.config.dist_dir),
                )
            }
        }
    }
}
