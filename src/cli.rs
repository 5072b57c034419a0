//! Command line interface

use crate::config::Config;
use crate::error::{Error, Result};
use crate::models::{BuildErrorPolicy, Session, Target};
use crate::pty::INTERRUPT_BYTE;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bisect-helper")]
#[command(about = "Build, flash and judge one firmware revision for `git bisect run`")]
#[command(version)]
pub struct Cli {
    /// Patches to apply on top of the revision under test
    #[arg(value_name = "PATCH")]
    pub patches: Vec<PathBuf>,

    /// Build for ESP32
    #[arg(long)]
    pub esp32: bool,

    /// Don't flash the filesystem
    #[arg(long)]
    pub skip_fs: bool,

    /// Don't run, just compile
    #[arg(long)]
    pub compile_only: bool,

    /// Platform for the native build [default: COCO]
    #[arg(long, value_name = "NAME")]
    pub platform: Option<String>,

    /// fnconfig.ini to use [default: fnconfig.ini]
    #[arg(long, value_name = "PATH")]
    pub fnconfig: Option<PathBuf>,

    /// Skip commit if build fails
    #[arg(long, conflicts_with = "build_err_bad")]
    pub build_err_skip: bool,

    /// Mark commit bad if build fails
    #[arg(long)]
    pub build_err_bad: bool,

    /// Configuration file
    #[arg(long, value_name = "PATH", env = "BISECT_HELPER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Key that stops the test program and moves on to the verdict prompt
    #[arg(long, value_name = "KEY")]
    pub quit_key: Option<char>,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the session for this invocation; flags override `config`
    pub fn to_session(&self, config: &Config) -> Result<Session> {
        let target = if self.esp32 {
            Target::Esp32
        } else {
            Target::Native {
                platform: self
                    .platform
                    .clone()
                    .unwrap_or_else(|| config.session.default_platform.clone()),
            }
        };

        let mut session = Session::new(target);
        session.patches = self.patches.clone();
        session.build_only = self.compile_only;
        session.skip_fs = self.skip_fs;
        session.policy = if self.build_err_bad {
            BuildErrorPolicy::BadOnFail
        } else if self.build_err_skip {
            BuildErrorPolicy::SkipOnFail
        } else {
            config.session.build_error_policy
        };
        session.fnconfig = self
            .fnconfig
            .clone()
            .unwrap_or_else(|| config.session.fnconfig.clone());
        session.quit_key = self
            .quit_key
            .or(config.session.quit_key)
            .map(quit_key_byte)
            .transpose()?;

        Ok(session)
    }
}

fn quit_key_byte(key: char) -> Result<u8> {
    match u8::try_from(key) {
        Ok(byte) if byte.is_ascii() && byte != INTERRUPT_BYTE => Ok(byte),
        _ => Err(Error::ConfigValidationFailed {
            field: "quit_key".to_string(),
            reason: format!("{:?} is not a usable quit key", key),
        }),
    }
}
