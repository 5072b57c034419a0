//! Configuration management for bisect-helper
//!
//! Tool-level settings: where the build driver lives, how the native
//! firmware is started and how the interactive session behaves. Command
//! line flags override anything loaded here.

pub mod loader;

use crate::models::BuildErrorPolicy;
use crate::report;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build driver configuration
    pub build: BuildConfig,

    /// Interactive session configuration
    pub session: SessionConfig,
}

/// Build driver and firmware locations
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Build/flash driver, relative to the repository root
    pub driver: PathBuf,

    /// Text whose presence marks a driver new enough for ESP32 builds
    pub modern_marker: String,

    /// Directory the native build is installed into
    pub dist_dir: PathBuf,

    /// Native firmware executable, relative to `dist_dir`
    pub firmware: PathBuf,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            driver: PathBuf::from("./build.sh"),
            modern_marker: "set -e".to_string(),
            dist_dir: PathBuf::from("build/dist"),
            firmware: PathBuf::from("./fujinet"),
        }
    }
}

/// Interactive session and verdict defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key that ends the proxied session without signalling the child
    pub quit_key: Option<char>,

    /// Width of the stage failure banners
    pub banner_width: usize,

    /// Platform built when `--platform` is not given
    pub default_platform: String,

    /// Runtime configuration handed to the native firmware
    pub fnconfig: PathBuf,

    /// Classification of build failures when no flag is given
    pub build_error_policy: BuildErrorPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            quit_key: None,
            banner_width: report::DEFAULT_WIDTH,
            default_platform: "COCO".to_string(),
            fnconfig: PathBuf::from("fnconfig.ini"),
            build_error_policy: BuildErrorPolicy::SkipOnFail,
        }
    }
}
