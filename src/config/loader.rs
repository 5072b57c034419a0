//! Configuration File Loading
//!
//! Finds and loads the tool configuration from an explicit path or the
//! usual search locations, falling back to built-in defaults.

use super::Config;
use crate::error::{Error, Result};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_STEM: &str = "bisect-helper";

/// Configuration file loader
pub struct ConfigLoader {
    /// Search paths (without extension) for configuration files
    search_paths: Vec<PathBuf>,
    /// Supported configuration file formats
    supported_formats: Vec<ConfigFormat>,
    /// Configuration file actually loaded
    current_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
}

impl ConfigFormat {
    /// Determine the format from a file extension, defaulting to TOML
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => ConfigFormat::Json,
            _ => ConfigFormat::Toml,
        }
    }

    fn extension(self) -> &'static str {
        match self {
            ConfigFormat::Toml => "toml",
            ConfigFormat::Json => "json",
        }
    }
}

impl ConfigLoader {
    /// Create a new configuration loader
    pub fn new() -> Self {
        Self {
            search_paths: Self::get_search_paths(),
            supported_formats: vec![ConfigFormat::Toml, ConfigFormat::Json],
            current_path: None,
        }
    }

    /// Load from an explicit file, or search the default locations
    pub fn load(explicit: Option<&Path>) -> Result<Config> {
        let mut loader = Self::new();
        match explicit {
            Some(path) => loader.load_from_path(path),
            None => loader.load_or_default(),
        }
    }

    /// Load a specific file; a missing file is an error
    pub fn load_from_path(&mut self, path: &Path) -> Result<Config> {
        if !path.is_file() {
            return Err(Error::ConfigLoadFailed {
                path: path.to_path_buf(),
                reason: "Configuration file does not exist".to_string(),
            });
        }

        let config = self.load_config_file(path, ConfigFormat::from_path(path))?;
        self.validate_config(&config)?;
        self.current_path = Some(path.to_path_buf());
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Search the configured locations, falling back to defaults
    pub fn load_or_default(&mut self) -> Result<Config> {
        match self.find_and_load_config()? {
            Some((path, config)) => {
                self.validate_config(&config)?;
                info!("Loaded configuration from {}", path.display());
                self.current_path = Some(path);
                Ok(config)
            }
            None => {
                debug!("No configuration file found, using defaults");
                Ok(Config::default())
            }
        }
    }

    /// Find and load configuration from search paths
    fn find_and_load_config(&self) -> Result<Option<(PathBuf, Config)>> {
        for path in &self.search_paths {
            for format in &self.supported_formats {
                let config_path = path.with_extension(format.extension());

                if config_path.is_file() {
                    let config = self.load_config_file(&config_path, *format)?;
                    return Ok(Some((config_path, config)));
                }
            }
        }

        Ok(None)
    }

    /// Load a specific configuration file
    fn load_config_file(&self, path: &Path, format: ConfigFormat) -> Result<Config> {
        let content = fs::read_to_string(path).map_err(|e| Error::ConfigLoadFailed {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        match format {
            ConfigFormat::Toml => toml::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                format: "TOML".to_string(),
                reason: e.to_string(),
            }),
            ConfigFormat::Json => {
                serde_json::from_str(&content).map_err(|e| Error::ConfigParseFailed {
                    format: "JSON".to_string(),
                    reason: e.to_string(),
                })
            }
        }
    }

    /// Get default search paths for configuration files
    fn get_search_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();

        // Repository-local configuration wins
        if let Ok(cwd) = env::current_dir() {
            paths.push(cwd.join(CONFIG_STEM));
        }

        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join(CONFIG_STEM).join("config"));
        }

        if let Some(home) = dirs::home_dir() {
            paths.push(home.join(format!(".{}", CONFIG_STEM)));
        }

        paths
    }

    /// Validate configuration
    fn validate_config(&self, config: &Config) -> Result<()> {
        if config.build.driver.as_os_str().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "build.driver".to_string(),
                reason: "Build driver path cannot be empty".to_string(),
            });
        }

        if config.build.firmware.as_os_str().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "build.firmware".to_string(),
                reason: "Firmware path cannot be empty".to_string(),
            });
        }

        if !(10..=200).contains(&config.session.banner_width) {
            return Err(Error::ConfigValidationFailed {
                field: "session.banner_width".to_string(),
                reason: "Banner width must be between 10 and 200".to_string(),
            });
        }

        if config.session.default_platform.trim().is_empty() {
            return Err(Error::ConfigValidationFailed {
                field: "session.default_platform".to_string(),
                reason: "Default platform cannot be empty".to_string(),
            });
        }

        if let Some(key) = config.session.quit_key {
            if !key.is_ascii() || key == '\x03' {
                return Err(Error::ConfigValidationFailed {
                    field: "session.quit_key".to_string(),
                    reason: "Quit key must be a single ASCII character other than Ctrl-C"
                        .to_string(),
                });
            }
        }

        Ok(())
    }

    /// Get the configuration file that was loaded, if any
    pub fn current_path(&self) -> Option<&Path> {
        self.current_path.as_deref()
    }

    /// List all search paths
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Clear all search paths and add a single path
    pub fn set_search_path(&mut self, path: PathBuf) {
        self.search_paths = vec![path];
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
