//! Alignment configuration file support.
//!
//! This module reads the alignment settings of a classification job from a
//! TOML file. Every section and key is optional:
//!
//! ```toml
//! [alignment]
//! interval = "12 months"
//! reference = "first"        # or "most_common"
//!
//! [selection]
//! layout = "time_series"     # or "raster"
//! parallel = true
//! min_parallel_windows = 8
//!
//! [validation]
//! enabled = true
//! max_reported_issues = 5
//! ```

use log::debug;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::core::ReferencePolicy;
use crate::error::{AlignmentError, AlignmentResult};
use crate::time::Interval;
use crate::transformations::{SelectionLayout, SelectionOptions};

/// Name of the configuration file searched by [`AlignmentConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "alignment.toml";

/// Alignment configuration from file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentConfig {
    #[serde(default)]
    pub alignment: AlignmentSettings,
    #[serde(default)]
    pub selection: SelectionSettings,
    #[serde(default)]
    pub validation: ValidationSettings,
}

/// Window derivation settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlignmentSettings {
    #[serde(default)]
    pub interval: Interval,
    #[serde(default)]
    pub reference: ReferencePolicy,
}

/// Selection mask settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionSettings {
    #[serde(default)]
    pub layout: SelectionLayout,
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    #[serde(default = "default_min_parallel_windows")]
    pub min_parallel_windows: usize,
}

/// Timeline validation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationSettings {
    #[serde(default = "default_validation_enabled")]
    pub enabled: bool,
    #[serde(default = "default_max_reported_issues")]
    pub max_reported_issues: usize,
}

fn default_parallel() -> bool {
    SelectionOptions::default().parallel
}

fn default_min_parallel_windows() -> usize {
    SelectionOptions::default().min_parallel_windows
}

fn default_validation_enabled() -> bool {
    true
}

fn default_max_reported_issues() -> usize {
    5
}

impl Default for SelectionSettings {
    fn default() -> Self {
        Self {
            layout: SelectionLayout::default(),
            parallel: default_parallel(),
            min_parallel_windows: default_min_parallel_windows(),
        }
    }
}

impl SelectionSettings {
    pub fn options(&self) -> SelectionOptions {
        SelectionOptions {
            parallel: self.parallel,
            min_parallel_windows: self.min_parallel_windows,
        }
    }
}

impl Default for ValidationSettings {
    fn default() -> Self {
        Self {
            enabled: default_validation_enabled(),
            max_reported_issues: default_max_reported_issues(),
        }
    }
}

impl AlignmentConfig {
    /// Load alignment configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(AlignmentConfig)` if successful
    /// * `Err(AlignmentError::Configuration)` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> AlignmentResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            AlignmentError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        content.parse()
    }

    /// Load alignment configuration from the default location.
    ///
    /// Searches for `alignment.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn from_default_location() -> AlignmentResult<Self> {
        match Self::default_location() {
            Some(path) => Self::from_file(path),
            None => Err(AlignmentError::Configuration(format!(
                "No {} found in standard locations",
                CONFIG_FILE_NAME
            ))),
        }
    }

    /// Configuration from the default location, or defaults when none exists.
    pub fn from_default_location_or_default() -> AlignmentResult<Self> {
        match Self::default_location() {
            Some(path) => Self::from_file(path),
            None => {
                debug!("No {} found, using default settings", CONFIG_FILE_NAME);
                Ok(Self::default())
            }
        }
    }

    fn default_location() -> Option<PathBuf> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            Path::new("rust_backend").join(CONFIG_FILE_NAME),
            Path::new("..").join(CONFIG_FILE_NAME),
        ];

        search_paths.into_iter().find(|path| path.exists())
    }

    /// Check settings that serde cannot express.
    pub fn validate(&self) -> AlignmentResult<()> {
        if self.validation.enabled && self.validation.max_reported_issues == 0 {
            return Err(AlignmentError::Configuration(
                "'validation.max_reported_issues' must be at least 1 when validation is enabled"
                    .to_string(),
            ));
        }
        Ok(())
    }
}

impl FromStr for AlignmentConfig {
    type Err = AlignmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: AlignmentConfig = toml::from_str(s).map_err(|e| {
            AlignmentError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}
