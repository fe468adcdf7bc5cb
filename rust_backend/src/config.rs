//! Configuration file support.
//!
//! Reads data-source and display settings from a `bikeshare.toml` file.
//! Every field has a default, so an empty file (or no file at all) gives a
//! working configuration that reads the city CSVs from the current directory.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::City;
use crate::core::error::{BikeshareError, BikeshareResult};
use crate::io::loaders::DataSourceRegistry;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BikeshareConfig {
    #[serde(default)]
    pub data: DataSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

/// Where the city datasets live.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSettings {
    #[serde(default = "default_directory")]
    pub directory: PathBuf,
    /// Per-city file overrides keyed by source identifier, e.g. `"new york city"`
    #[serde(default)]
    pub files: BTreeMap<String, PathBuf>,
}

/// Console presentation settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

fn default_directory() -> PathBuf {
    PathBuf::from(".")
}

fn default_page_size() -> usize {
    5
}

impl Default for DataSettings {
    fn default() -> Self {
        Self {
            directory: default_directory(),
            files: BTreeMap::new(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

impl BikeshareConfig {
    /// Load configuration from a TOML file.
    ///
    /// Relative paths in the file are kept as written; they are resolved
    /// against the working directory when a dataset is opened.
    ///
    /// # Errors
    /// * `BikeshareError::Configuration` if the file cannot be read, parsed or validated
    pub fn from_file<P: AsRef<Path>>(path: P) -> BikeshareResult<Self> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            BikeshareError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml(content: &str) -> BikeshareResult<Self> {
        let config: BikeshareConfig = toml::from_str(content).map_err(|e| {
            BikeshareError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `bikeshare.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    ///
    /// # Returns
    /// * `Ok(None)` if no file exists in any of these locations
    ///
    /// # Errors
    /// * `BikeshareError::Configuration` if a file is found but is invalid
    pub fn from_default_location() -> BikeshareResult<Option<Self>> {
        Self::from_search_paths(&[
            PathBuf::from("bikeshare.toml"),
            PathBuf::from("rust_backend/bikeshare.toml"),
            PathBuf::from("../bikeshare.toml"),
        ])
    }

    /// Load the first existing file among `paths`.
    pub fn from_search_paths(paths: &[PathBuf]) -> BikeshareResult<Option<Self>> {
        match paths.iter().find(|path| path.exists()) {
            Some(path) => {
                log::debug!("Using configuration {}", path.display());
                Self::from_file(path).map(Some)
            }
            None => Ok(None),
        }
    }

    fn validate(&self) -> BikeshareResult<()> {
        if self.display.page_size == 0 {
            return Err(BikeshareError::Configuration(
                "'display.page_size' must be at least 1".to_string(),
            ));
        }
        for key in self.data.files.keys() {
            City::from_source_id(key).map_err(|_| {
                BikeshareError::Configuration(format!(
                    "Unknown city '{}' in [data.files]. Use 'chicago', 'new york city' or 'washington'",
                    key
                ))
            })?;
        }
        Ok(())
    }

    /// Build the data-source registry these settings describe.
    pub fn registry(&self) -> BikeshareResult<DataSourceRegistry> {
        let mut registry = DataSourceRegistry::new(&self.data.directory);
        for (key, path) in &self.data.files {
            let city = City::from_source_id(key)
                .map_err(|e| BikeshareError::Configuration(e.to_string()))?;
            registry = registry.with_file(city, path);
        }
        Ok(registry)
    }
}
