//! Configuration for segkv
//!
//! The core only needs to know where its data directory lives.

use std::path::PathBuf;

use crate::error::{KvError, Result};

/// Main configuration for a segkv instance
#[derive(Debug, Clone)]
pub struct Config {
    /// Root directory for the segment file
    /// Internal structure:
    ///   {data_dir}/
    ///     └── dao_data.txt     (flushed segment)
    pub data_dir: PathBuf,

    /// Create `data_dir` (and parents) on open if it is missing
    pub create_dir: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("./segkv_data"),
            create_dir: true,
        }
    }
}

impl Config {
    /// Create a new config builder
    pub fn builder() -> ConfigBuilder {
        ConfigBuilder::default()
    }

    /// Check that the config can be used to open an engine
    pub fn validate(&self) -> Result<()> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(KvError::Config("data_dir must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Builder for Config
#[derive(Default)]
pub struct ConfigBuilder {
    config: Config,
}

impl ConfigBuilder {
    /// Set the data directory
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.config.data_dir = path.into();
        self
    }

    /// Whether to create the data directory when it does not exist
    pub fn create_dir(mut self, create: bool) -> Self {
        self.config.create_dir = create;
        self
    }

    pub fn build(self) -> Config {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides_defaults() {
        let config = Config::builder()
            .data_dir("/tmp/segkv-test")
            .create_dir(false)
            .build();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/segkv-test"));
        assert!(!config.create_dir);
    }

    #[test]
    fn test_empty_data_dir_is_rejected() {
        let config = Config::builder().data_dir("").build();
        assert!(matches!(config.validate(), Err(KvError::Config(_))));
    }
}
